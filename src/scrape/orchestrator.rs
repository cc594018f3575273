//! Run orchestration
//!
//! Wires up the rate limiter, robots cache, fetch client, extractor, and
//! export sink for one run, then fans out per-URL workflows and fans their
//! results back in.

use crate::client::{FetchClient, UserAgentRotator};
use crate::config::ScrapeConfig;
use crate::export::{ExportFormat, Exporter};
use crate::extract::{Extractor, ExtractorKind};
use crate::limiter::RateLimiter;
use crate::robots::RobotsCache;
use crate::scrape::workflow::{self, WorkflowContext, WorkflowState};
use crate::scrape::{ProgressSink, ScrapeResult};
use crate::url::authority;
use crate::{ConfigError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Runs a scrape job based on the given config
pub async fn scrape(config: &ScrapeConfig) -> Result<ScrapeResult> {
    scrape_with_progress(config, None).await
}

/// Runs a scrape job, reporting page completions to an optional sink
///
/// Once the run has started it always completes with a `ScrapeResult`:
/// fetch failures and workflow panics are counted in `errors` rather than
/// aborting sibling workflows. Only setup (config resolution, client
/// construction) and the final export can fail the call itself.
pub async fn scrape_with_progress(
    config: &ScrapeConfig,
    progress: Option<Arc<dyn ProgressSink>>,
) -> Result<ScrapeResult> {
    let started = Instant::now();

    // Resolve the closed-enum collaborators up front
    let extractor_kind = ExtractorKind::parse(&config.selectors.parser).ok_or_else(|| {
        ConfigError::Validation(format!("unknown parser: {}", config.selectors.parser))
    })?;
    let export_format = ExportFormat::parse(&config.export.format).ok_or_else(|| {
        ConfigError::Validation(format!("unknown export format: {}", config.export.format))
    })?;
    let exporter = Exporter::new(export_format);

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.requests_per_second,
        config.rate_limit.burst,
    ));
    let robots = Arc::new(RobotsCache::new(&config.user_agent_token)?);

    let mut client = FetchClient::new(
        Arc::clone(&limiter),
        UserAgentRotator::new(),
        &config.retry,
        Duration::from_secs(config.timeout_secs),
        config.headers.clone().into_iter().collect(),
    );
    client.connect()?;

    // Target list falls back to the base URL
    let mut targets: Vec<Url> = Vec::new();
    if config.urls.is_empty() {
        targets.push(Url::parse(&config.base_url)?);
    } else {
        for raw in &config.urls {
            targets.push(Url::parse(raw)?);
        }
    }

    // One robots.txt fetch per distinct domain, in first-seen order.
    // A crawl-delay overrides the configured rate for that domain.
    let mut seen_domains: HashSet<String> = HashSet::new();
    for url in &targets {
        let Some(domain) = authority(url) else {
            continue;
        };
        if !seen_domains.insert(domain.clone()) {
            continue;
        }
        robots.fetch_if_absent(url).await;
        if let Some(delay) = robots.crawl_delay(url).await {
            if delay > 0.0 {
                tracing::info!("Crawl-delay {}s for {}, overriding rate", delay, domain);
                limiter.set_domain_rate(&domain, 1.0 / delay).await;
            }
        }
    }

    let ctx = Arc::new(WorkflowContext {
        client,
        robots,
        extractor: Extractor::new(extractor_kind),
        selectors: config.selectors.clone(),
        pagination: config.pagination.clone(),
        progress,
    });

    let handles: Vec<_> = targets
        .into_iter()
        .map(|url| tokio::spawn(workflow::run(Arc::clone(&ctx), url)))
        .collect();

    // Fan in, keeping launch order so records match the submission ordering
    let mut result = ScrapeResult::default();
    for joined in futures::future::join_all(handles).await {
        match joined {
            Ok(outcome) => {
                result.urls_scraped += outcome.pages_fetched as usize;
                if outcome.state == WorkflowState::Failed {
                    result.errors += 1;
                }
                result.records.extend(outcome.items);
            }
            Err(err) => {
                tracing::error!("Scrape task failed: {}", err);
                result.errors += 1;
            }
        }
    }

    result.items_found = result.records.len();
    if !result.records.is_empty() {
        exporter.export(&result.records, &config.export.output)?;
        tracing::info!(
            "Exported {} items to {}",
            result.items_found,
            config.export.output
        );
    }

    result.duration = started.elapsed();
    Ok(result)
}
