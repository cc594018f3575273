//! Per-domain robots.txt cache

use crate::robots::RobotsRules;
use crate::url::{authority, robots_url};
use crate::ScrapeError;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

/// Timeout for robots.txt requests, independent of the page-fetch timeout
const ROBOTS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Cached robots.txt data for one domain
#[derive(Debug, Clone)]
pub struct RobotsRecord {
    /// The parsed rule set (allow-all when the fetch failed)
    pub rules: RobotsRules,

    /// Crawl-delay for the cache's user-agent token, if the domain set one
    pub crawl_delay: Option<f64>,

    /// When the robots.txt was fetched or seeded
    pub fetched_at: DateTime<Utc>,
}

/// Fetch-once robots.txt compliance cache
///
/// One record per domain for the cache's lifetime. Before a domain's record
/// exists, `is_allowed` answers `true`: a URL is never blocked ahead of a
/// fetch attempt. Two workflows first-touching the same domain may both
/// fetch robots.txt; both compute the same record, so the race is benign.
pub struct RobotsCache {
    user_agent_token: String,
    http: reqwest::Client,
    records: RwLock<HashMap<String, RobotsRecord>>,
}

impl RobotsCache {
    /// Creates a cache checking rules against the given user-agent token
    pub fn new(user_agent_token: &str) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(ROBOTS_FETCH_TIMEOUT)
            .build()
            .map_err(ScrapeError::ClientBuild)?;
        Ok(Self {
            user_agent_token: user_agent_token.to_string(),
            http,
            records: RwLock::new(HashMap::new()),
        })
    }

    /// Fetches and caches robots.txt for the URL's domain, once per domain
    ///
    /// A second call for an already-recorded domain is a no-op. Non-200
    /// responses and transport failures install an allow-everything record
    /// instead of surfacing an error.
    pub async fn fetch_if_absent(&self, url: &Url) {
        let Some(domain) = authority(url) else {
            return;
        };
        if self.records.read().await.contains_key(&domain) {
            return;
        }

        let robots = robots_url(url);
        tracing::debug!("Fetching robots.txt for domain: {}", domain);

        let rules = match self.http.get(robots.as_str()).send().await {
            Ok(response) if response.status() == StatusCode::OK => match response.text().await {
                Ok(body) => RobotsRules::from_content(&body),
                Err(_) => RobotsRules::allow_all(),
            },
            Ok(response) => {
                tracing::debug!(
                    "robots.txt for {} returned {}, allowing all",
                    domain,
                    response.status()
                );
                RobotsRules::allow_all()
            }
            Err(err) => {
                tracing::warn!("Could not fetch robots.txt for {}: {}, allowing all", domain, err);
                RobotsRules::allow_all()
            }
        };

        self.install(domain, rules).await;
    }

    /// Checks whether the URL is allowed by its domain's cached rules
    ///
    /// Answers `true` when no record exists yet for the domain.
    pub async fn is_allowed(&self, url: &Url) -> bool {
        let Some(domain) = authority(url) else {
            return true;
        };
        match self.records.read().await.get(&domain) {
            Some(record) => record.rules.is_allowed(url.as_str(), &self.user_agent_token),
            None => true,
        }
    }

    /// Returns the cached crawl-delay for the URL's domain, if any
    pub async fn crawl_delay(&self, url: &Url) -> Option<f64> {
        let domain = authority(url)?;
        self.records
            .read()
            .await
            .get(&domain)
            .and_then(|record| record.crawl_delay)
    }

    /// Seeds a domain's rules from raw robots.txt content, without a fetch
    pub async fn set_robots_txt(&self, domain: &str, content: &str) {
        self.install(domain.to_string(), RobotsRules::from_content(content))
            .await;
    }

    async fn install(&self, domain: String, rules: RobotsRules) {
        let crawl_delay = rules.crawl_delay(&self.user_agent_token);
        let record = RobotsRecord {
            rules,
            crawl_delay,
            fetched_at: Utc::now(),
        };
        self.records.write().await.insert(domain, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_allowed_before_any_fetch() {
        let cache = RobotsCache::new("*").unwrap();
        assert!(cache.is_allowed(&url("https://example.com/anything")).await);
    }

    #[tokio::test]
    async fn test_seeded_deny_rule() {
        let cache = RobotsCache::new("*").unwrap();
        cache
            .set_robots_txt("example.com", "User-agent: *\nDisallow: /private")
            .await;

        assert!(!cache.is_allowed(&url("https://example.com/private")).await);
        assert!(!cache.is_allowed(&url("https://example.com/private/x")).await);
        assert!(cache.is_allowed(&url("https://example.com/public")).await);
    }

    #[tokio::test]
    async fn test_seeded_rules_do_not_affect_other_domains() {
        let cache = RobotsCache::new("*").unwrap();
        cache
            .set_robots_txt("example.com", "User-agent: *\nDisallow: /")
            .await;

        assert!(cache.is_allowed(&url("https://other.com/private")).await);
    }

    #[tokio::test]
    async fn test_crawl_delay_from_seeded_rules() {
        let cache = RobotsCache::new("*").unwrap();
        cache
            .set_robots_txt("example.com", "User-agent: *\nCrawl-delay: 4")
            .await;

        assert_eq!(cache.crawl_delay(&url("https://example.com/")).await, Some(4.0));
        assert_eq!(cache.crawl_delay(&url("https://other.com/")).await, None);
    }

    #[tokio::test]
    async fn test_crawl_delay_uses_configured_token() {
        let cache = RobotsCache::new("kumobot").unwrap();
        cache
            .set_robots_txt(
                "example.com",
                "User-agent: kumobot\nCrawl-delay: 2\n\nUser-agent: *\nCrawl-delay: 9",
            )
            .await;

        assert_eq!(cache.crawl_delay(&url("https://example.com/")).await, Some(2.0));
    }
}
