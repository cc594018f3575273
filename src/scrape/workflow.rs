//! Per-URL pagination workflow
//!
//! Each target URL gets one workflow driving its pagination chain to a
//! terminal state. Pages within a chain are strictly sequential; separate
//! workflows interleave freely.

use crate::client::FetchClient;
use crate::config::{PaginationConfig, SelectorConfig};
use crate::extract::{Extractor, Record};
use crate::robots::RobotsCache;
use crate::scrape::ProgressSink;
use crate::url::resolve_link;
use std::sync::Arc;
use url::Url;

/// States of a per-URL workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Acquiring a token and fetching the current page
    Fetching,
    /// Pulling records out of a fetched page
    Extracting,
    /// Resolving the next page's link
    Paginating,
    /// Robots.txt denied the current page; chain abandoned silently
    Blocked,
    /// A fetch gave up; chain abandoned and counted as an error
    Failed,
    /// Chain finished: no next link, or the page cap was reached
    Done,
}

impl WorkflowState {
    /// Returns true once the workflow can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Blocked | Self::Failed | Self::Done)
    }
}

/// What one workflow produced
#[derive(Debug)]
pub struct WorkflowOutcome {
    /// Records extracted along this chain, in page order
    pub items: Vec<Record>,

    /// Pages fetched successfully
    pub pages_fetched: u32,

    /// The terminal state the workflow ended in
    pub state: WorkflowState,
}

/// Shared collaborators handed to every workflow
pub(crate) struct WorkflowContext {
    pub client: FetchClient,
    pub robots: Arc<RobotsCache>,
    pub extractor: Extractor,
    pub selectors: SelectorConfig,
    pub pagination: PaginationConfig,
    pub progress: Option<Arc<dyn ProgressSink>>,
}

/// Runs one pagination chain to completion
pub(crate) async fn run(ctx: Arc<WorkflowContext>, start_url: Url) -> WorkflowOutcome {
    let mut items: Vec<Record> = Vec::new();
    let mut pages_fetched: u32 = 0;
    let max_pages = if ctx.pagination.enabled {
        ctx.pagination.max_pages
    } else {
        1
    };

    let mut current = Some(start_url);
    let state = loop {
        let Some(url) = current.take() else {
            break WorkflowState::Done;
        };
        if pages_fetched >= max_pages {
            break WorkflowState::Done;
        }

        // Fetching
        if !ctx.robots.is_allowed(&url).await {
            tracing::info!("Blocked by robots.txt: {}", url);
            break WorkflowState::Blocked;
        }
        let fetched = match ctx.client.fetch(&url).await {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::error!("Fetch error for {}: {}", url, err);
                break WorkflowState::Failed;
            }
        };
        if !fetched.success {
            tracing::warn!("Failed to fetch {}: status {}", url, fetched.status_code);
            break WorkflowState::Failed;
        }
        pages_fetched += 1;

        // Extracting
        let page_items = ctx.extractor.extract_items(
            &fetched.body,
            &ctx.selectors.items,
            &ctx.selectors.fields,
        );
        if let Some(progress) = &ctx.progress {
            progress.on_page_fetched(url.as_str(), page_items.len());
        }
        items.extend(page_items);

        // Paginating
        if !ctx.pagination.enabled {
            break WorkflowState::Done;
        }
        let Some(next_selector) = &ctx.pagination.next_selector else {
            break WorkflowState::Done;
        };
        match ctx.extractor.extract_one(&fetched.body, next_selector) {
            Some(href) => match resolve_link(&url, &href) {
                Some(next_url) => current = Some(next_url),
                None => break WorkflowState::Done,
            },
            None => break WorkflowState::Done,
        }
    };

    WorkflowOutcome {
        items,
        pages_fetched,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(WorkflowState::Blocked.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
        assert!(WorkflowState::Done.is_terminal());
    }

    #[test]
    fn test_active_states_not_terminal() {
        assert!(!WorkflowState::Fetching.is_terminal());
        assert!(!WorkflowState::Extracting.is_terminal());
        assert!(!WorkflowState::Paginating.is_terminal());
    }
}
