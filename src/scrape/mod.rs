//! Scrape orchestration
//!
//! Drives a run end to end: robots prefetch per domain, one concurrent
//! pagination workflow per target URL, aggregation in launch order, and a
//! single export of the combined records.

mod orchestrator;
mod workflow;

pub use orchestrator::{scrape, scrape_with_progress};
pub use workflow::{WorkflowOutcome, WorkflowState};

pub use crate::extract::Record;

use std::time::Duration;

/// Aggregate outcome of one scrape run
///
/// Built incrementally while workflows complete; a run always produces one
/// of these, with failures reflected in `errors` and partial data kept.
#[derive(Debug, Default)]
pub struct ScrapeResult {
    /// Pages fetched successfully across all pagination chains
    pub urls_scraped: usize,

    /// Total records extracted
    pub items_found: usize,

    /// Failed workflows (fetch failures and unexpected task errors)
    pub errors: usize,

    /// Wall-clock time from start to completion
    pub duration: Duration,

    /// All extracted records, in workflow launch order
    pub records: Vec<Record>,
}

/// Optional observer notified as pages complete
///
/// Implementations must be cheap and non-blocking; the sink is called from
/// inside the per-URL workflows.
pub trait ProgressSink: Send + Sync {
    /// Called after each successfully fetched and extracted page
    fn on_page_fetched(&self, url: &str, item_count: usize);
}
