use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level scrape job configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Job name, used in logs and summaries
    pub name: String,

    /// Fallback target when no explicit URL list is given
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Explicit target URLs; empty means scrape `base-url` alone
    #[serde(default)]
    pub urls: Vec<String>,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(rename = "rate-limit", default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub export: ExportConfig,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Token matched against robots.txt user-agent groups
    #[serde(rename = "user-agent-token", default = "default_user_agent_token")]
    pub user_agent_token: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Pagination behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Whether to follow next-page links at all
    pub enabled: bool,

    /// Selector resolving the next page's link
    #[serde(rename = "next-selector")]
    pub next_selector: Option<String>,

    /// Hard cap on pages fetched per target URL
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            next_selector: None,
            max_pages: 10,
        }
    }
}

/// Item and field selectors
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Extraction engine name (`css`)
    pub parser: String,

    /// Selector matching one element per record
    pub items: String,

    /// Field name to selector, evaluated within each item element
    pub fields: BTreeMap<String, String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            parser: "css".to_string(),
            items: String::new(),
            fields: BTreeMap::new(),
        }
    }
}

/// Default per-domain request budget
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Token refill rate per domain
    #[serde(rename = "requests-per-second")]
    pub requests_per_second: f64,

    /// Token bucket capacity per domain
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            burst: 5,
        }
    }
}

/// Retry and backoff tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per fetch, including the first
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in seconds
    #[serde(rename = "backoff-base")]
    pub backoff_base: f64,

    /// Backoff ceiling in seconds
    #[serde(rename = "backoff-max")]
    pub backoff_max: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: 1.0,
            backoff_max: 30.0,
        }
    }
}

/// Export sink selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Sink format name (`json`, `csv`, `sqlite`)
    pub format: String,

    /// Destination path
    pub output: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            output: "./output/results.json".to_string(),
        }
    }
}

fn default_user_agent_token() -> String {
    "*".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
