//! Kumoweb: a polite, config-driven web scraper
//!
//! This crate fetches web pages under per-domain politeness constraints
//! (token-bucket rate limits, robots.txt compliance), follows pagination
//! links, and hands extracted records to an export sink.

pub mod client;
pub mod config;
pub mod export;
pub mod extract;
pub mod limiter;
pub mod retry;
pub mod robots;
pub mod scrape;
pub mod url;

use thiserror::Error;

/// Main error type for kumoweb operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch client not connected. Call connect() before fetch()")]
    ClientNotConnected,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while writing scraped records to a sink
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for kumoweb operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{FetchClient, FetchResult, UserAgentRotator};
pub use config::ScrapeConfig;
pub use crate::url::authority;
pub use limiter::RateLimiter;
pub use robots::RobotsCache;
pub use scrape::{scrape, ProgressSink, Record, ScrapeResult};
