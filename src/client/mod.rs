//! HTTP fetching
//!
//! This module contains the fetch client and its user-agent rotation pool.
//! A fetch composes rate-limit acquisition, header construction, the
//! transport call, and the retry/backoff policy.

mod fetcher;
mod useragent;

pub use fetcher::{FetchClient, FetchResult};
pub use useragent::{UserAgentRotator, USER_AGENTS};
