//! User-agent rotation pool

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Built-in pool of realistic browser identities
pub const USER_AGENTS: [&str; 12] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 Edg/123.0.0.0",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 OPR/109.0.0.0",
];

/// Deterministic round-robin pool of user-agent strings
///
/// The cursor advances on every `next_agent()` call and is never reset, so
/// successive requests cycle through the whole pool in order.
pub struct UserAgentRotator {
    pool: Vec<String>,
    cursor: AtomicUsize,
}

impl UserAgentRotator {
    /// Creates a rotator over the built-in pool
    pub fn new() -> Self {
        Self::with_pool(USER_AGENTS.iter().map(|ua| ua.to_string()).collect())
    }

    /// Creates a rotator over a custom pool
    ///
    /// An empty pool falls back to the built-in list.
    pub fn with_pool(pool: Vec<String>) -> Self {
        let pool = if pool.is_empty() {
            USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
        } else {
            pool
        };
        Self {
            pool,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Returns the next identity in round-robin order
    pub fn next_agent(&self) -> &str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.pool.len();
        &self.pool[index]
    }

    /// Samples a random identity without advancing the rotation cursor
    pub fn random_agent(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.pool.len());
        &self.pool[index]
    }

    /// Number of identities in the pool
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }
}

impl Default for UserAgentRotator {
    fn default() -> Self {
        Self::new()
    }
}
