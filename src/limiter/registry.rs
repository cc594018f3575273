//! Per-domain bucket registry

use crate::limiter::TokenBucket;
use crate::url::authority;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

/// Manages one token bucket per domain
///
/// Buckets are created lazily with the registry defaults on first touch and
/// live for the rest of the run; there is no eviction. The registry is
/// shared by every concurrent workflow, so the map itself is guarded by a
/// lock that is held only long enough to clone out a bucket handle.
pub struct RateLimiter {
    default_rate: f64,
    default_burst: u32,
    buckets: Mutex<HashMap<String, Arc<TokenBucket>>>,
}

impl RateLimiter {
    /// Creates a registry with the given default rate (tokens/second) and burst
    pub fn new(default_rate: f64, default_burst: u32) -> Self {
        Self {
            default_rate,
            default_burst,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Gets or creates the bucket for the given URL's domain
    pub fn bucket(&self, url: &Url) -> Arc<TokenBucket> {
        let domain = authority(url).unwrap_or_default();
        self.bucket_for(&domain)
    }

    fn bucket_for(&self, domain: &str) -> Arc<TokenBucket> {
        let mut buckets = self.buckets.lock().unwrap();
        Arc::clone(buckets.entry(domain.to_string()).or_insert_with(|| {
            Arc::new(TokenBucket::new(self.default_rate, self.default_burst))
        }))
    }

    /// Acquires one token for the given URL's domain, suspending if needed
    pub async fn acquire(&self, url: &Url) {
        let bucket = self.bucket(url);
        bucket.acquire().await;
    }

    /// Overrides the rate for a specific domain
    ///
    /// An existing bucket keeps its accumulated tokens; a missing one is
    /// created with the new rate and the registry's default burst.
    pub async fn set_domain_rate(&self, domain: &str, rate: f64) {
        let bucket = {
            let mut buckets = self.buckets.lock().unwrap();
            if let Some(bucket) = buckets.get(domain) {
                Arc::clone(bucket)
            } else {
                let bucket = Arc::new(TokenBucket::new(rate, self.default_burst));
                buckets.insert(domain.to_string(), Arc::clone(&bucket));
                return;
            }
        };
        bucket.set_rate(rate).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_different_domains_do_not_block_each_other() {
        let limiter = RateLimiter::new(1.0, 1);
        let a = Url::parse("https://a.example.com/").unwrap();
        let b = Url::parse("https://b.example.com/").unwrap();

        let start = Instant::now();
        limiter.acquire(&a).await;
        limiter.acquire(&b).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_domain_shares_one_bucket() {
        let limiter = RateLimiter::new(1.0, 1);
        let page1 = Url::parse("https://example.com/page/1").unwrap();
        let page2 = Url::parse("https://example.com/page/2").unwrap();

        limiter.acquire(&page1).await;
        let start = Instant::now();
        limiter.acquire(&page2).await;
        assert!(start.elapsed().as_secs_f64() >= 0.99);
    }

    #[tokio::test(start_paused = true)]
    async fn test_port_is_part_of_the_domain_key() {
        let limiter = RateLimiter::new(1.0, 1);
        let a = Url::parse("http://localhost:8001/").unwrap();
        let b = Url::parse("http://localhost:8002/").unwrap();

        let start = Instant::now();
        limiter.acquire(&a).await;
        limiter.acquire(&b).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_domain_rate_on_existing_bucket() {
        let limiter = RateLimiter::new(1.0, 1);
        let url = Url::parse("https://example.com/").unwrap();

        limiter.acquire(&url).await;
        limiter.set_domain_rate("example.com", 100.0).await;

        let start = Instant::now();
        limiter.acquire(&url).await;
        assert!(start.elapsed().as_secs_f64() < 0.05);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_domain_rate_creates_bucket_with_default_burst() {
        let limiter = RateLimiter::new(1.0, 2);
        limiter.set_domain_rate("slow.example.com", 0.5).await;
        let url = Url::parse("https://slow.example.com/").unwrap();

        // Default burst of 2 passes immediately even at the slow rate
        let start = Instant::now();
        limiter.acquire(&url).await;
        limiter.acquire(&url).await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        let start = Instant::now();
        limiter.acquire(&url).await;
        assert!(start.elapsed().as_secs_f64() >= 1.99);
    }
}
