//! Token bucket implementation

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Mutable bucket state, guarded by one exclusive lock
///
/// Refill and debit happen in the same critical section so concurrent
/// `acquire()` calls serialize correctly.
struct BucketState {
    /// Currently available tokens, always in `0..=capacity`
    tokens: f64,

    /// Refill rate in tokens per second; mutable at any time
    rate: f64,

    /// When the bucket was last refilled
    last_refill: Instant,
}

/// Async token bucket rate limiter
///
/// A fresh bucket starts full, so the first `burst` acquisitions pass
/// without suspending. After that, each acquisition waits for capacity to
/// accrue at the configured rate.
pub struct TokenBucket {
    capacity: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Creates a bucket refilling at `rate` tokens/second with the given burst capacity
    pub fn new(rate: f64, burst: u32) -> Self {
        Self {
            capacity: burst as f64,
            state: Mutex::new(BucketState {
                tokens: burst as f64,
                rate,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Waits until a token is available, then consumes it
    ///
    /// Each pass refills from elapsed time, debits if at least one token is
    /// available, and otherwise sleeps for the time one token needs to
    /// accrue. The sleep is a lower bound: under contention another caller
    /// may win the token first, so the whole sequence retries.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(state.last_refill).as_secs_f64();
                state.tokens = (state.tokens + elapsed * state.rate).min(self.capacity);
                state.last_refill = now;

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - state.tokens) / state.rate)
            };
            tokio::time::sleep(wait).await;
        }
    }

    /// Changes the refill rate without resetting accumulated tokens
    ///
    /// A crawl-delay override discovered mid-run only affects how fast the
    /// bucket refills from now on.
    pub async fn set_rate(&self, rate: f64) {
        self.state.lock().await.rate = rate;
    }

    /// Returns the current refill rate in tokens per second
    pub async fn rate(&self) -> f64 {
        self.state.lock().await.rate
    }
}
