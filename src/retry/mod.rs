//! Retry and backoff policy
//!
//! Pure functions deciding whether an HTTP status warrants a retry and how
//! long to wait before the next attempt.

use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Status codes that warrant another attempt
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Returns true if the status code should trigger a retry
///
/// Everything outside the fixed retryable set, including unlisted 4xx/5xx,
/// is treated as permanent.
pub fn is_retryable(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}

/// Computes the backoff delay in seconds for the given attempt
///
/// Exponential growth from `base` with up to one second of uniform jitter,
/// capped at `max`: `min(base * 2^attempt + U(0,1), max)`.
pub fn backoff_delay(attempt: u32, base: f64, max: f64) -> f64 {
    let jitter: f64 = rand::random();
    (base * 2f64.powi(attempt as i32) + jitter).min(max)
}

/// Extracts a Retry-After header value as seconds
///
/// Header lookup is case-insensitive. Values that do not parse as a number
/// of seconds yield None so the caller falls back to the computed backoff.
pub fn retry_after(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable(status), "{} should be retryable", status);
        }
    }

    #[test]
    fn test_non_retryable_statuses() {
        for status in [200, 301, 400, 401, 403, 404, 418, 501, 505] {
            assert!(!is_retryable(status), "{} should not be retryable", status);
        }
    }

    #[test]
    fn test_backoff_first_attempt_within_jitter_window() {
        for _ in 0..100 {
            let delay = backoff_delay(0, 1.0, 30.0);
            assert!((1.0..=2.0).contains(&delay), "got {}", delay);
        }
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        // Jitter is at most 1s, so the deterministic component dominates.
        let delay = backoff_delay(3, 1.0, 30.0);
        assert!(delay >= 8.0);
        assert!(delay <= 9.0);
    }

    #[test]
    fn test_backoff_capped_at_max() {
        for attempt in 0..20 {
            assert!(backoff_delay(attempt, 1.0, 30.0) <= 30.0);
        }
    }

    #[test]
    fn test_backoff_cap_below_base() {
        assert_eq!(backoff_delay(0, 10.0, 5.0), 5.0);
    }

    #[test]
    fn test_retry_after_integer_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("5"));
        assert_eq!(retry_after(&headers), Some(5.0));
    }

    #[test]
    fn test_retry_after_fractional_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("2.5"));
        assert_eq!(retry_after(&headers), Some(2.5));
    }

    #[test]
    fn test_retry_after_missing() {
        assert_eq!(retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn test_retry_after_malformed_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after(&headers), None);
    }

    #[test]
    fn test_retry_after_case_insensitive_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("3"));
        assert_eq!(retry_after(&headers), Some(3.0));
    }
}
