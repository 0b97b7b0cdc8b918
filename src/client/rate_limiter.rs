//! Rate Limit Tracking
//!
//! Keeps the most recent rate limit snapshot reported by the API.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::header::HeaderMap;

/// Total quota header
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Remaining quota header
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Reset timestamp header (seconds since epoch)
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Point-in-time rate limit counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Total requests allowed in the current window
    pub limit: i64,

    /// Requests left in the current window
    pub remaining: i64,

    /// When the window resets, in seconds since the Unix epoch
    pub reset_time: i64,
}

impl RateLimit {
    /// Build a snapshot from response headers.
    ///
    /// Missing or non-integer values become zero.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_int(headers, LIMIT_HEADER),
            remaining: header_int(headers, REMAINING_HEADER),
            reset_time: header_int(headers, RESET_HEADER),
        }
    }

    /// Reset time as a UTC timestamp
    pub fn reset_date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset_time, 0)
    }
}

fn header_int(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Holds the latest snapshot. Each update replaces the previous one.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    latest: RwLock<Option<RateLimit>>,
}

impl RateLimitTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the snapshot carried by a response, or a zero snapshot when the
    /// request never produced one.
    pub fn update_from_response(&self, headers: Option<&HeaderMap>) -> RateLimit {
        let snapshot = headers.map(RateLimit::from_headers).unwrap_or_default();
        *self.latest.write() = Some(snapshot);

        tracing::debug!(
            limit = snapshot.limit,
            remaining = snapshot.remaining,
            reset_time = snapshot.reset_time,
            "rate limit updated"
        );

        snapshot
    }

    /// The last stored snapshot, if any request has been executed
    pub fn latest(&self) -> Option<RateLimit> {
        *self.latest.read()
    }
}
