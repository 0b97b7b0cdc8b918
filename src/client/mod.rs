//! Client Module
//!
//! HTTP execution, upload encoding, and rate limit tracking.

pub mod http;
pub mod multipart;
pub mod rate_limiter;

pub use http::{decode_response, HttpClient, Params, TOKEN_HEADER};
pub use multipart::escape_html;
pub use rate_limiter::{RateLimit, RateLimitTracker};
