//! In-process response caching.
//!
//! [`ResponseCache`] memoizes serialized response bodies by request signature
//! with per-entry expiry, lazy expiry on read and a periodic sweeper. The HTTP
//! interceptor that drives it lives in [`crate::api::middleware::response_cache`].

mod response_cache;

pub use response_cache::{CacheStats, ClearOutcome, ResponseCache};
