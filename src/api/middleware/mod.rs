//! HTTP middleware for request processing and protection.
//!
//! Provides response caching, rate limiting, security headers, panic
//! recovery and observability middleware.

pub mod panic;
pub mod rate_limit;
pub mod response_cache;
pub mod security;
pub mod tracing;
