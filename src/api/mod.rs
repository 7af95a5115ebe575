//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into catalog and content lookups and formats
//! responses in the `{status, data}` / `{status, message}` envelopes.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies and query parameters
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Response caching, rate limiting, security and tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
