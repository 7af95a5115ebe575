//! Data Transfer Objects for API responses.
//!
//! Successful responses use `{"status":"success",...}`; errors are rendered
//! by [`crate::error::AppError`].

pub mod addiction;
pub mod cache;
pub mod envelope;
pub mod health;

pub use envelope::ApiResponse;
