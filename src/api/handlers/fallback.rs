//! Catch-all handler for unknown routes.

use crate::error::AppError;

/// Returns 404 for any unmatched path.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("API endpoint not found")
}
