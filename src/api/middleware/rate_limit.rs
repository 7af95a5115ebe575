//! Per-IP rate limiting using the token bucket algorithm.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

use crate::config::Config;
use crate::error::AppError;

/// Creates the rate limiter for all API routes.
///
/// # Limits
///
/// Burst of `RATE_LIMIT_MAX` requests per client IP, refilled evenly over
/// `RATE_LIMIT_WINDOW_SECONDS` (100 requests / 15 minutes by default).
///
/// Requests exceeding the limit receive `429 Too Many Requests`; wrap the
/// router with [`envelope`] to render them as the standard error body.
///
/// # Key Extraction
///
/// Clients are keyed by the socket peer address, so the server must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Panics
///
/// Panics if the quota is zero; [`Config::validate`] rejects such values.
pub fn layer(
    config: &Config,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(config.rate_limit_replenish_interval())
            .burst_size(config.rate_limit_max)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rewrites `429` responses into the `{status, message}` error envelope,
/// keeping the limiter's `retry-after` / `x-ratelimit-*` headers.
pub async fn envelope(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut rewritten = AppError::too_many_requests("Too many requests from this IP").into_response();

    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }

    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};

    #[tokio::test]
    async fn test_envelope_rewrites_429() {
        let limited = Response::builder()
            .status(StatusCode::TOO_MANY_REQUESTS)
            .header(header::RETRY_AFTER, "9")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("Too Many Requests! Wait for 9s"))
            .unwrap();

        let response = envelope(limited).await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "9");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Too many requests from this IP");
    }

    #[tokio::test]
    async fn test_envelope_passes_other_responses() {
        let ok = Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("fine"))
            .unwrap();

        let response = envelope(ok).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
