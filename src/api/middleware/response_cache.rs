//! Response cache interceptor.
//!
//! Wraps GET routes so repeated identical requests are answered from
//! [`ResponseCache`] without running the handler. Only `200 OK` JSON
//! responses with a known body size up to 1 MiB are stored; anything else
//! passes through untouched. Every response that passes through a cacheable
//! path is tagged with `X-Cache: HIT|MISS` and
//! `Cache-Control: public, max-age=<duration>`.

use axum::{
    body::{Body, HttpBody},
    extract::{OriginalUri, Request},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, error};

use crate::error::AppError;
use crate::infrastructure::cache::ResponseCache;

/// Name of the cache status header.
pub const X_CACHE: &str = "x-cache";

/// Bodies larger than this, or of unknown size, are never buffered for caching.
const MAX_CACHED_BODY_BYTES: usize = 1024 * 1024;

/// Returns a layer caching matching responses in `cache` for `duration` seconds.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/{id}", get(addiction_handler))
///     .route_layer(response_cache::cache_for(cache.clone(), 300));
/// ```
pub fn cache_for(cache: Arc<ResponseCache>, duration: u64) -> ResponseCacheLayer {
    ResponseCacheLayer { cache, duration }
}

#[derive(Clone)]
pub struct ResponseCacheLayer {
    cache: Arc<ResponseCache>,
    duration: u64,
}

impl<S> Layer<S> for ResponseCacheLayer {
    type Service = ResponseCacheService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ResponseCacheService {
            inner,
            cache: self.cache.clone(),
            duration: self.duration,
        }
    }
}

#[derive(Clone)]
pub struct ResponseCacheService<S> {
    inner: S,
    cache: Arc<ResponseCache>,
    duration: u64,
}

impl<S> Service<Request> for ResponseCacheService<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Keep the service that was driven to readiness; leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let cache = self.cache.clone();
        let duration = self.duration;

        Box::pin(async move {
            if req.method() != Method::GET {
                return inner.call(req).await;
            }

            let key = cache_key(&req);

            if let Some(body) = cache.get(&key) {
                debug!(%key, "Response cache HIT");
                return Ok(cached_response(body, duration));
            }

            debug!(%key, "Response cache MISS");
            let response = inner.call(req).await?;

            Ok(store_response(&cache, key, response, duration).await)
        })
    }
}

/// `"{METHOD}:{path?query}"` using the URI as received, before any `nest` stripping.
fn cache_key(req: &Request) -> String {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| req.uri());

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    ResponseCache::key_for(req.method().as_str(), path_and_query)
}

fn cache_control(duration: u64) -> HeaderValue {
    HeaderValue::from_str(&format!("public, max-age={duration}"))
        .unwrap_or_else(|_| HeaderValue::from_static("public"))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn cached_response(body: Bytes, duration: u64) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(X_CACHE, "HIT")
        .header(header::CACHE_CONTROL, cache_control(duration))
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

async fn store_response(
    cache: &ResponseCache,
    key: String,
    response: Response,
    duration: u64,
) -> Response {
    if response.status() != StatusCode::OK || !is_json(&response) {
        return response;
    }

    let cacheable_size = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_CACHED_BODY_BYTES as u64);
    if !cacheable_size {
        debug!(%key, "Response body too large or unsized, not caching");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%key, error = %e, "Failed to buffer response body for caching");
            return AppError::internal("Failed to read response body").into_response();
        }
    };

    cache.set(key, bytes.clone(), duration);

    parts.headers.insert(X_CACHE, HeaderValue::from_static("MISS"));
    parts
        .headers
        .insert(header::CACHE_CONTROL, cache_control(duration));

    Response::from_parts(parts, Body::from(bytes))
}
