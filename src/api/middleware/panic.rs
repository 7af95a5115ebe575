//! Converts handler panics into a `500` error envelope.

use axum::body::Body;
use axum::http::Response;
use axum::response::IntoResponse;
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};
use tracing::error;

use crate::config::Environment;
use crate::error::AppError;

const GENERIC_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    expose_details: bool,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            (*s).to_string()
        } else {
            "unknown panic payload".to_string()
        };

        error!(panic = %detail, "Request handler panicked");

        let message = if self.expose_details {
            detail
        } else {
            GENERIC_MESSAGE.to_string()
        };

        AppError::internal(message).into_response()
    }
}

/// Panic details reach the client only outside production.
pub fn layer(environment: Environment) -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(PanicResponder {
        expose_details: !environment.is_production(),
    })
}
