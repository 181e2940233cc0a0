//! HTTP route handlers.
//!
//! Every response is JSON and marked `Cache-Control: no-store`, since each body
//! is computed per request. Unmatched paths and unsupported methods on known
//! paths both fall through to the same not-found handler, and panics inside
//! handlers are rendered as internal errors.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod info;

use axum::{middleware, routing::get, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::error::{not_found, panic_response};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    with_layers(routes().with_state(state))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(info::index).fallback(not_found))
        .route("/health", get(health::health).fallback(not_found))
        .fallback(not_found)
}

fn with_layers(router: Router) -> Router {
    router
        // Panics become the internal error shape instead of a dropped connection
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
