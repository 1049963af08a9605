//! Route tables and the assembled application router.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::{entity_routes, API_PREFIX};

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Operational and entity routes with request tracing, a per-request timeout
/// (408 when exceeded) and a body size limit.
pub fn app(state: AppState) -> Router {
    let timeout = state.config.request_timeout;
    let body_limit = state.config.body_limit;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
}
