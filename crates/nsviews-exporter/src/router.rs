//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/v1/views", get(api::list_views))
        .route("/v1/namespaces", get(api::list_namespaces))
        .route("/v1/namespaces/:namespace/views", get(api::namespace_views))
        .with_state(state)
}
