use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use nsviews_core::{ErrorCode, ViewDescriptor};

use crate::app_state::AppState;

#[derive(Serialize)]
struct ViewsBody<'a> {
    views: Vec<&'a ViewDescriptor>,
}

#[derive(Serialize)]
struct NamespaceViewsBody<'a> {
    namespace: &'a str,
    views: Vec<&'a ViewDescriptor>,
}

fn error_response(status: StatusCode, code: ErrorCode, msg: &str) -> Response {
    (status, Json(json!({ "code": code.as_str(), "msg": msg }))).into_response()
}

/// `GET /v1/views`: every registered view, sorted by name.
pub async fn list_views(State(state): State<AppState>) -> Response {
    let all = state.registry().all_views();
    let mut views: Vec<&ViewDescriptor> = all.iter().map(|v| &**v).collect();
    views.sort_by(|a, b| a.name.cmp(&b.name));
    Json(ViewsBody { views }).into_response()
}

/// `GET /v1/namespaces`
pub async fn list_namespaces(State(state): State<AppState>) -> Response {
    Json(json!({ "namespaces": state.registry().namespaces() })).into_response()
}

/// `GET /v1/namespaces/:namespace/views`: views in registration order, or 404.
pub async fn namespace_views(State(state): State<AppState>, Path(namespace): Path<String>) -> Response {
    match state.registry().lookup_by_namespace(&namespace) {
        Ok(views) => Json(NamespaceViewsBody {
            namespace: &namespace,
            views: views.iter().map(|v| &**v).collect(),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::NOT_FOUND, e.code(), &e.to_string()),
    }
}
