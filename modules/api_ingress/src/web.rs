use std::sync::Arc;

use axum::{http::Uri, response::Json, Extension};

use crate::request_id::XRequestId;
use modkit::{Problem, ProblemResponse};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn openapi_json(
    Extension(doc): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json((*doc).clone())
}

/// Problem body for paths no route matched, stamped with the request id.
pub async fn route_not_found(
    Extension(XRequestId(request_id)): Extension<XRequestId>,
    uri: Uri,
) -> ProblemResponse {
    Problem::new(
        axum::http::StatusCode::NOT_FOUND,
        "Not Found",
        format!("No route for {}", uri.path()),
    )
    .with_code("ROUTE_NOT_FOUND")
    .with_instance(uri.path())
    .with_request_id(request_id)
    .into()
}
