use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sweetshop_core::ValidationErrors;
use sweetshop_infra::StoreError;

/// Uniform `{"error": code, "message": ...}` body for non-validation errors.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 400 with the `{"field": ["message", ...]}` body validation failures carry.
pub fn validation_response(errors: ValidationErrors) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, axum::Json(errors)).into_response()
}

pub fn forbidden() -> axum::response::Response {
    json_error(
        StatusCode::FORBIDDEN,
        "forbidden",
        "You do not have permission to perform this action.",
    )
}

pub fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "not found")
}

/// Backend failures surface as an opaque 500; `Duplicate` is mapped to a
/// field-level validation error at each call site, never here.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store operation failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "storage backend error",
    )
}
