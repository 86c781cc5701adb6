use axum::{routing::get, Router};

pub mod admin;
pub mod auth;
pub mod sweets;
pub mod system;

/// Router for all token-protected endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .nest("/sweets", sweets::router())
        .route("/report/export_csv", get(sweets::export_csv))
        .nest("/admin", admin::router())
}
