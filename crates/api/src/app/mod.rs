//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store + token-codec wiring (in-memory or Postgres)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: AppServices) -> Router {
    let auth_state = middleware::AuthState {
        tokens: services.tokens.clone(),
    };
    let services = Arc::new(services);

    let public = Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::router());

    // Protected routes: bearer token required before any role check.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    public.merge(protected).layer(Extension(services))
}
