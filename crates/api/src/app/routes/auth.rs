//! Registration and login.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use sweetshop_auth::{hash_password, verify_password, Registration};
use sweetshop_core::ValidationErrors;
use sweetshop_infra::{NewUser, StoreError};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// POST /auth/register — open to anyone; accounts start without staff
/// privileges. Staff accounts are provisioned operationally (see `main.rs`).
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Registration>,
) -> axum::response::Response {
    let valid = match body.validate() {
        Ok(valid) => valid,
        Err(validation_errors) => return errors::validation_response(validation_errors),
    };

    let password_hash = match hash_password(&valid.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "hash_error",
                "could not process password",
            );
        }
    };

    let created = services
        .users
        .create(NewUser {
            username: valid.username,
            email: valid.email,
            password_hash,
            is_staff: false,
        })
        .await;

    match created {
        Ok(user) => (
            StatusCode::CREATED,
            Json(dto::RegisteredResponse {
                username: user.username,
                email: user.email,
            }),
        )
            .into_response(),
        Err(StoreError::Duplicate) => errors::validation_response(ValidationErrors::single(
            "username",
            "A user with that username already exists.",
        )),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /auth/login — verifies credentials and mints the token pair.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let user = match services.users.find_by_username(&body.username).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid_credentials(),
        Err(e) => return errors::store_error_to_response(e),
    };

    match verify_password(&user.password_hash, &body.password) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(e) => {
            tracing::error!(error = %e, username = %user.username, "stored hash unreadable");
            return invalid_credentials();
        }
    }

    let pair = match services
        .tokens
        .issue_pair(user.id, &user.username, user.is_staff, Utc::now())
    {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "token minting failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "could not issue tokens",
            );
        }
    };

    Json(dto::TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    })
    .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "No active account found with the given credentials",
    )
}
