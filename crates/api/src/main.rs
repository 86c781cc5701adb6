use anyhow::Context;

use sweetshop_api::app::{self, services};
use sweetshop_auth::hash_password;
use sweetshop_infra::{NewUser, StoreError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sweetshop_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let app_services = match std::env::var("DATABASE_URL") {
        Ok(database_url) => services::postgres_services(&database_url, &jwt_secret)
            .await
            .context("failed to connect to database")?,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            services::in_memory_services(&jwt_secret)
        }
    };

    bootstrap_admin(&app_services).await;

    let app = app::build_app(app_services);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Provision a staff account from `ADMIN_USERNAME`/`ADMIN_PASSWORD` when set.
///
/// Registration only ever creates regular accounts, so this is the one way a
/// fresh deployment gets its first staff user. An already-existing username
/// is left untouched.
async fn bootstrap_admin(app_services: &services::AppServices) {
    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        return;
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "could not hash ADMIN_PASSWORD");
            return;
        }
    };

    match app_services
        .users
        .create(NewUser {
            username: username.clone(),
            email: std::env::var("ADMIN_EMAIL").unwrap_or_default(),
            password_hash,
            is_staff: true,
        })
        .await
    {
        Ok(_) => tracing::info!(%username, "staff account provisioned"),
        Err(StoreError::Duplicate) => {
            tracing::info!(%username, "staff account already exists");
        }
        Err(e) => tracing::error!(error = %e, "staff account provisioning failed"),
    }
}
