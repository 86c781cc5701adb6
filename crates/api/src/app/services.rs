//! Infrastructure wiring for the API.

use std::sync::Arc;

use sweetshop_auth::TokenCodec;
use sweetshop_infra::{
    InMemorySweetStore, InMemoryUserStore, PostgresSweetStore, PostgresUserStore, StoreError,
    SweetStore, UserStore,
};

/// Shared handles the handlers pull out of request extensions.
pub struct AppServices {
    pub sweets: Arc<dyn SweetStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<TokenCodec>,
}

/// In-memory wiring: dev runs without a database, and the black-box tests.
pub fn in_memory_services(jwt_secret: &str) -> AppServices {
    AppServices {
        sweets: Arc::new(InMemorySweetStore::new()),
        users: Arc::new(InMemoryUserStore::new()),
        tokens: Arc::new(TokenCodec::new(jwt_secret.as_bytes())),
    }
}

/// Postgres wiring: connects a pool and runs migrations.
pub async fn postgres_services(
    database_url: &str,
    jwt_secret: &str,
) -> Result<AppServices, StoreError> {
    let pool = sweetshop_infra::connect(database_url).await?;

    Ok(AppServices {
        sweets: Arc::new(PostgresSweetStore::new(pool.clone())),
        users: Arc::new(PostgresUserStore::new(pool)),
        tokens: Arc::new(TokenCodec::new(jwt_secret.as_bytes())),
    })
}
