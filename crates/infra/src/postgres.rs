//! Postgres-backed stores over sqlx.
//!
//! Uniqueness lives on database constraints here; violations surface as
//! [`StoreError::Duplicate`] via the sqlx error mapping. Listings use
//! `ORDER BY name` so the default record order matches the in-memory store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use sweetshop_catalog::{Category, Sweet, ValidSweet};
use sweetshop_core::{Price, SweetId, UserId};

use crate::error::StoreError;
use crate::stores::{NewUser, SweetStore, UserRecord, UserStore};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Connect a pool and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!("database schema up to date");

    Ok(pool)
}

pub struct PostgresSweetStore {
    pool: PgPool,
}

impl PostgresSweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SWEET_COLUMNS: &str = "id, name, category, price, quantity, stock_level, is_available";

fn row_to_sweet(row: &PgRow) -> Result<Sweet, StoreError> {
    let category_code: String = row.try_get("category")?;
    let category = category_code
        .parse::<Category>()
        .map_err(|()| StoreError::Backend(format!("unknown stored category {category_code:?}")))?;

    let amount: Decimal = row.try_get("price")?;
    let price =
        Price::new(amount).map_err(|e| StoreError::Backend(format!("stored price: {e}")))?;

    Ok(Sweet {
        id: SweetId::from_i64(row.try_get("id")?),
        name: row.try_get("name")?,
        category,
        price,
        quantity: row.try_get("quantity")?,
        stock_level: row.try_get("stock_level")?,
        is_available: row.try_get("is_available")?,
    })
}

#[async_trait]
impl SweetStore for PostgresSweetStore {
    async fn insert(&self, fields: ValidSweet) -> Result<Sweet, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO sweets (name, category, price, quantity, stock_level, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {SWEET_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fields.category.as_str())
        .bind(fields.price.as_decimal())
        .bind(fields.quantity)
        .bind(fields.stock_level)
        .bind(fields.is_available)
        .fetch_one(&self.pool)
        .await?;

        row_to_sweet(&row)
    }

    async fn get(&self, id: SweetId) -> Result<Option<Sweet>, StoreError> {
        let row = sqlx::query(&format!("SELECT {SWEET_COLUMNS} FROM sweets WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_sweet).transpose()
    }

    async fn list(&self) -> Result<Vec<Sweet>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SWEET_COLUMNS} FROM sweets ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_sweet).collect()
    }

    async fn replace(&self, id: SweetId, fields: ValidSweet) -> Result<Option<Sweet>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE sweets SET name = $2, category = $3, price = $4, quantity = $5, \
             stock_level = $6, is_available = $7 WHERE id = $1 RETURNING {SWEET_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(&fields.name)
        .bind(fields.category.as_str())
        .bind(fields.price.as_decimal())
        .bind(fields.quantity)
        .bind(fields.stock_level)
        .bind(fields.is_available)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_sweet).transpose()
    }

    async fn delete(&self, id: SweetId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        id: UserId::from_i64(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        is_staff: row.try_get("is_staff")?,
    })
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let row = sqlx::query(
            "INSERT INTO accounts (username, email, password_hash, is_staff) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, username, email, password_hash, is_staff",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.is_staff)
        .fetch_one(&self.pool)
        .await?;

        row_to_user(&row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, is_staff \
             FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }
}
