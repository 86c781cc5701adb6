//! Store traits and account records.

use async_trait::async_trait;

use sweetshop_catalog::{Sweet, ValidSweet};
use sweetshop_core::{SweetId, UserId};

use crate::error::StoreError;

/// Persistence contract for sweet inventory records.
///
/// Implementations assign ids, enforce name uniqueness (reported as
/// [`StoreError::Duplicate`]) and return listings in ascending name order —
/// the record set's default order, which every read path relies on.
#[async_trait]
pub trait SweetStore: Send + Sync {
    async fn insert(&self, fields: ValidSweet) -> Result<Sweet, StoreError>;

    async fn get(&self, id: SweetId) -> Result<Option<Sweet>, StoreError>;

    /// All records, ascending by name.
    async fn list(&self) -> Result<Vec<Sweet>, StoreError>;

    /// Full replace of all mutable fields. `Ok(None)` when the id is unknown.
    async fn replace(&self, id: SweetId, fields: ValidSweet) -> Result<Option<Sweet>, StoreError>;

    /// `Ok(true)` when a record was removed.
    async fn delete(&self, id: SweetId) -> Result<bool, StoreError>;
}

/// A stored user account.
///
/// Owned by the auth collaborator conceptually; this system only creates
/// accounts at registration and reads the staff flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
}

/// Account fields for registration. The password arrives already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
}

/// Persistence contract for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create an account. Username collisions are [`StoreError::Duplicate`].
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;
}
