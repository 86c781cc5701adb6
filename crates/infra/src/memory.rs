//! In-memory store implementations (dev and tests).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use sweetshop_catalog::{Sweet, ValidSweet};
use sweetshop_core::{SweetId, UserId};

use crate::error::StoreError;
use crate::stores::{NewUser, SweetStore, UserRecord, UserStore};

#[derive(Debug, Default)]
struct SweetTable {
    next_id: i64,
    rows: BTreeMap<i64, Sweet>,
}

/// Mutex-guarded map with sequential id assignment.
///
/// Lock scope is a single operation, matching the one-row-per-mutation model
/// of the service; there is nothing to coordinate across calls.
#[derive(Debug, Default)]
pub struct InMemorySweetStore {
    inner: Mutex<SweetTable>,
}

impl InMemorySweetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SweetStore for InMemorySweetStore {
    async fn insert(&self, fields: ValidSweet) -> Result<Sweet, StoreError> {
        let mut table = self.inner.lock().expect("sweet table poisoned");

        if table.rows.values().any(|s| s.name == fields.name) {
            return Err(StoreError::Duplicate);
        }

        table.next_id += 1;
        let sweet = Sweet {
            id: SweetId::from_i64(table.next_id),
            name: fields.name,
            category: fields.category,
            price: fields.price,
            quantity: fields.quantity,
            stock_level: fields.stock_level,
            is_available: fields.is_available,
        };
        table.rows.insert(sweet.id.as_i64(), sweet.clone());
        Ok(sweet)
    }

    async fn get(&self, id: SweetId) -> Result<Option<Sweet>, StoreError> {
        let table = self.inner.lock().expect("sweet table poisoned");
        Ok(table.rows.get(&id.as_i64()).cloned())
    }

    async fn list(&self) -> Result<Vec<Sweet>, StoreError> {
        let table = self.inner.lock().expect("sweet table poisoned");
        let mut records: Vec<Sweet> = table.rows.values().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    async fn replace(&self, id: SweetId, fields: ValidSweet) -> Result<Option<Sweet>, StoreError> {
        let mut table = self.inner.lock().expect("sweet table poisoned");

        if !table.rows.contains_key(&id.as_i64()) {
            return Ok(None);
        }
        let conflict = table
            .rows
            .values()
            .any(|s| s.id != id && s.name == fields.name);
        if conflict {
            return Err(StoreError::Duplicate);
        }

        let sweet = Sweet {
            id,
            name: fields.name,
            category: fields.category,
            price: fields.price,
            quantity: fields.quantity,
            stock_level: fields.stock_level,
            is_available: fields.is_available,
        };
        table.rows.insert(id.as_i64(), sweet.clone());
        Ok(Some(sweet))
    }

    async fn delete(&self, id: SweetId) -> Result<bool, StoreError> {
        let mut table = self.inner.lock().expect("sweet table poisoned");
        Ok(table.rows.remove(&id.as_i64()).is_some())
    }
}

#[derive(Debug, Default)]
struct UserTable {
    next_id: i64,
    rows: BTreeMap<i64, UserRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let mut table = self.inner.lock().expect("user table poisoned");

        if table.rows.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Duplicate);
        }

        table.next_id += 1;
        let record = UserRecord {
            id: UserId::from_i64(table.next_id),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_staff: new_user.is_staff,
        };
        table.rows.insert(record.id.as_i64(), record.clone());
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let table = self.inner.lock().expect("user table poisoned");
        Ok(table.rows.values().find(|u| u.username == username).cloned())
    }
}
