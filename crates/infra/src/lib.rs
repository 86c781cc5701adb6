//! `sweetshop-infra` — persistence boundary.
//!
//! Store traits plus two interchangeable backends: an in-memory
//! implementation (dev/tests) and a Postgres implementation over sqlx.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod stores;

pub use error::StoreError;
pub use memory::{InMemorySweetStore, InMemoryUserStore};
pub use postgres::{PostgresSweetStore, PostgresUserStore, connect};
pub use stores::{NewUser, SweetStore, UserRecord, UserStore};
