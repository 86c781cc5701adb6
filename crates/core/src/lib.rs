//! `sweetshop-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod price;

pub use error::{DomainError, DomainResult, ValidationErrors};
pub use id::{SweetId, UserId};
pub use price::Price;
