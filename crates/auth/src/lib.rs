//! `sweetshop-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! minting/verification, password hashing, and registration validation are
//! all expressed over plain values.

pub mod claims;
pub mod password;
pub mod register;
pub mod tokens;

pub use claims::{AccessClaims, TokenUse};
pub use password::{PasswordError, hash_password, verify_password};
pub use register::Registration;
pub use tokens::{TokenCodec, TokenError, TokenPair};
