//! JWT claims model (transport-agnostic).

use serde::{Deserialize, Serialize};

use sweetshop_core::UserId;

/// Whether a token is usable as an access credential or only for refresh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// Claims carried by every token this service mints.
///
/// `iat`/`exp` are unix timestamps in seconds; the JWT library enforces the
/// expiry window on decode. The staff flag travels in the token so request
/// handling never needs a user lookup for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the account identifier.
    pub sub: UserId,

    /// Account username (diagnostic/display only, not an authz input).
    pub username: String,

    /// Elevated-privileges flag, read straight from the account at issue time.
    pub staff: bool,

    /// Access vs refresh.
    pub token_use: TokenUse,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiry (unix seconds).
    pub exp: i64,
}
