//! HS256 token minting and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use sweetshop_core::UserId;

use crate::claims::{AccessClaims, TokenUse};

const ACCESS_TTL_MINUTES: i64 = 30;
const REFRESH_TTL_DAYS: i64 = 1;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid or expired token")]
    Invalid,

    #[error("refresh token presented where an access token is required")]
    WrongTokenUse,
}

/// An access/refresh pair, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Mints and verifies the service's HS256 tokens.
///
/// Signature verification and expiry checks live here; callers only ever see
/// decoded [`AccessClaims`] or [`TokenError`].
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock drift to tolerate within a single service.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue an access/refresh pair for an authenticated account.
    pub fn issue_pair(
        &self,
        user_id: UserId,
        username: &str,
        staff: bool,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        let access = self.encode(
            user_id,
            username,
            staff,
            TokenUse::Access,
            now,
            Duration::minutes(ACCESS_TTL_MINUTES),
        )?;
        let refresh = self.encode(
            user_id,
            username,
            staff,
            TokenUse::Refresh,
            now,
            Duration::days(REFRESH_TTL_DAYS),
        )?;
        Ok(TokenPair { access, refresh })
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Only access tokens pass; a (valid) refresh token is rejected so it
    /// cannot be used to call protected endpoints directly.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.token_use != TokenUse::Access {
            return Err(TokenError::WrongTokenUse);
        }

        Ok(data.claims)
    }

    fn encode(
        &self,
        user_id: UserId,
        username: &str,
        staff: bool,
        token_use: TokenUse,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims {
            sub: user_id,
            username: username.to_string(),
            staff,
            token_use,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret")
    }

    #[test]
    fn issued_access_token_verifies() {
        let codec = codec();
        let pair = codec
            .issue_pair(UserId::from_i64(7), "alice", true, Utc::now())
            .unwrap();

        let claims = codec.verify_access(&pair.access).unwrap();
        assert_eq!(claims.sub, UserId::from_i64(7));
        assert_eq!(claims.username, "alice");
        assert!(claims.staff);
    }

    #[test]
    fn refresh_token_is_not_an_access_credential() {
        let codec = codec();
        let pair = codec
            .issue_pair(UserId::from_i64(7), "alice", false, Utc::now())
            .unwrap();

        let err = codec.verify_access(&pair.refresh).unwrap_err();
        assert!(matches!(err, TokenError::WrongTokenUse));
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let issued = Utc::now() - Duration::hours(2);
        let pair = codec
            .issue_pair(UserId::from_i64(7), "alice", false, issued)
            .unwrap();

        let err = codec.verify_access(&pair.access).unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let pair = TokenCodec::new(b"other-secret")
            .issue_pair(UserId::from_i64(7), "alice", false, Utc::now())
            .unwrap();

        assert!(codec().verify_access(&pair.access).is_err());
    }
}
