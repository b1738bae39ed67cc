//! Token issuance and verification.
//!
//! Stands in for the delegated identity provider. A token is
//! `id.username.expiry.signature`, where the signature is a SHA-256 hex
//! digest over the shared secret and the claims. Verification
//! recomputes the signature and checks the expiry; there is no session
//! state to revoke, tokens simply lapse.

use crate::error::{Error, Result};
use crate::users::{User, UserStore, hash_password};
use chrono::{DateTime, TimeDelta, Utc};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Id of the authenticated user.
    pub user_id: u32,
    /// Username of the authenticated user.
    pub username: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    secret: String,
    ttl: TimeDelta,
}

impl TokenSigner {
    /// Create a signer with the given shared secret and token lifetime.
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: TimeDelta::hours(ttl_hours),
        }
    }

    fn signature(&self, user_id: u32, username: &str, expires_at: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b"\x00");
        hasher.update(user_id.to_string().as_bytes());
        hasher.update(b"\x00");
        hasher.update(username.as_bytes());
        hasher.update(b"\x00");
        hasher.update(expires_at.to_string().as_bytes());
        let digest = hasher.finalize();

        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }

    /// Issue a token for `user`, expiring one lifetime from now.
    #[must_use]
    pub fn issue(&self, user: &User) -> String {
        let expires_at = (Utc::now() + self.ttl).timestamp();
        let signature = self.signature(user.id, &user.username, expires_at);
        format!("{}.{}.{}.{}", user.id, user.username, expires_at, signature)
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] for tokens that are structurally
    /// invalid, carry a bad signature, or have expired.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let invalid = || Error::Unauthorized("Invalid token".to_string());

        // Split from the right so usernames containing dots survive.
        let (rest, signature) = token.rsplit_once('.').ok_or_else(invalid)?;
        let (rest, expiry) = rest.rsplit_once('.').ok_or_else(invalid)?;
        let (user_id, username) = rest.split_once('.').ok_or_else(invalid)?;

        let user_id: u32 = user_id.parse().map_err(|_| invalid())?;
        let expires_at: i64 = expiry.parse().map_err(|_| invalid())?;

        if self.signature(user_id, username, expires_at) != signature {
            return Err(invalid());
        }
        let expires_at = DateTime::from_timestamp(expires_at, 0).ok_or_else(invalid)?;
        if expires_at <= Utc::now() {
            return Err(Error::Unauthorized("Token expired".to_string()));
        }

        Ok(Claims {
            user_id,
            username: username.to_string(),
            expires_at,
        })
    }

    /// Check a username/password pair and issue a token on success.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to
    /// the caller.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCredentials`] when the pair does not match
    /// - [`Error::DataUnavailable`] when the user tab cannot be read
    pub async fn authenticate(
        &self,
        users: &UserStore,
        username: &str,
        password: &str,
    ) -> Result<(String, User)> {
        let user = users
            .find_by_username(username)
            .await?
            .ok_or(Error::InvalidCredentials)?;
        if hash_password(password) != user.password {
            tracing::debug!(username, "password mismatch");
            return Err(Error::InvalidCredentials);
        }
        Ok((self.issue(&user), user))
    }
}
