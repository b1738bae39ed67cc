//! User records stored on the `User` tab.
//!
//! The user tab carries four columns: id, username, password digest,
//! email. Lookups are case-insensitive on username; registration checks
//! for duplicates, assigns the next id, and appends a row.

use crate::error::{Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use slabdex_sheet::{RangeRef, Row, TabStore};
use std::fmt::Write as _;
use std::sync::Arc;

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Numeric id, unique within the tab.
    pub id: u32,
    /// Login name, unique case-insensitively.
    pub username: String,
    /// SHA-256 hex digest of the password.
    pub password: String,
    /// Contact email, unique case-insensitively.
    pub email: String,
}

/// The externally visible part of a [`User`]. The password digest is
/// never serialized into a response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublicUser {
    /// Numeric id.
    pub id: u32,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Fields required to register a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plaintext password; digested before storage.
    pub password: String,
}

/// SHA-256 hex digest used for stored passwords.
///
/// A local stand-in for the delegated identity provider; the seam that
/// matters is [`UserStore`], not the digest algorithm.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// User accounts stored on a sheet tab.
pub struct UserStore {
    store: Arc<dyn TabStore>,
    range: RangeRef,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("range", &self.range)
            .field("store", &"<dyn TabStore>")
            .finish()
    }
}

impl UserStore {
    /// Create a store reading and appending users within `range`.
    pub fn new(store: Arc<dyn TabStore>, range: RangeRef) -> Self {
        Self { store, range }
    }

    fn parse_row(row: &Row) -> Option<User> {
        let id = row.cell(0)?.trim().parse().ok()?;
        let username = row.cell(1)?.to_string();
        if username.is_empty() {
            return None;
        }
        Some(User {
            id,
            username,
            password: row.cell(2).unwrap_or_default().to_string(),
            email: row.cell(3).unwrap_or_default().to_string(),
        })
    }

    /// All parseable user rows, in tab order. Rows that do not parse as
    /// a user are skipped, not an error.
    async fn all(&self) -> Result<Vec<User>> {
        let rows = self.store.fetch_rows(&self.range).await?;
        Ok(rows.iter().filter_map(Self::parse_row).collect())
    }

    /// Look up a user by username, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] when the tab cannot be read.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let wanted = username.to_lowercase();
        Ok(self
            .all()
            .await?
            .into_iter()
            .find(|user| user.username.to_lowercase() == wanted))
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] when the tab cannot be read.
    pub async fn find_by_id(&self, id: u32) -> Result<Option<User>> {
        Ok(self.all().await?.into_iter().find(|user| user.id == id))
    }

    /// Register a new user.
    ///
    /// Duplicate usernames and emails are rejected (case-insensitively).
    /// The new id is one past the highest existing id.
    ///
    /// # Errors
    ///
    /// - [`Error::UserExists`] on a duplicate username or email
    /// - [`Error::DataUnavailable`] when the tab cannot be read or the
    ///   append fails
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let existing = self.all().await?;

        let username = new_user.username.to_lowercase();
        let email = new_user.email.to_lowercase();
        let taken = existing.iter().any(|user| {
            user.username.to_lowercase() == username
                || (!email.is_empty() && user.email.to_lowercase() == email)
        });
        if taken {
            return Err(Error::UserExists);
        }

        let id = existing.iter().map(|user| user.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: new_user.username,
            password: hash_password(&new_user.password),
            email: new_user.email,
        };

        let row: Row = [
            user.id.to_string(),
            user.username.clone(),
            user.password.clone(),
            user.email.clone(),
        ]
        .into_iter()
        .collect();
        self.store.append_row(self.range.tab(), row).await?;

        tracing::info!(id = user.id, username = %user.username, "registered user");
        Ok(user)
    }
}
