//! Configuration management for slabdex.
//!
//! Configuration lives in a YAML file (`slabdex.yaml` by default) and
//! names the snapshot directory, the two sheet ranges, and the auth
//! settings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "slabdex.yaml";

/// Default range for the inventory data tab: 23 columns, header skipped.
pub const DEFAULT_DATA_RANGE: &str = "Data!A2:W";

/// Default range for the user tab.
///
/// Starts at row 1: a header row, if present, fails to parse as a user
/// and is skipped, so nothing is lost by including it.
pub const DEFAULT_USER_RANGE: &str = "User!A1:D";

/// Configuration file structure for slabdex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlabdexConfig {
    /// Directory holding one `<Tab>.jsonl` snapshot per sheet tab.
    #[serde(rename = "sheet-dir")]
    pub sheet_dir: PathBuf,

    /// Range of the inventory data tab.
    #[serde(rename = "data-range", default = "default_data_range")]
    pub data_range: String,

    /// Range of the user tab.
    #[serde(rename = "user-range", default = "default_user_range")]
    pub user_range: String,

    /// Authentication settings.
    pub auth: AuthConfig,
}

/// Authentication configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Shared secret used to sign bearer tokens.
    pub secret: String,

    /// Token lifetime in hours.
    #[serde(rename = "token-ttl-hours", default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_data_range() -> String {
    DEFAULT_DATA_RANGE.to_string()
}

fn default_user_range() -> String {
    DEFAULT_USER_RANGE.to_string()
}

fn default_token_ttl_hours() -> i64 {
    crate::auth::DEFAULT_TOKEN_TTL_HOURS
}

impl SlabdexConfig {
    /// Create a configuration with defaults for the given snapshot
    /// directory and token secret.
    pub fn new(sheet_dir: impl Into<PathBuf>, secret: impl Into<String>) -> Self {
        Self {
            sheet_dir: sheet_dir.into(),
            data_range: default_data_range(),
            user_range: default_user_range(),
            auth: AuthConfig {
                secret: secret.into(),
                token_ttl_hours: default_token_ttl_hours(),
            },
        }
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Config`] when it does not parse or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when serialization fails and
    /// [`Error::Io`] when the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.auth.secret.trim().is_empty() {
            return Err(Error::Config("auth.secret must not be empty".to_string()));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(Error::Config(
                "auth.token-ttl-hours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
