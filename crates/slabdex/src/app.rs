//! Application context wiring configuration to services.
//!
//! # Example
//!
//! ```no_run
//! use slabdex::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_config(Path::new("slabdex.yaml")).await?;
//!     // Dispatch handlers or run searches using app...
//!     Ok(())
//! }
//! ```

use crate::auth::TokenSigner;
use crate::config::SlabdexConfig;
use crate::error::{Error, Result};
use crate::search::SearchService;
use crate::users::UserStore;
use slabdex_sheet::{JsonlTabSource, RangeRef, TabStore};
use std::path::Path;
use std::sync::Arc;

/// Application context: the services every handler needs, wired to one
/// row source.
pub struct App {
    search: SearchService,
    users: UserStore,
    signer: TokenSigner,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("search", &self.search)
            .field("users", &self.users)
            .finish()
    }
}

impl App {
    /// Build an App from a loaded configuration and an explicit store.
    ///
    /// Tests pass a [`slabdex_sheet::MemorySource`] here; production
    /// wiring goes through [`App::from_config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when either configured range does not
    /// parse.
    pub fn from_parts(store: Arc<dyn TabStore>, config: &SlabdexConfig) -> Result<Self> {
        let data_range: RangeRef = config
            .data_range
            .parse()
            .map_err(|e: slabdex_sheet::Error| Error::Config(e.to_string()))?;
        let user_range: RangeRef = config
            .user_range
            .parse()
            .map_err(|e: slabdex_sheet::Error| Error::Config(e.to_string()))?;

        Ok(Self {
            search: SearchService::new(store.clone(), data_range),
            users: UserStore::new(store, user_range),
            signer: TokenSigner::new(config.auth.secret.clone(), config.auth.token_ttl_hours),
        })
    }

    /// Load configuration from `config_path` and wire the app to the
    /// configured snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be loaded or is
    /// invalid.
    pub async fn from_config(config_path: &Path) -> Result<Self> {
        let config = SlabdexConfig::load(config_path).await?;
        let store: Arc<dyn TabStore> = Arc::new(JsonlTabSource::new(&config.sheet_dir));
        Self::from_parts(store, &config)
    }

    /// The search pipeline.
    #[must_use]
    pub fn search(&self) -> &SearchService {
        &self.search
    }

    /// The user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// The token signer.
    #[must_use]
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabdex_sheet::MemorySource;

    #[test]
    fn malformed_configured_range_is_a_config_error() {
        let mut config = SlabdexConfig::new("sheets", "hush");
        config.data_range = "no-tab-separator".to_string();

        let err = App::from_parts(Arc::new(MemorySource::new()), &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
