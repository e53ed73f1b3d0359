//! RON configuration.
//!
//! ```ron
//! (
//!     params: include_terminal,
//!     reserved_suffixes: [".git", ".hg"],
//!     backend: Catalog((
//!         entities: ["books", "tags", "author"],
//!         record_entity: "books",
//!         name_field: "title",
//!         records: [
//!             { "title": "Storm Front", "author": "Jim Butcher", "tags": ["Fantasy"] },
//!         ],
//!     )),
//! )
//! ```
//!
//! Every field is optional; the default is the sample book catalog.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::adapter::{FsOptions, GIT_SUFFIX, SearchFs};
use crate::backends::{CatalogConfig, CatalogSearcher, FixedSearcher};
use crate::route::ParamPolicy;
use crate::searcher::Searcher;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which backend to mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendConfig {
    /// Same names for every listing.
    Fixed {
        #[serde(default)]
        entities: Vec<String>,
        names: Vec<String>,
    },
    /// In-memory record catalog.
    Catalog(CatalogConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Catalog(CatalogConfig::sample())
    }
}

impl BackendConfig {
    /// Build the configured backend.
    pub fn build(&self) -> Box<dyn Searcher> {
        match self {
            BackendConfig::Fixed { entities, names } => {
                Box::new(FixedSearcher::new(entities.clone(), names.clone()))
            }
            BackendConfig::Catalog(catalog) => Box::new(CatalogSearcher::new(catalog.clone())),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let BackendConfig::Catalog(catalog) = self else {
            return Ok(());
        };
        if !catalog.entities.contains(&catalog.record_entity) {
            return Err(ConfigError::Invalid(format!(
                "record_entity {:?} is not one of the entities",
                catalog.record_entity
            )));
        }
        if let Some(entity) = catalog
            .fields
            .keys()
            .find(|entity| !catalog.entities.contains(entity))
        {
            return Err(ConfigError::Invalid(format!(
                "field override for unknown entity {entity:?}"
            )));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFsConfig {
    pub params: ParamPolicy,
    pub reserved_suffixes: Vec<String>,
    pub backend: BackendConfig,
}

impl Default for SearchFsConfig {
    fn default() -> Self {
        Self {
            params: ParamPolicy::default(),
            reserved_suffixes: vec![GIT_SUFFIX.to_string()],
            backend: BackendConfig::default(),
        }
    }
}

impl SearchFsConfig {
    /// Parse and validate a RON document.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: SearchFsConfig = ron::from_str(text)?;
        config.backend.validate()?;
        Ok(config)
    }

    /// Read and parse a RON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_ron(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn fs_options(&self) -> FsOptions {
        FsOptions {
            params: self.params,
            reserved_suffixes: self.reserved_suffixes.clone(),
        }
    }

    /// Build the adapter for this configuration.
    pub fn build(&self) -> SearchFs<Box<dyn Searcher>> {
        SearchFs::new(self.backend.build()).with_options(self.fs_options())
    }
}
