//! Storage location configuration.
//!
//! Maps logical location names to `type:data` location strings:
//!
//! ```toml
//! [backends]
//! default = "fs:/var/lib/depot/files"
//! archive = "fs-readonly:/mnt/archive"
//! ```
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`depot.toml` shipped with the library)
//! 2. `~/.config/depot/depot.toml`
//! 3. `./depot.toml`

use config::{Config, File, FileFormat};
use depot_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Logical storage location names and their location strings.
///
/// Once a location has been used to store files it is expected to stay
/// configured for as long as anything references those files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Location name to `type:data` string
    #[serde(default)]
    backends: BTreeMap<String, String>,
}

impl StorageConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading storage configuration from file");
        let source = File::from(path.as_ref()).format(FileFormat::Toml);
        Self::build(Config::builder().add_source(source))
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has the wrong shape.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if any present source cannot be parsed.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        const DEFAULT_CONFIG: &str = include_str!("../../../depot.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/depot/depot.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("depot").required(false));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        debug!(locations = config.backends.len(), "Loaded storage configuration");
        Ok(config)
    }

    /// Location string configured for `name`.
    pub fn location(&self, name: &str) -> Option<&str> {
        self.backends.get(name).map(String::as_str)
    }

    /// Configure (or replace) a location.
    pub fn insert(&mut self, name: impl Into<String>, location: impl Into<String>) {
        self.backends.insert(name.into(), location.into());
    }

    /// Configured location names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    /// Number of configured locations.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Whether no locations are configured.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl<N, L> FromIterator<(N, L)> for StorageConfig
where
    N: Into<String>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, L)>>(iter: I) -> Self {
        let mut config = Self::default();
        for (name, location) in iter {
            config.insert(name, location);
        }
        config
    }
}
