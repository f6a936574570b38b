//! Turning logical location names into storage backends.

use crate::{BackendRegistry, Storage, StorageConfig, backends};
use depot_error::{ConfigError, DepotResult};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Split a location string into backend type and data at the first `:`.
///
/// Only the first colon separates; the data may contain more (URLs, for instance).
///
/// # Errors
///
/// Returns an error if there is no colon or the type is empty.
///
/// # Example
///
/// ```
/// use depot_storage::parse_location;
///
/// let (kind, data) = parse_location("web:url=https://files.example.org").unwrap();
/// assert_eq!(kind, "web");
/// assert_eq!(data, "url=https://files.example.org");
/// ```
pub fn parse_location(location: &str) -> Result<(&str, &str), ConfigError> {
    match location.split_once(':') {
        Some((kind, data)) if !kind.is_empty() => Ok((kind, data)),
        _ => Err(ConfigError::new(format!(
            "Invalid storage location '{}': expected <type>:<data>",
            location
        ))),
    }
}

/// Resolves logical location names through configuration and a backend registry.
///
/// Instances are constructed on every call; callers that resolve the same
/// name repeatedly may cache the returned `Arc`.
#[derive(Debug, Clone)]
pub struct StorageResolver<'r> {
    config: StorageConfig,
    registry: &'r BackendRegistry,
}

impl<'r> StorageResolver<'r> {
    /// Resolve against an explicit registry.
    pub fn new(config: StorageConfig, registry: &'r BackendRegistry) -> Self {
        Self { config, registry }
    }

    /// The location table in use.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// The registry in use.
    pub fn registry(&self) -> &BackendRegistry {
        self.registry
    }

    /// Construct the backend configured for `name`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is not configured, the
    /// location string is malformed or names an unknown backend type, or the
    /// backend rejects its data.
    #[instrument(skip(self))]
    pub fn resolve(&self, name: &str) -> DepotResult<Arc<dyn Storage>> {
        let location = self
            .config
            .location(name)
            .ok_or_else(|| ConfigError::new(format!("Storage backend does not exist: {}", name)))?;
        let (kind, data) = parse_location(location)?;
        let descriptor = self.registry.get(kind).ok_or_else(|| {
            ConfigError::new(format!(
                "Storage backend {} has invalid type {}",
                name, kind
            ))
        })?;

        let storage = descriptor.build(data)?;
        debug!(backend = kind, storage = %storage, "Resolved storage backend");
        Ok(storage)
    }

    /// Resolve every configured location, failing on the first bad one.
    ///
    /// Meant as a startup self-check.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn check(&self) -> DepotResult<()> {
        for name in self.config.names() {
            self.resolve(name)?;
        }
        Ok(())
    }
}

impl StorageResolver<'static> {
    /// Resolve against the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the process-wide registry could not be built.
    pub fn from_config(config: StorageConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config, backends()?))
    }
}

/// Resolve `name` using the loaded configuration and the process-wide registry.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or resolution fails.
pub fn get_storage(name: &str) -> DepotResult<Arc<dyn Storage>> {
    StorageResolver::from_config(StorageConfig::load()?)?.resolve(name)
}
