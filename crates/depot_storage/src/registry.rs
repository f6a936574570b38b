//! Registry of storage backend types.
//!
//! Every [`BackendProvider`] contributes zero or more [`BackendDescriptor`]s.
//! The registry collects them once and refuses duplicate type names, so a
//! misconfigured deployment fails at startup rather than on some later request.

use crate::{BackendData, FileSystemStorage, ReadOnlyStorage, Storage};
use depot_error::{ConfigError, DepotResult};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, instrument};

/// Builds a backend instance from its parsed construction data.
pub type BackendConstructor = fn(&BackendData) -> DepotResult<Arc<dyn Storage>>;

/// A named backend type.
#[derive(Debug, Clone)]
pub struct BackendDescriptor {
    /// Type name used in location strings (`<name>:<data>`)
    pub name: String,
    /// Whether the data is a plain string rather than `key=value` pairs
    pub simple_data: bool,
    /// Constructor for instances of this type
    pub constructor: BackendConstructor,
}

impl BackendDescriptor {
    /// Describe a backend type.
    pub fn new(name: impl Into<String>, simple_data: bool, constructor: BackendConstructor) -> Self {
        Self {
            name: name.into(),
            simple_data,
            constructor,
        }
    }

    /// Parse `data` for this backend type and construct an instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed or the constructor rejects it.
    pub fn build(&self, data: &str) -> DepotResult<Arc<dyn Storage>> {
        let data = BackendData::parse(data, self.simple_data)?;
        (self.constructor)(&data)
    }
}

/// Source of backend types, such as the core crate or an optional plugin.
pub trait BackendProvider: Send + Sync {
    /// Name of the provider, reported when type names collide.
    fn name(&self) -> &str;

    /// Backend types this provider contributes.
    fn backends(&self) -> Vec<BackendDescriptor>;
}

/// The backends shipped with Depot: `fs` and `fs-readonly`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreBackends;

impl CoreBackends {
    /// Type name of the read-only filesystem backend.
    pub const READ_ONLY_FS: &'static str = "fs-readonly";
}

impl BackendProvider for CoreBackends {
    fn name(&self) -> &str {
        "core"
    }

    fn backends(&self) -> Vec<BackendDescriptor> {
        vec![
            BackendDescriptor::new(FileSystemStorage::NAME, true, filesystem),
            BackendDescriptor::new(Self::READ_ONLY_FS, true, read_only_filesystem),
        ]
    }
}

fn filesystem(data: &BackendData) -> DepotResult<Arc<dyn Storage>> {
    Ok(Arc::new(FileSystemStorage::from_data(data)?))
}

fn read_only_filesystem(data: &BackendData) -> DepotResult<Arc<dyn Storage>> {
    let storage = FileSystemStorage::from_data(data)?;
    Ok(Arc::new(ReadOnlyStorage::new(storage)))
}

/// A registered backend type and the provider it came from.
#[derive(Debug, Clone)]
pub struct RegisteredBackend {
    /// Provider that contributed the type
    pub provider: String,
    /// The backend type
    pub descriptor: BackendDescriptor,
}

/// Backend types keyed by name.
///
/// # Example
///
/// ```
/// use depot_storage::{BackendRegistry, CoreBackends};
///
/// let registry = BackendRegistry::from_providers(&[&CoreBackends]).unwrap();
/// assert!(registry.get("fs").is_some());
/// assert!(registry.get("fs-readonly").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, RegisteredBackend>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the backends of every provider, each asked exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if two descriptors share a type name.
    #[instrument(skip(providers), fields(providers = providers.len()))]
    pub fn from_providers(providers: &[&dyn BackendProvider]) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for provider in providers {
            for descriptor in provider.backends() {
                registry.register(provider.name(), descriptor)?;
            }
        }
        debug!(backends = registry.len(), "Collected storage backends");
        Ok(registry)
    }

    /// Add a backend type contributed by `provider`.
    ///
    /// # Errors
    ///
    /// Returns an error if the type name is already registered.
    pub fn register(
        &mut self,
        provider: &str,
        descriptor: BackendDescriptor,
    ) -> Result<(), ConfigError> {
        if let Some(existing) = self.backends.get(&descriptor.name) {
            return Err(ConfigError::new(format!(
                "Storage backend type '{}' is provided by both '{}' and '{}'",
                descriptor.name, existing.provider, provider
            )));
        }
        self.backends.insert(
            descriptor.name.clone(),
            RegisteredBackend {
                provider: provider.to_string(),
                descriptor,
            },
        );
        Ok(())
    }

    /// Look up a backend type.
    pub fn get(&self, name: &str) -> Option<&BackendDescriptor> {
        self.backends.get(name).map(|entry| &entry.descriptor)
    }

    /// Registered type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    /// Registered backends with their providers, sorted by type name.
    pub fn entries(&self) -> impl Iterator<Item = &RegisteredBackend> {
        self.backends.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

static BACKENDS: OnceLock<Result<BackendRegistry, ConfigError>> = OnceLock::new();

fn collect(extra: &[&dyn BackendProvider]) -> Result<BackendRegistry, ConfigError> {
    let mut providers: Vec<&dyn BackendProvider> = vec![&CoreBackends];
    providers.extend_from_slice(extra);
    BackendRegistry::from_providers(&providers)
}

/// Install the process-wide registry from the core backends plus `extra` providers.
///
/// Must run before the first call to [`backends`]; the registry is built once
/// and never changes afterwards.
///
/// # Errors
///
/// Returns an error if type names collide or the registry is already installed.
#[instrument(skip(extra), fields(extra = extra.len()))]
pub fn init_backends(
    extra: &[&dyn BackendProvider],
) -> Result<&'static BackendRegistry, ConfigError> {
    let mut installed = false;
    let registry = BACKENDS.get_or_init(|| {
        installed = true;
        collect(extra)
    });
    if !installed {
        return Err(ConfigError::new("Storage backends are already initialized"));
    }
    registry.as_ref().map_err(Clone::clone)
}

/// The process-wide registry, installing the core backends on first use.
///
/// # Errors
///
/// Returns the error recorded when the registry was built, if any.
pub fn backends() -> Result<&'static BackendRegistry, ConfigError> {
    BACKENDS
        .get_or_init(|| collect(&[]))
        .as_ref()
        .map_err(Clone::clone)
}

/// Startup self-check: build the process-wide registry and report its backends.
///
/// # Errors
///
/// Returns an error if backend type names are not unique.
#[instrument]
pub fn check_backends() -> Result<(), ConfigError> {
    let registry = backends()?;
    info!(
        backends = ?registry.names().collect::<Vec<_>>(),
        "Storage backends available"
    );
    Ok(())
}
