//! Pluggable file storage for Depot.
//!
//! This crate lets an application store, retrieve, size-check and deliver binary
//! content through interchangeable backends, each addressed by an opaque file
//! identifier. Backends are registered by name and constructed at runtime from
//! location strings such as `fs:/srv/files`.
//!
//! # Features
//!
//! - **One contract**: every backend implements [`Storage`]
//! - **Streaming writes**: content is copied in bounded chunks while an MD5
//!   checksum is computed
//! - **Path containment**: filesystem identifiers can never escape the root
//! - **Read-only overlay**: [`ReadOnlyStorage`] wraps any backend and refuses writes
//! - **Dry runs**: `save(.., dry_run = true)` returns the identifier without I/O
//! - **Registry**: backend types are collected from [`BackendProvider`]s and
//!   checked for duplicate names once, at startup
//!
//! # Example
//!
//! ```rust
//! use depot_storage::{BackendRegistry, CoreBackends, FileContent, StorageConfig, StorageResolver};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let mut config = StorageConfig::default();
//! config.insert("docs", format!("fs:{}", dir.path().display()));
//!
//! let registry = BackendRegistry::from_providers(&[&CoreBackends])?;
//! let resolver = StorageResolver::new(config, &registry);
//! let storage = resolver.resolve("docs")?;
//!
//! let saved = storage.save("2024/report.txt", "text/plain", "report.txt", FileContent::Bytes(b"hello"), false)?;
//! assert_eq!(saved.file_id, "2024/report.txt");
//! assert_eq!(storage.size(&saved.file_id)?, 5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checksum;
mod config;
mod data;
mod delivery;
mod filesystem;
mod local_path;
mod path;
mod read_only;
mod registry;
mod resolver;
mod storage;

pub use checksum::{ChecksummingCopier, DEFAULT_CHUNK_SIZE, checksum};
pub use config::StorageConfig;
pub use data::BackendData;
pub use delivery::Delivery;
pub use depot_error::{
    ConfigError, DepotError, DepotErrorKind, DepotResult, StorageError, StorageErrorKind,
    StorageOperation, StorageResult,
};
pub use filesystem::FileSystemStorage;
pub use local_path::LocalPath;
pub use read_only::ReadOnlyStorage;
pub use registry::{
    BackendConstructor, BackendDescriptor, BackendProvider, BackendRegistry, CoreBackends,
    RegisteredBackend, backends, check_backends, init_backends,
};
pub use resolver::{StorageResolver, get_storage, parse_location};
pub use storage::{FileContent, SavedFile, Storage};
