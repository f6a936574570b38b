//! Error types for the Depot storage library.
//!
//! This crate provides the error types shared by every Depot crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `StorageErrorKind` enumerates what went wrong while touching stored content
//! - `StorageError` wraps the kind with the failing operation, its target,
//!   the underlying cause and the source location
//! - `ConfigError` covers unknown or duplicate backends and bad location strings
//! - `DepotError` is the umbrella type returned by resolution and construction
//!
//! All constructors use `#[track_caller]` for automatic location capture.
//!
//! # Examples
//!
//! ```
//! use depot_error::{ConfigError, DepotResult};
//!
//! fn resolve() -> DepotResult<()> {
//!     Err(ConfigError::new("Storage backend does not exist: docs"))?
//! }
//!
//! assert!(resolve().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod storage;

pub use config::ConfigError;
pub use error::{DepotError, DepotErrorKind, DepotResult};
pub use storage::{StorageError, StorageErrorKind, StorageOperation, StorageResult};
