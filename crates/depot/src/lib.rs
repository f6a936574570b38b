//! Depot - pluggable file storage.
//!
//! Depot stores, retrieves and delivers binary content through interchangeable
//! backends addressed by opaque file identifiers. Applications name storage
//! locations in configuration (`docs = "fs:/srv/files"`) and resolve them into
//! [`Storage`] instances at runtime.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use depot::{FileContent, get_storage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = get_storage("default")?;
//! let saved = storage.save("2024/minutes.pdf", "application/pdf", "minutes.pdf", FileContent::Bytes(b"%PDF"), false)?;
//! println!("stored {} ({:?})", saved.file_id, saved.checksum);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `depot-error` - Error types
//! - `depot-storage` - Storage trait, backends, registry and resolver
//!
//! This crate re-exports both and ships the `depot` command-line tool.

#![forbid(unsafe_code)]

pub use depot_error::*;
pub use depot_storage::*;
