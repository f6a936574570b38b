//! Filesystem-based storage implementation.
//!
//! Files are stored below a root directory at the relative path given by
//! their identifier:
//!
//! ```text
//! /srv/depot/files/
//! ├── 2024/
//! │   └── 03/
//! │       └── report.pdf     file_id = "2024/03/report.pdf"
//! └── avatar.png             file_id = "avatar.png"
//! ```

use crate::path::{ensure_contained, relative_path};
use crate::{BackendData, ChecksummingCopier, Delivery, FileContent, LocalPath, SavedFile, Storage};
use depot_error::{
    ConfigError, DepotResult, StorageError, StorageErrorKind, StorageOperation, StorageResult,
};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// # Features
///
/// - **Containment**: identifiers are validated before any filesystem call and
///   can never resolve outside the root, lexically or through symlinks
/// - **No clobbering**: content is staged in a temp file and published with a
///   no-clobber link, so concurrent saves of one name have a single winner and
///   readers never observe partial files
/// - **Direct local paths**: [`get_local_path`](Storage::get_local_path) hands
///   out the stored path without copying
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("FileSystemStorage({})", root.display())]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    /// Registered backend type name.
    pub const NAME: &'static str = "fs";

    /// Create a backend rooted at `root`.
    ///
    /// Performs no I/O; the root is created on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Construct from the data part of an `fs:<root>` location string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the data is not a simple, non-empty path.
    pub fn from_data(data: &BackendData) -> DepotResult<Self> {
        match data.as_simple() {
            Some(root) if !root.trim().is_empty() => Ok(Self::new(root)),
            Some(_) => Err(ConfigError::new("Filesystem storage requires a root path").into()),
            None => Err(ConfigError::new(
                "Filesystem storage expects a plain path, not key=value data",
            )
            .into()),
        }
    }

    /// Root directory of this backend.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an identifier to an absolute path inside the root.
    ///
    /// # Errors
    ///
    /// Returns an invalid-path error, tagged with `operation`, if the
    /// identifier would escape the root.
    pub fn resolve_path(&self, operation: StorageOperation, file_id: &str) -> StorageResult<PathBuf> {
        let relative = self.check_identifier(operation, file_id)?;
        let full = self.root.join(relative);
        ensure_contained(&self.root, &full).map_err(|reason| self.reject(operation, file_id, reason))?;
        Ok(full)
    }

    fn check_identifier(&self, operation: StorageOperation, file_id: &str) -> StorageResult<PathBuf> {
        relative_path(file_id).map_err(|reason| self.reject(operation, file_id, reason))
    }

    #[track_caller]
    fn reject(&self, operation: StorageOperation, file_id: &str, reason: String) -> StorageError {
        tracing::warn!(
            root = %self.root.display(),
            file_id,
            %operation,
            reason = %reason,
            "Rejected storage path"
        );
        StorageError::invalid_path(operation, file_id, reason)
    }

    /// Resolve and require a regular file at the path.
    fn existing_path(
        &self,
        operation: StorageOperation,
        file_id: &str,
    ) -> StorageResult<(PathBuf, fs::Metadata)> {
        let path = self.resolve_path(operation, file_id)?;
        let metadata = fs::metadata(&path).map_err(|e| StorageError::io(operation, file_id, e))?;
        require_file(operation, file_id, &metadata)?;
        Ok((path, metadata))
    }
}

/// Directories below the root hold stored files but are never files themselves.
fn require_file(
    operation: StorageOperation,
    file_id: &str,
    metadata: &fs::Metadata,
) -> StorageResult<()> {
    if metadata.is_file() {
        Ok(())
    } else {
        tracing::debug!(file_id, %operation, "Identifier does not name a regular file");
        Err(StorageError::new(operation, file_id, StorageErrorKind::NotFound))
    }
}

impl Storage for FileSystemStorage {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn open(&self, file_id: &str) -> StorageResult<Box<dyn Read + Send>> {
        let path = self.resolve_path(StorageOperation::Open, file_id)?;
        let file = fs::File::open(&path)
            .map_err(|e| StorageError::io(StorageOperation::Open, file_id, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| StorageError::io(StorageOperation::Open, file_id, e))?;
        require_file(StorageOperation::Open, file_id, &metadata)?;
        tracing::debug!(path = %path.display(), "Opened stored file");
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn get_local_path(&self, file_id: &str) -> StorageResult<LocalPath> {
        let (path, _) = self.existing_path(StorageOperation::GetLocalPath, file_id)?;
        Ok(LocalPath::Stored(path))
    }

    #[tracing::instrument(skip(self, content), fields(root = %self.root.display()))]
    fn save(
        &self,
        name: &str,
        content_type: &str,
        filename: &str,
        content: FileContent<'_>,
        dry_run: bool,
    ) -> StorageResult<SavedFile> {
        let op = StorageOperation::Save;
        self.check_identifier(op, name)?;
        if dry_run {
            tracing::debug!("Dry run, nothing written");
            return Ok(SavedFile::dry_run(name));
        }

        let path = self.resolve_path(op, name)?;
        if fs::symlink_metadata(&path).is_ok() {
            return Err(StorageError::new(op, name, StorageErrorKind::AlreadyExists));
        }

        // Relative paths are non-empty, so the joined path always has a parent.
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|e| StorageError::io(op, name, e))?;

        let mut staging = tempfile::Builder::new()
            .prefix(".depot-")
            .suffix(".part")
            .tempfile_in(parent)
            .map_err(|e| StorageError::io(op, name, e))?;

        let checksum = ChecksummingCopier::default()
            .copy(&mut content.into_reader(), staging.as_file_mut())
            .map_err(|e| StorageError::io(op, name, e))?;

        staging
            .persist_noclobber(&path)
            .map_err(|e| StorageError::io(op, name, e.error))?;

        tracing::info!(
            path = %path.display(),
            checksum = %checksum,
            "Stored file"
        );
        Ok(SavedFile::stored(name, checksum))
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn delete(&self, file_id: &str) -> StorageResult<()> {
        let path = self.resolve_path(StorageOperation::Delete, file_id)?;
        fs::remove_file(&path).map_err(|e| StorageError::io(StorageOperation::Delete, file_id, e))?;
        tracing::info!(path = %path.display(), "Deleted stored file");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn size(&self, file_id: &str) -> StorageResult<u64> {
        let (_, metadata) = self.existing_path(StorageOperation::GetSize, file_id)?;
        Ok(metadata.len())
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn send_file(
        &self,
        file_id: &str,
        content_type: &str,
        filename: &str,
        inline: bool,
    ) -> StorageResult<Delivery> {
        let (path, _) = self.existing_path(StorageOperation::SendFile, file_id)?;
        Ok(Delivery::file(path, content_type, filename, inline))
    }
}
