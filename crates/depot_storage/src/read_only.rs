//! Read-only capability overlay.

use crate::{Delivery, FileContent, LocalPath, SavedFile, Storage};
use depot_error::{StorageError, StorageOperation, StorageResult};
use std::io::Read;
use std::path::PathBuf;

/// Wraps any backend and refuses every write.
///
/// `save` and `delete` fail with a read-only [`StorageError`] without touching
/// the wrapped backend; reads pass straight through.
///
/// # Example
///
/// ```
/// use depot_storage::{FileContent, FileSystemStorage, ReadOnlyStorage, Storage};
///
/// let storage = ReadOnlyStorage::new(FileSystemStorage::new("/mnt/archive"));
/// let err = storage
///     .save("a.txt", "text/plain", "a.txt", FileContent::Bytes(b"x"), false)
///     .unwrap_err();
/// assert!(err.is_read_only());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyStorage<S> {
    inner: S,
}

impl<S: Storage> ReadOnlyStorage<S> {
    /// Restrict `inner` to read operations.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the backend, restoring write access.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Storage> Storage for ReadOnlyStorage<S> {
    fn open(&self, file_id: &str) -> StorageResult<Box<dyn Read + Send>> {
        self.inner.open(file_id)
    }

    fn get_local_path(&self, file_id: &str) -> StorageResult<LocalPath> {
        self.inner.get_local_path(file_id)
    }

    fn scratch_dir(&self) -> PathBuf {
        self.inner.scratch_dir()
    }

    fn save(
        &self,
        name: &str,
        _content_type: &str,
        _filename: &str,
        _content: FileContent<'_>,
        _dry_run: bool,
    ) -> StorageResult<SavedFile> {
        tracing::warn!(storage = %self, name, "Refused write to read-only storage");
        Err(StorageError::read_only(StorageOperation::Save, name))
    }

    fn delete(&self, file_id: &str) -> StorageResult<()> {
        tracing::warn!(storage = %self, file_id, "Refused delete from read-only storage");
        Err(StorageError::read_only(StorageOperation::Delete, file_id))
    }

    fn size(&self, file_id: &str) -> StorageResult<u64> {
        self.inner.size(file_id)
    }

    fn send_file(
        &self,
        file_id: &str,
        content_type: &str,
        filename: &str,
        inline: bool,
    ) -> StorageResult<Delivery> {
        self.inner.send_file(file_id, content_type, filename, inline)
    }
}

impl<S: Storage> std::fmt::Display for ReadOnlyStorage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReadOnly({})", self.inner)
    }
}
