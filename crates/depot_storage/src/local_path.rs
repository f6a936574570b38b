//! Scoped access to a stored file through the local filesystem.

use crate::{ChecksummingCopier, Storage};
use depot_error::{StorageError, StorageOperation, StorageResult};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// A readable local path for a stored file, valid while this value lives.
///
/// Backends that already keep files on local disk hand out the stored path.
/// Others copy the content into a uniquely named scratch file which is deleted
/// when the `LocalPath` is dropped, whether the caller returns normally, bails
/// out with an error or unwinds.
#[derive(Debug)]
pub enum LocalPath {
    /// The permanent location of the file; must only be read
    Stored(PathBuf),
    /// A private scratch copy removed on drop
    Scratch(TempPath),
}

impl LocalPath {
    /// The path to read from.
    pub fn path(&self) -> &Path {
        match self {
            LocalPath::Stored(path) => path,
            LocalPath::Scratch(path) => path,
        }
    }

    /// Whether this is a scratch copy that disappears on drop.
    pub fn is_scratch(&self) -> bool {
        matches!(self, LocalPath::Scratch(_))
    }

    /// Copy a stored file into a new scratch file under `dir`.
    ///
    /// A partially written scratch file is removed if the copy fails.
    #[tracing::instrument(skip(storage, dir), fields(storage = %storage, dir = %dir.display()))]
    pub fn materialize<S: Storage + ?Sized>(
        storage: &S,
        file_id: &str,
        dir: &Path,
    ) -> StorageResult<Self> {
        let mut source = storage
            .open(file_id)
            .map_err(|e| e.during(StorageOperation::GetLocalPath))?;

        let mut scratch = tempfile::Builder::new()
            .prefix("depot-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| StorageError::io(StorageOperation::GetLocalPath, file_id, e))?;

        let checksum = ChecksummingCopier::default()
            .copy(&mut source, scratch.as_file_mut())
            .map_err(|e| StorageError::io(StorageOperation::GetLocalPath, file_id, e))?;

        let path = scratch.into_temp_path();
        tracing::debug!(
            path = %path.display(),
            checksum = %checksum,
            "Materialized scratch copy"
        );
        Ok(LocalPath::Scratch(path))
    }
}

impl std::ops::Deref for LocalPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        self.path()
    }
}

impl AsRef<Path> for LocalPath {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
