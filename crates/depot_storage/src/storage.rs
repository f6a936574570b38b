//! Storage trait definition.

use crate::{Delivery, LocalPath};
use depot_error::StorageResult;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for pluggable file storage backends.
///
/// Implementations persist byte content only. Metadata such as the content
/// type and original filename is passed to [`save`](Storage::save) and
/// [`send_file`](Storage::send_file) because some backends need it at write
/// time and others at delivery time, but persisting it is the caller's job.
///
/// Every fallible operation reports failures as a
/// [`StorageError`](depot_error::StorageError); raw I/O errors never escape.
pub trait Storage: Send + Sync + std::fmt::Debug + std::fmt::Display {
    /// Open a stored file for reading.
    ///
    /// # Arguments
    ///
    /// * `file_id` - Identifier returned by [`save`](Storage::save)
    fn open(&self, file_id: &str) -> StorageResult<Box<dyn Read + Send>>;

    /// Get a local filesystem path holding the file's content.
    ///
    /// The path may be the permanent location of the file. It must only be
    /// read from, and must not be used after the returned [`LocalPath`] is
    /// dropped.
    ///
    /// The default implementation copies the file into a private scratch file
    /// under [`scratch_dir`](Storage::scratch_dir) which is removed when the
    /// `LocalPath` is dropped.
    fn get_local_path(&self, file_id: &str) -> StorageResult<LocalPath> {
        LocalPath::materialize(self, file_id, &self.scratch_dir())
    }

    /// Directory used for scratch copies made by [`get_local_path`](Storage::get_local_path).
    fn scratch_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    /// Create a new file in the storage.
    ///
    /// Saving never overwrites: if a file already exists at the location
    /// `name` maps to, the call fails. When two saves race for the same name,
    /// at most one succeeds.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name for the file; must be usable as a relative path
    ///   and must not contain `..` segments
    /// * `content_type` - Content type (may or may not be used by the backend)
    /// * `filename` - Original filename (may or may not be used by the backend)
    /// * `content` - The bytes to store
    /// * `dry_run` - Only compute the identifier; performs no I/O and returns
    ///   no checksum
    ///
    /// # Returns
    ///
    /// The file identifier and the MD5 checksum of the stored content.
    fn save(
        &self,
        name: &str,
        content_type: &str,
        filename: &str,
        content: FileContent<'_>,
        dry_run: bool,
    ) -> StorageResult<SavedFile>;

    /// Delete a file from the storage.
    fn delete(&self, file_id: &str) -> StorageResult<()>;

    /// Size of a stored file in bytes.
    fn size(&self, file_id: &str) -> StorageResult<u64>;

    /// Describe how to deliver the file to a client.
    ///
    /// Depending on the backend this is either the file itself or a redirect
    /// to a URL where it can be fetched directly.
    ///
    /// # Arguments
    ///
    /// * `content_type` - Content type to announce (may be ignored)
    /// * `filename` - Name to offer the client (may be ignored)
    /// * `inline` - Display inline rather than download
    fn send_file(
        &self,
        file_id: &str,
        content_type: &str,
        filename: &str,
        inline: bool,
    ) -> StorageResult<Delivery>;
}

/// Content handed to [`Storage::save`].
pub enum FileContent<'a> {
    /// An in-memory buffer
    Bytes(&'a [u8]),
    /// A stream read until end of file
    Reader(&'a mut dyn Read),
}

impl<'a> FileContent<'a> {
    /// Adapt the content into a stream, wrapping raw buffers in a cursor.
    pub fn into_reader(self) -> Box<dyn Read + 'a> {
        match self {
            FileContent::Bytes(bytes) => Box::new(Cursor::new(bytes)),
            FileContent::Reader(reader) => Box::new(reader),
        }
    }
}

impl std::fmt::Debug for FileContent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileContent::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            FileContent::Reader(_) => f.write_str("Reader"),
        }
    }
}

impl<'a> From<&'a [u8]> for FileContent<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        FileContent::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for FileContent<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        FileContent::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a str> for FileContent<'a> {
    fn from(text: &'a str) -> Self {
        FileContent::Bytes(text.as_bytes())
    }
}

/// Result of [`Storage::save`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SavedFile {
    /// Identifier to pass to every other storage operation
    pub file_id: String,
    /// Lowercase hex MD5 of the content; `None` for dry runs
    pub checksum: Option<String>,
}

impl SavedFile {
    /// A file that was written, with its checksum.
    pub fn stored(file_id: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            checksum: Some(checksum.into()),
        }
    }

    /// The identifier a write would have produced.
    pub fn dry_run(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            checksum: None,
        }
    }
}

macro_rules! forward_storage {
    ($wrapper:ident) => {
        impl<S: Storage + ?Sized> Storage for $wrapper<S> {
            fn open(&self, file_id: &str) -> StorageResult<Box<dyn Read + Send>> {
                (**self).open(file_id)
            }

            fn get_local_path(&self, file_id: &str) -> StorageResult<LocalPath> {
                (**self).get_local_path(file_id)
            }

            fn scratch_dir(&self) -> PathBuf {
                (**self).scratch_dir()
            }

            fn save(
                &self,
                name: &str,
                content_type: &str,
                filename: &str,
                content: FileContent<'_>,
                dry_run: bool,
            ) -> StorageResult<SavedFile> {
                (**self).save(name, content_type, filename, content, dry_run)
            }

            fn delete(&self, file_id: &str) -> StorageResult<()> {
                (**self).delete(file_id)
            }

            fn size(&self, file_id: &str) -> StorageResult<u64> {
                (**self).size(file_id)
            }

            fn send_file(
                &self,
                file_id: &str,
                content_type: &str,
                filename: &str,
                inline: bool,
            ) -> StorageResult<Delivery> {
                (**self).send_file(file_id, content_type, filename, inline)
            }
        }
    };
}

forward_storage!(Arc);
forward_storage!(Box);
