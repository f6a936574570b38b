//! In-memory backend standing in for a remote store.

use depot_storage::{
    BackendData, ChecksummingCopier, DepotResult, Delivery, FileContent, SavedFile, Storage,
    StorageError, StorageErrorKind, StorageOperation, StorageResult,
};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Keeps files in a map and serves them through redirects, so local paths
/// need scratch copies.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    scratch: Option<PathBuf>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            base_url: "https://cdn.example.org".to_string(),
            ..Self::default()
        }
    }

    /// Put scratch copies in `dir` instead of the system temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch = Some(dir.into());
        self
    }

    /// Constructor for registration: `mem:url=...,temp_dir=...`.
    pub fn from_data(data: &BackendData) -> DepotResult<Arc<dyn Storage>> {
        let mut storage = Self::new();
        if let Some(url) = data.get("url") {
            storage.base_url = url.to_string();
        }
        if let Some(dir) = data.get("temp_dir") {
            storage.scratch = Some(PathBuf::from(dir));
        }
        Ok(Arc::new(storage))
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Storage for MemoryStorage {
    fn open(&self, file_id: &str) -> StorageResult<Box<dyn Read + Send>> {
        let files = self.files.lock().unwrap();
        let data = files.get(file_id).cloned().ok_or_else(|| {
            StorageError::new(StorageOperation::Open, file_id, StorageErrorKind::NotFound)
        })?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn scratch_dir(&self) -> PathBuf {
        self.scratch.clone().unwrap_or_else(std::env::temp_dir)
    }

    fn save(
        &self,
        name: &str,
        _content_type: &str,
        _filename: &str,
        content: FileContent<'_>,
        dry_run: bool,
    ) -> StorageResult<SavedFile> {
        let file_id = format!("mem/{name}");
        if dry_run {
            return Ok(SavedFile::dry_run(file_id));
        }
        let mut data = Vec::new();
        let checksum = ChecksummingCopier::default()
            .copy(&mut content.into_reader(), &mut data)
            .map_err(|e| StorageError::io(StorageOperation::Save, name, e))?;

        let mut files = self.files.lock().unwrap();
        if files.contains_key(&file_id) {
            return Err(StorageError::new(
                StorageOperation::Save,
                name,
                StorageErrorKind::AlreadyExists,
            ));
        }
        files.insert(file_id.clone(), data);
        Ok(SavedFile::stored(file_id, checksum))
    }

    fn delete(&self, file_id: &str) -> StorageResult<()> {
        self.files
            .lock()
            .unwrap()
            .remove(file_id)
            .map(|_| ())
            .ok_or_else(|| {
                StorageError::new(StorageOperation::Delete, file_id, StorageErrorKind::NotFound)
            })
    }

    fn size(&self, file_id: &str) -> StorageResult<u64> {
        let files = self.files.lock().unwrap();
        files.get(file_id).map(|d| d.len() as u64).ok_or_else(|| {
            StorageError::new(StorageOperation::GetSize, file_id, StorageErrorKind::NotFound)
        })
    }

    fn send_file(
        &self,
        file_id: &str,
        _content_type: &str,
        _filename: &str,
        _inline: bool,
    ) -> StorageResult<Delivery> {
        if !self.files.lock().unwrap().contains_key(file_id) {
            return Err(StorageError::new(
                StorageOperation::SendFile,
                file_id,
                StorageErrorKind::NotFound,
            ));
        }
        Ok(Delivery::redirect(format!("{}/{}", self.base_url, file_id)))
    }
}

impl std::fmt::Display for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemoryStorage({})", self.base_url)
    }
}
