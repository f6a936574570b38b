//! Shared helpers for storage integration tests.

#![allow(dead_code, unused_imports)]

mod memory_storage;

pub use memory_storage::MemoryStorage;

use depot_storage::{FileContent, FileSystemStorage, Storage};
use tempfile::TempDir;

/// A filesystem backend rooted in a fresh temporary directory.
pub fn temp_fs() -> (TempDir, FileSystemStorage) {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path().join("files"));
    (dir, storage)
}

/// Save `data` under `name` and return the file id.
pub fn put(storage: &dyn Storage, name: &str, data: &[u8]) -> String {
    storage
        .save(name, "application/octet-stream", name, FileContent::Bytes(data), false)
        .unwrap()
        .file_id
}

/// Read a stored file completely.
pub fn read_all(storage: &dyn Storage, file_id: &str) -> Vec<u8> {
    let mut reader = storage.open(file_id).unwrap();
    let mut content = Vec::new();
    std::io::Read::read_to_end(&mut reader, &mut content).unwrap();
    content
}
