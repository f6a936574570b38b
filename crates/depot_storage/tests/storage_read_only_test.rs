//! Tests for the read-only storage overlay.

mod test_utils;

use depot_storage::{FileContent, ReadOnlyStorage, Storage, StorageOperation};
use std::sync::Arc;
use test_utils::{MemoryStorage, put, read_all, temp_fs};

#[test]
fn test_writes_are_refused() {
    let (_dir, fs) = temp_fs();
    let storage = ReadOnlyStorage::new(fs);

    let err = storage
        .save("new.txt", "text/plain", "new.txt", FileContent::Bytes(b"x"), false)
        .unwrap_err();
    assert!(err.is_read_only());
    assert_eq!(err.operation, StorageOperation::Save);

    // Dry runs are writes too.
    let err = storage
        .save("new.txt", "text/plain", "new.txt", FileContent::Bytes(b"x"), true)
        .unwrap_err();
    assert!(err.is_read_only());

    // The wrapped backend is never touched.
    assert!(!storage.inner().root().exists());
}

#[test]
fn test_delete_refused_and_file_kept() {
    let (_dir, fs) = temp_fs();
    put(&fs, "keep.txt", b"precious");
    let storage = ReadOnlyStorage::new(fs);

    let err = storage.delete("keep.txt").unwrap_err();
    assert!(err.is_read_only());
    assert_eq!(err.operation, StorageOperation::Delete);

    // Even for files that do not exist: the answer does not depend on state.
    assert!(storage.delete("missing.txt").unwrap_err().is_read_only());
    assert_eq!(read_all(&storage, "keep.txt"), b"precious");
}

#[test]
fn test_reads_pass_through() {
    let (_dir, fs) = temp_fs();
    put(&fs, "docs/a.txt", b"abc");
    let plain = fs.clone();
    let storage = ReadOnlyStorage::new(fs);

    assert_eq!(read_all(&storage, "docs/a.txt"), read_all(&plain, "docs/a.txt"));
    assert_eq!(storage.size("docs/a.txt").unwrap(), plain.size("docs/a.txt").unwrap());
    assert_eq!(
        storage.send_file("docs/a.txt", "text/plain", "a.txt", true).unwrap(),
        plain.send_file("docs/a.txt", "text/plain", "a.txt", true).unwrap()
    );
    assert_eq!(
        storage.get_local_path("docs/a.txt").unwrap().path(),
        plain.get_local_path("docs/a.txt").unwrap().path()
    );
    assert!(storage.size("missing").unwrap_err().is_not_found());
}

#[test]
fn test_composes_with_any_backend() {
    let memory = Arc::new(MemoryStorage::new());
    let file_id = put(memory.as_ref(), "a.txt", b"remote bytes");

    let shared: Arc<dyn Storage> = memory.clone();
    let storage = ReadOnlyStorage::new(shared);

    assert_eq!(read_all(&storage, &file_id), b"remote bytes");
    assert!(storage.delete(&file_id).unwrap_err().is_read_only());
    assert!(
        storage
            .save("b.txt", "", "", FileContent::Bytes(b"x"), false)
            .unwrap_err()
            .is_read_only()
    );
    assert_eq!(memory.len(), 1);
    assert_eq!(
        storage.to_string(),
        "ReadOnly(MemoryStorage(https://cdn.example.org))"
    );
}
