//! Tests for scoped local paths on backends without local files.

mod test_utils;

use depot_storage::{LocalPath, Storage};
use std::panic::{AssertUnwindSafe, catch_unwind};
use test_utils::{MemoryStorage, put};

fn scratch_entries(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_scratch_copy_removed_on_drop() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new().with_scratch_dir(scratch.path());
    let file_id = put(&storage, "doc.txt", b"scratch me");

    let local = storage.get_local_path(&file_id).unwrap();
    assert!(local.is_scratch());
    assert!(local.path().starts_with(scratch.path()));
    assert_eq!(std::fs::read(local.path()).unwrap(), b"scratch me");

    let path = local.path().to_path_buf();
    drop(local);
    assert!(!path.exists());
    assert_eq!(scratch_entries(scratch.path()), 0);
}

#[test]
fn test_scratch_copy_removed_on_early_return() {
    fn first_byte(storage: &dyn Storage, file_id: &str) -> Result<u8, String> {
        let local = storage.get_local_path(file_id).map_err(|e| e.to_string())?;
        let data = std::fs::read(&local).map_err(|e| e.to_string())?;
        if data.len() > 1 {
            return Err("too long".to_string());
        }
        Ok(data[0])
    }

    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new().with_scratch_dir(scratch.path());
    let file_id = put(&storage, "doc.txt", b"more than one byte");

    assert!(first_byte(&storage, &file_id).is_err());
    assert_eq!(scratch_entries(scratch.path()), 0);
}

#[test]
fn test_scratch_copy_removed_on_panic() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new().with_scratch_dir(scratch.path());
    let file_id = put(&storage, "doc.txt", b"boom");

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _local = storage.get_local_path(&file_id).unwrap();
        panic!("reader failed");
    }));

    assert!(result.is_err());
    assert_eq!(scratch_entries(scratch.path()), 0);
}

#[test]
fn test_missing_file_creates_no_scratch() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new().with_scratch_dir(scratch.path());

    let err = storage.get_local_path("mem/missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation, depot_storage::StorageOperation::GetLocalPath);
    assert_eq!(scratch_entries(scratch.path()), 0);
}

#[test]
fn test_unwritable_scratch_dir_is_storage_error() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new().with_scratch_dir(scratch.path().join("missing"));
    let file_id = put(&storage, "doc.txt", b"x");

    let err = storage.get_local_path(&file_id).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation, depot_storage::StorageOperation::GetLocalPath);
}

#[test]
fn test_concurrent_scratch_copies_are_private() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new().with_scratch_dir(scratch.path());
    let file_id = put(&storage, "shared.bin", &[7u8; 4096]);

    let paths: Vec<LocalPath> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| storage.get_local_path(&file_id).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut unique: Vec<_> = paths.iter().map(|p| p.path().to_path_buf()).collect();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 8);
    for path in &paths {
        assert_eq!(std::fs::read(path.path()).unwrap(), vec![7u8; 4096]);
    }

    drop(paths);
    assert_eq!(scratch_entries(scratch.path()), 0);
}

#[test]
fn test_materialize_directly() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new();
    let file_id = put(&storage, "doc.txt", b"direct");

    let local = LocalPath::materialize(&storage, &file_id, scratch.path()).unwrap();
    assert_eq!(std::fs::read(&*local).unwrap(), b"direct");
}
