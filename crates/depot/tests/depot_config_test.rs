//! End-to-end tests through the facade: config file to stored bytes.

use depot::{Delivery, FileContent, StorageConfig, StorageResolver};
use std::io::Read;

#[test]
fn test_config_file_to_stored_file() {
    let dir = tempfile::tempdir().unwrap();
    let files = dir.path().join("files");
    let config_path = dir.path().join("depot.toml");
    std::fs::write(
        &config_path,
        format!(
            "[backends]\nuploads = \"fs:{0}\"\narchive = \"fs-readonly:{0}\"\n",
            files.display()
        ),
    )
    .unwrap();

    let config = StorageConfig::from_file(&config_path).unwrap();
    let resolver = StorageResolver::from_config(config).unwrap();
    resolver.check().unwrap();

    let uploads = resolver.resolve("uploads").unwrap();
    let saved = uploads
        .save(
            "reports/q3.txt",
            "text/plain",
            "q3.txt",
            FileContent::Bytes(b"quarterly"),
            false,
        )
        .unwrap();
    assert_eq!(saved.file_id, "reports/q3.txt");
    assert_eq!(
        saved.checksum.as_deref(),
        Some(depot::checksum(b"quarterly").as_str())
    );

    let archive = resolver.resolve("archive").unwrap();
    let mut text = String::new();
    archive
        .open(&saved.file_id)
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "quarterly");
    assert!(archive.delete(&saved.file_id).unwrap_err().is_read_only());

    match archive.send_file(&saved.file_id, "", "q3.txt", false).unwrap() {
        Delivery::File { path, .. } => assert_eq!(path, files.join("reports").join("q3.txt")),
        other => panic!("unexpected delivery: {other:?}"),
    }
}

#[test]
fn test_unknown_location_is_config_error() {
    let config = StorageConfig::from_toml("[backends]\n").unwrap();
    let resolver = StorageResolver::from_config(config).unwrap();
    let err = resolver.resolve("missing").unwrap_err();
    assert!(err.as_config().is_some());
}
