//! File commands against a configured storage location.

use depot_storage::{FileContent, Storage, StorageConfig, StorageResolver};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn resolve(config: StorageConfig, location: &str) -> Result<Arc<dyn Storage>, Box<dyn std::error::Error>> {
    Ok(StorageResolver::from_config(config)?.resolve(location)?)
}

/// Store a local file.
#[tracing::instrument(skip(config))]
pub fn store_file(
    config: StorageConfig,
    location: &str,
    name: &str,
    file: &Path,
    content_type: Option<&str>,
    dry_run: bool,
) -> CliResult {
    let storage = resolve(config, location)?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut source = std::fs::File::open(file)?;
    let saved = storage.save(
        name,
        content_type.unwrap_or(""),
        &filename,
        FileContent::Reader(&mut source),
        dry_run,
    )?;

    match saved.checksum {
        Some(checksum) => println!("{}  {}", checksum, saved.file_id),
        None => println!("{}  (dry run)", saved.file_id),
    }
    Ok(())
}

/// Write a stored file to `output` or stdout.
#[tracing::instrument(skip(config))]
pub fn fetch_file(
    config: StorageConfig,
    location: &str,
    file_id: &str,
    output: Option<&Path>,
) -> CliResult {
    let storage = resolve(config, location)?;
    let mut reader = storage.open(file_id)?;

    let copied = match output {
        Some(path) => {
            let mut file = std::fs::File::create_new(path)?;
            std::io::copy(&mut reader, &mut file)?
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            let copied = std::io::copy(&mut reader, &mut stdout)?;
            stdout.flush()?;
            copied
        }
    };
    tracing::debug!(bytes = copied, "Fetched file");
    Ok(())
}

/// Delete a stored file.
#[tracing::instrument(skip(config))]
pub fn delete_file(config: StorageConfig, location: &str, file_id: &str) -> CliResult {
    resolve(config, location)?.delete(file_id)?;
    Ok(())
}

/// Print the size of a stored file.
#[tracing::instrument(skip(config))]
pub fn file_size(config: StorageConfig, location: &str, file_id: &str) -> CliResult {
    let size = resolve(config, location)?.size(file_id)?;
    println!("{}", size);
    Ok(())
}

/// Print the delivery descriptor for a stored file.
#[tracing::instrument(skip(config))]
pub fn send_file(
    config: StorageConfig,
    location: &str,
    file_id: &str,
    filename: Option<&str>,
    content_type: &str,
    inline: bool,
) -> CliResult {
    let filename = filename
        .map(str::to_string)
        .unwrap_or_else(|| file_id.rsplit('/').next().unwrap_or(file_id).to_string());

    let delivery = resolve(config, location)?.send_file(file_id, content_type, &filename, inline)?;
    match &delivery {
        depot_storage::Delivery::File { path, .. } => println!("File: {}", path.display()),
        depot_storage::Delivery::Redirect { url } => println!("Location: {}", url),
    }
    if let Some(content_type) = delivery.effective_content_type() {
        println!("Content-Type: {}", content_type);
    }
    if let Some(disposition) = delivery.content_disposition() {
        println!("Content-Disposition: {}", disposition);
    }
    Ok(())
}
