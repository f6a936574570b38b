//! Configuration and registry commands.

use depot_storage::{StorageConfig, StorageResolver, backends, check_backends};
use std::path::Path;

/// Load the configuration file given on the command line, or the default sources.
pub fn load_config(path: Option<&Path>) -> Result<StorageConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => StorageConfig::from_file(path)?,
        None => StorageConfig::load()?,
    };
    Ok(config)
}

/// Startup self-check: unique backend names and resolvable locations.
#[tracing::instrument(skip(config), fields(locations = config.len()))]
pub fn run_check(config: StorageConfig) -> Result<(), Box<dyn std::error::Error>> {
    check_backends()?;

    let resolver = StorageResolver::from_config(config)?;
    let mut failures = 0;
    for name in resolver.config().names() {
        match resolver.resolve(name) {
            Ok(storage) => println!("ok      {:<16} {}", name, storage),
            Err(e) => {
                failures += 1;
                println!("FAILED  {:<16} {}", name, e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} storage location(s) failed to resolve", failures).into());
    }
    tracing::info!("All storage locations resolved");
    Ok(())
}

/// Print registered backend types.
pub fn list_backends() -> Result<(), Box<dyn std::error::Error>> {
    let registry = backends()?;
    for entry in registry.entries() {
        let data = if entry.descriptor.simple_data {
            "simple"
        } else {
            "key=value"
        };
        println!("{:<16} {:<10} {}", entry.descriptor.name, data, entry.provider);
    }
    Ok(())
}
