//! Depot CLI binary.
//!
//! Command-line access to configured storage locations:
//! - Verify the backend registry and every configured location
//! - Store, fetch, size and delete files
//! - Inspect how a file would be delivered to a client

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, delete_file, fetch_file, file_size, list_backends, load_config, run_check,
        send_file, store_file,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Check => run_check(config)?,
        Commands::Backends => list_backends()?,
        Commands::Put {
            location,
            name,
            file,
            content_type,
            dry_run,
        } => store_file(config, &location, &name, &file, content_type.as_deref(), dry_run)?,
        Commands::Get {
            location,
            file_id,
            output,
        } => fetch_file(config, &location, &file_id, output.as_deref())?,
        Commands::Rm { location, file_id } => delete_file(config, &location, &file_id)?,
        Commands::Size { location, file_id } => file_size(config, &location, &file_id)?,
        Commands::Send {
            location,
            file_id,
            filename,
            content_type,
            attachment,
        } => send_file(
            config,
            &location,
            &file_id,
            filename.as_deref(),
            content_type.as_deref().unwrap_or(""),
            !attachment,
        )?,
    }

    Ok(())
}
