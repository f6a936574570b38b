//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Depot - pluggable file storage
#[derive(Parser, Debug)]
#[command(name = "depot")]
#[command(about = "Store and retrieve files through configured storage backends", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./depot.toml and ~/.config/depot/depot.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the backend registry and every configured storage location
    Check,

    /// List registered backend types
    Backends,

    /// Store a local file
    Put {
        /// Storage location name
        location: String,

        /// Name to store the file under
        name: String,

        /// File to upload
        file: PathBuf,

        /// Content type of the file
        #[arg(long)]
        content_type: Option<String>,

        /// Only print the identifier the file would get
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a stored file to stdout or a local file
    Get {
        /// Storage location name
        location: String,

        /// Identifier of the stored file
        file_id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a stored file
    Rm {
        /// Storage location name
        location: String,

        /// Identifier of the stored file
        file_id: String,
    },

    /// Print the size of a stored file in bytes
    Size {
        /// Storage location name
        location: String,

        /// Identifier of the stored file
        file_id: String,
    },

    /// Show how a stored file would be delivered to a client
    Send {
        /// Storage location name
        location: String,

        /// Identifier of the stored file
        file_id: String,

        /// Filename offered to the client (defaults to the identifier's last segment)
        #[arg(long)]
        filename: Option<String>,

        /// Content type to announce (guessed from the filename if omitted)
        #[arg(long)]
        content_type: Option<String>,

        /// Offer as download instead of inline display
        #[arg(long)]
        attachment: bool,
    },
}
