//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the depot binary.

mod check;
mod commands;
mod files;

pub use check::{list_backends, load_config, run_check};
pub use commands::{Cli, Commands};
pub use files::{delete_file, fetch_file, file_size, send_file, store_file};
