//! Command-line interface for profiledir.
//!
//! Each subcommand is one user event against the profile directory.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ClearCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat,
    ShowCommand, StatusCommand,
};

/// profiledir - Keep a small directory of profiles
///
/// Create, list, search and delete profile records (name, image, bio)
/// kept in local storage.
#[derive(Debug, Parser)]
#[command(name = "profiledir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the whole page
    Show(ShowCommand),

    /// List profiles, optionally filtered by name
    List(ListCommand),

    /// Add a profile through the form
    Add(AddCommand),

    /// Delete a profile
    Delete(DeleteCommand),

    /// Clear saved profiles
    Clear(ClearCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
