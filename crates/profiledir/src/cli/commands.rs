//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::profile::ProfileId;

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Filter the cards by name
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by name (case-insensitive substring)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Display name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Image URL or root-relative path (e.g. /photo/boss.jpg)
    #[arg(short, long, default_value = "")]
    pub image: String,

    /// Free-text bio
    #[arg(short, long, default_value = "")]
    pub bio: String,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the profile to delete
    pub id: ProfileId,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
