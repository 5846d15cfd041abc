//! CLI command definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show one category (finance, health, math, construction, everyday)
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive match on title or description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Calculator slug, e.g. mortgage-calculator
    pub slug: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Run command arguments.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Calculator slug, e.g. mortgage-calculator
    pub slug: String,

    /// Field assignments (key=value), applied over the defaults
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Report rejected input as an error instead of a zeroed result
    #[arg(long)]
    pub strict: bool,

    /// Reference date for `today` defaults (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Convert command arguments.
#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Value to convert
    #[arg(allow_negative_numbers = true)]
    pub value: String,

    /// Source unit, e.g. meter
    pub from: String,

    /// Target unit, e.g. foot
    pub to: String,

    /// Unit category (length, mass, volume); inferred from the source unit
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Keys command arguments.
#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Key sequence, e.g. `12 + 7 =` or `2 ^ 10 =`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    pub steps: bool,
}

/// Config command arguments.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    /// What to do; defaults to showing the effective configuration
    #[command(subcommand)]
    pub action: Option<ConfigAction>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the default config file path
    Path,

    /// Check a configuration file
    Validate {
        /// Path to the config file (defaults to the standard location)
        file: Option<PathBuf>,
    },
}
