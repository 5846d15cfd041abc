//! Command-line interface for bearcalc.
//!
//! This module provides the CLI structure for the `bearcalc` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{ConfigAction, ConfigCommand, ConvertCommand, KeysCommand, ListCommand, RunCommand, ShowCommand};

/// bearcalc - everyday calculators in the terminal
///
/// Mortgage, BMI, tip, unit conversion and thirty-odd more single-purpose
/// calculators, each driven by key=value inputs.
#[derive(Debug, Parser)]
#[command(name = "bearcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// List calculators by category
    List(ListCommand),

    /// Describe one calculator: explanation, fields and FAQ
    Show(ShowCommand),

    /// Run a calculator
    Run(RunCommand),

    /// Convert a value between units
    Convert(ConvertCommand),

    /// Replay a key sequence on the scientific keypad
    Keys(KeysCommand),

    /// View configuration
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use chrono::NaiveDate;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "bearcalc");
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["bearcalc", "-q", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
        let cli = Cli::try_parse_from(["bearcalc", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Normal);
        let cli = Cli::try_parse_from(["bearcalc", "-v", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        let cli = Cli::try_parse_from(["bearcalc", "list", "-vvv"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from(["bearcalc", "list", "--category", "health", "-s", "fat"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.category.as_deref(), Some("health"));
                assert_eq!(cmd.search.as_deref(), Some("fat"));
                assert!(!cmd.json);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_with_assignments() {
        let args = [
            "bearcalc",
            "run",
            "tip-calculator",
            "bill=80",
            "people=4",
            "--strict",
            "--today",
            "2025-03-15",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Run(cmd) => {
                assert_eq!(cmd.slug, "tip-calculator");
                assert_eq!(cmd.assignments, vec!["bill=80", "people=4"]);
                assert!(cmd.strict);
                assert_eq!(cmd.today, NaiveDate::from_ymd_opt(2025, 3, 15));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_rejects_bad_date() {
        assert!(Cli::try_parse_from(["bearcalc", "run", "date-calculator", "--today", "soon"]).is_err());
    }

    #[test]
    fn test_parse_convert_negative_value() {
        let cli = Cli::try_parse_from(["bearcalc", "convert", "-3.5", "meter", "foot"]).unwrap();
        match cli.command {
            Command::Convert(cmd) => {
                assert_eq!(cmd.value, "-3.5");
                assert_eq!(cmd.from, "meter");
                assert_eq!(cmd.to, "foot");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_keys() {
        let cli = Cli::try_parse_from(["bearcalc", "keys", "12", "+", "7", "="]).unwrap();
        match cli.command {
            Command::Keys(cmd) => assert_eq!(cmd.keys.join(" "), "12 + 7 ="),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_defaults_to_show() {
        let cli = Cli::try_parse_from(["bearcalc", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand { action: None, .. })));
        let cli = Cli::try_parse_from(["bearcalc", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand {
                action: Some(ConfigAction::Path),
                ..
            })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["bearcalc", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
