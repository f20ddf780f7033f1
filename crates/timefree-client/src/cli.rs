//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use timefree_core::TimePeriod;

/// timefree - How much of your day is actually yours?
#[derive(Debug, Parser)]
#[command(name = "timefree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "TIMEFREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config.toml)
    #[arg(long, env = "TIMEFREE_BACKEND")]
    pub backend: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Print analysis results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with an identity-provider credential
    Login {
        /// The opaque identity credential (supports `pass::`, `env::`,
        /// `file::` prefixes)
        #[arg(long, env = "TIMEFREE_CREDENTIAL")]
        credential: Option<String>,

        /// Read the credential from a file (first line)
        #[arg(long)]
        credential_file: Option<PathBuf>,
    },

    /// Grant the backend access to your calendar
    Connect,

    /// Analyze calendar data and show your time-freedom score
    Analyze {
        /// Analyze the connected calendar instead of pasted text
        #[arg(long)]
        auto: bool,

        /// Time period to analyze
        #[arg(long, default_value = "this_week")]
        period: TimePeriod,

        /// Read calendar text from a file (manual mode)
        #[arg(long, conflicts_with = "auto")]
        file: Option<PathBuf>,

        /// Calendar text inline (manual mode; otherwise read from stdin)
        #[arg(long, conflicts_with = "auto")]
        text: Option<String>,
    },

    /// Show session and configuration status
    Status,

    /// Clear the last result and any pasted text
    Reset,

    /// Sign out and forget the stored session
    Logout,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_analyze_period() {
        let cli = Cli::parse_from(["timefree", "analyze", "--period", "this_month"]);
        match cli.command {
            Some(Command::Analyze { period, auto, .. }) => {
                assert_eq!(period, TimePeriod::ThisMonth);
                assert!(!auto);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn analyze_defaults_to_this_week() {
        let cli = Cli::parse_from(["timefree", "analyze"]);
        match cli.command {
            Some(Command::Analyze { period, .. }) => {
                assert_eq!(period, TimePeriod::ThisWeek);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn analyze_rejects_unknown_period() {
        let result = Cli::try_parse_from(["timefree", "analyze", "--period", "next_year"]);
        assert!(result.is_err());
    }

    #[test]
    fn auto_conflicts_with_text_input() {
        let result =
            Cli::try_parse_from(["timefree", "analyze", "--auto", "--text", "Mon standup"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_is_valid() {
        let cli = Cli::parse_from(["timefree"]);
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }
}
