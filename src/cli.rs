//! Command-line interface for opening-farm.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

/// OpeningFarm - practise chess openings against their book replies
#[derive(Parser, Debug)]
#[command(name = "opening-farm")]
#[command(about = "Practise chess openings move by move", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML opening catalogue to use instead of the built-in one
    #[arg(long, global = true)]
    pub openings: Option<PathBuf>,

    /// Opening id to start practising immediately
    #[arg(long)]
    pub opening: Option<String>,

    /// Delay before the scripted reply, in milliseconds
    #[arg(long, default_value = "300")]
    pub reply_delay_ms: u64,

    /// Directory holding the piece SVGs (assets/*.svg)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Subcommand to run; opens the practice window when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the opening catalogue grouped by difficulty
    List,

    /// Print the JSON schema of the catalogue file format
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["opening-farm"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.reply_delay(), Duration::from_millis(300));
        assert!(cli.openings.is_none());
    }

    #[test]
    fn test_list_with_catalogue() {
        let cli = Cli::parse_from(["opening-farm", "list", "--openings", "mine.toml"]);
        assert!(matches!(cli.command, Some(Command::List)));
        assert_eq!(cli.openings, Some(PathBuf::from("mine.toml")));
    }

    #[test]
    fn test_start_options() {
        let cli = Cli::parse_from([
            "opening-farm",
            "--opening",
            "ruy-lopez",
            "--reply-delay-ms",
            "50",
        ]);
        assert_eq!(cli.opening.as_deref(), Some("ruy-lopez"));
        assert_eq!(cli.reply_delay(), Duration::from_millis(50));
    }
}
