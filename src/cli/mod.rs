pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_CONFIG_PATH, DEFAULT_GROUP};
use crate::store::json::DEFAULT_SEEN_PATH;
use crate::watch::DEFAULT_PERIOD;

#[derive(Parser)]
#[command(name = "listwatch")]
#[command(about = "Polls marketplace search feeds and posts new listings to Discord", long_about = None)]
pub struct Cli {
    /// Search configuration file (JSON, or TOML with a .toml extension)
    #[arg(short, long, env = "LISTWATCH_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// File holding the keys of listings already notified
    #[arg(short, long, env = "LISTWATCH_SEEN", default_value = DEFAULT_SEEN_PATH, global = true)]
    pub seen: PathBuf,

    /// Also append log output to this file
    #[arg(long, env = "LISTWATCH_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll every search of a group once
    Run {
        /// Search group to poll
        #[arg(short, long, env = "GROUP", default_value = DEFAULT_GROUP)]
        group: String,
    },
    /// List configured searches
    Jobs {
        /// Only show this group
        group: Option<String>,
    },
    /// Show how many listings have been seen
    Seen,
    /// Poll a group repeatedly until interrupted
    Watch {
        /// Search group to poll
        #[arg(short, long, env = "GROUP", default_value = DEFAULT_GROUP)]
        group: String,

        /// Time between runs (e.g. "90s", "15m", "1h")
        #[arg(short, long, default_value = DEFAULT_PERIOD)]
        every: String,

        /// Wait one period before the first run
        #[arg(long)]
        delay_first: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_group() {
        let cli = Cli::try_parse_from(["listwatch", "run", "--group", "b"]).unwrap();
        match cli.command {
            Commands::Run { group } => assert_eq!(group, "b"),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from([
            "listwatch", "watch", "-e", "30m", "--delay-first", "--log-file", "/tmp/listwatch.log",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/listwatch.log")));
        match cli.command {
            Commands::Watch { every, delay_first, .. } => {
                assert_eq!(every, "30m");
                assert!(delay_first);
            }
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_global_paths() {
        let cli = Cli::try_parse_from(["listwatch", "seen", "--seen", "/tmp/s.json"]).unwrap();
        assert_eq!(cli.seen, PathBuf::from("/tmp/s.json"));
    }
}
