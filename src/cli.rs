//! Command-line argument parsing
//!
//! Supports:
//! - Replaying a YAML input script against an in-memory surface
//! - Validating a typeahead config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Typeahead engine driver
#[derive(Parser, Debug)]
#[command(name = "omnibar", version, about = "Trigger-driven typeahead engine")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Replay an input script and print the resulting state
    Replay {
        /// Script file (YAML)
        script: PathBuf,

        /// Typeahead config to use instead of the user config
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a typeahead config file for problems
    CheckConfig {
        /// Config file (defaults to the user config)
        file: Option<PathBuf>,
    },
}

/// Where the typeahead config comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `~/.config/omnibar/typeahead.yaml`, or defaults if missing
    User,
    File(PathBuf),
}

impl CliCommand {
    /// Config location this command reads
    pub fn config_source(&self) -> ConfigSource {
        let path = match self {
            CliCommand::Replay { config, .. } => config,
            CliCommand::CheckConfig { file } => file,
        };
        match path {
            Some(path) => ConfigSource::File(path.clone()),
            None => ConfigSource::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_args() {
        let args = CliArgs::try_parse_from(["omnibar", "replay", "demo.yaml", "--json"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Replay {
                script: PathBuf::from("demo.yaml"),
                config: None,
                json: true,
            }
        );
        assert_eq!(args.command.config_source(), ConfigSource::User);
    }

    #[test]
    fn test_replay_with_config() {
        let args =
            CliArgs::try_parse_from(["omnibar", "replay", "demo.yaml", "-c", "ta.yaml"]).unwrap();
        assert_eq!(
            args.command.config_source(),
            ConfigSource::File(PathBuf::from("ta.yaml"))
        );
    }

    #[test]
    fn test_check_config_defaults_to_user() {
        let args = CliArgs::try_parse_from(["omnibar", "check-config"]).unwrap();
        assert_eq!(args.command, CliCommand::CheckConfig { file: None });
        assert_eq!(args.command.config_source(), ConfigSource::User);
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(CliArgs::try_parse_from(["omnibar"]).is_err());
    }
}
