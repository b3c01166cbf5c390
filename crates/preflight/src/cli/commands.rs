//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Generate command arguments.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Operation type code (e.g. VLOS, BVLOS_VO)
    #[arg(short, long)]
    pub operation: Option<String>,

    /// Drone platform code (e.g. DJI, EBEE)
    #[arg(short, long)]
    pub drone: Option<String>,

    /// Drone count code (e.g. SINGLE, SWARM)
    #[arg(short, long)]
    pub count: Option<String>,

    /// Override the checklist JSON data directory
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Options command arguments.
#[derive(Debug, Args)]
pub struct OptionsCommand {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_command_debug() {
        let cmd = GenerateCommand {
            operation: Some("VLOS".to_string()),
            drone: None,
            count: None,
            data_dir: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("operation"));
        assert!(debug_str.contains("VLOS"));
    }

    #[test]
    fn test_options_command_debug() {
        let cmd = OptionsCommand { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
