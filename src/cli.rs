//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Match employees to job openings by skill")]
#[command(long_about = "Recommend job openings from declared and discovered skills, and discover new skills from project task descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding employees.json, jobs.json and projects.json
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank job openings for an employee
    Recommend {
        /// Employee id
        employee: u64,

        /// Drop jobs scoring at or below this percentage
        #[arg(short, long, conflicts_with = "no_threshold")]
        threshold: Option<u32>,

        /// Do not apply any threshold
        #[arg(long)]
        no_threshold: bool,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Discover skills from project tasks and record them on employees
    Discover {
        /// Report what would be added without saving
        #[arg(long)]
        dry_run: bool,

        /// Provenance tag for new entries
        #[arg(long)]
        origin: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the known skills found in a piece of text
    Extract {
        /// Text to scan
        text: String,
    },

    /// List employees with a skill matching a substring
    Search {
        /// Skill substring, case-insensitive
        query: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

impl Cli {
    /// Config file in effect: `--config` when given, the default location otherwise
    pub fn config_file(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(crate::config::Config::config_path)
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Threshold to apply given the command-line flags and the configured default
pub fn resolve_threshold(flag: Option<u32>, no_threshold: bool, configured: Option<u32>) -> Option<u32> {
    if no_threshold {
        None
    } else {
        flag.or(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_resolve_threshold() {
        assert_eq!(resolve_threshold(None, false, Some(30)), Some(30));
        assert_eq!(resolve_threshold(Some(50), false, Some(30)), Some(50));
        assert_eq!(resolve_threshold(None, true, Some(30)), None);
    }

    #[test]
    fn test_parse_recommend_args() {
        let cli = Cli::try_parse_from(["skill-matcher", "recommend", "3", "-t", "40", "-o", "json"]).unwrap();
        match cli.command {
            Commands::Recommend { employee, threshold, output, .. } => {
                assert_eq!(employee, 3);
                assert_eq!(threshold, Some(40));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_config_flag_selects_file() {
        let cli = Cli::try_parse_from(["skill-matcher", "--config", "/tmp/team.toml", "config", "reset"]).unwrap();
        assert_eq!(cli.config_file(), PathBuf::from("/tmp/team.toml"));
        assert!(matches!(cli.command, Commands::Config { action: Some(ConfigAction::Reset) }));

        let cli = Cli::try_parse_from(["skill-matcher", "config", "path"]).unwrap();
        assert_eq!(cli.config_file(), crate::config::Config::config_path());
    }

    #[test]
    fn test_threshold_flags_conflict() {
        let parsed = Cli::try_parse_from(["skill-matcher", "recommend", "1", "-t", "40", "--no-threshold"]);
        assert!(parsed.is_err());
    }
}
