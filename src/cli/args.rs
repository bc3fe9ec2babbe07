//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// buildagent - Detect the CI build agent and report versions to it.
#[derive(Debug, Parser)]
#[command(name = "buildagent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides default .buildagent.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to look for settings in (overrides current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Use this build agent instead of auto-detection
    #[arg(long, global = true, env = "BUILDAGENT_AGENT")]
    pub agent: Option<String>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which build agent is running this process
    Detect(DetectArgs),

    /// Print the current branch, tag or pull request ref
    Branch(BranchArgs),

    /// Write the messages that register a version with the build agent
    SetVersion(SetVersionArgs),

    /// List known build agents
    List(ListArgs),

    /// Show resolved settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `branch` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BranchArgs {
    /// Keep the refs/heads/ or refs/tags/ prefix
    #[arg(long)]
    pub prefix: bool,
}

/// Arguments for the `set-version` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetVersionArgs {
    /// JSON file with computed version variables
    #[arg(long, value_name = "FILE", conflicts_with = "semver", required_unless_present = "semver")]
    pub variables: Option<PathBuf>,

    /// Plain semantic version to report
    #[arg(long, value_name = "VERSION")]
    pub semver: Option<String>,

    /// Skip the build number message, only publish variables
    #[arg(long)]
    pub no_build_number: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detect_json() {
        let cli = Cli::parse_from(["buildagent", "detect", "--json"]);
        assert!(matches!(cli.command, Commands::Detect(DetectArgs { json: true })));
    }

    #[test]
    fn parses_branch_prefix() {
        let cli = Cli::parse_from(["buildagent", "branch", "--prefix"]);
        assert!(matches!(cli.command, Commands::Branch(BranchArgs { prefix: true })));
    }

    #[test]
    fn parses_set_version_with_semver() {
        let cli = Cli::parse_from(["buildagent", "set-version", "--semver", "1.2.3"]);
        match cli.command {
            Commands::SetVersion(args) => {
                assert_eq!(args.semver.as_deref(), Some("1.2.3"));
                assert!(args.variables.is_none());
                assert!(!args.no_build_number);
            }
            other => panic!("Expected SetVersion, got {:?}", other),
        }
    }

    #[test]
    fn set_version_requires_a_source() {
        assert!(Cli::try_parse_from(["buildagent", "set-version"]).is_err());
    }

    #[test]
    fn set_version_sources_conflict() {
        let result = Cli::try_parse_from([
            "buildagent",
            "set-version",
            "--semver",
            "1.0.0",
            "--variables",
            "v.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["buildagent", "branch", "--agent", "TeamCity", "--debug"]);
        assert_eq!(cli.agent.as_deref(), Some("TeamCity"));
        assert!(cli.debug);
    }
}
