//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the settings and agents every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::agents::BuildAgent;
use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, BuildAgentConfig};
use crate::environment::{Environment, SystemEnvironment};
use crate::error::Result;
use crate::registry::AgentRegistry;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Settings and the agent registry
    /// * `out` - Standard output; CI systems read service messages from here
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Exit code when no build agent (or no ref) was found.
    pub const NOT_DETECTED: i32 = 2;

    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Shared state handed to every command.
pub struct CommandContext {
    /// Resolved settings.
    pub config: BuildAgentConfig,

    /// Every known build agent.
    pub registry: AgentRegistry,

    /// Agent requested on the command line, overriding settings.
    pub agent_override: Option<String>,
}

impl CommandContext {
    /// Create a context around an existing registry.
    pub fn new(config: BuildAgentConfig, registry: AgentRegistry) -> Self {
        Self {
            config,
            registry,
            agent_override: None,
        }
    }

    /// Set the agent requested on the command line.
    pub fn with_agent_override(mut self, agent: Option<String>) -> Self {
        self.agent_override = agent;
        self
    }

    /// Resolve the build agent to use.
    ///
    /// An explicitly named agent (command line first, then settings) is
    /// used without consulting detection. Otherwise detection runs, strict
    /// or first-match depending on settings.
    pub fn active_agent(&self) -> Result<Option<&dyn BuildAgent>> {
        let requested = self
            .agent_override
            .as_deref()
            .or(self.config.agent.as_deref());

        if let Some(name) = requested {
            tracing::debug!("Using requested build agent '{}'", name);
            return self.registry.find_by_name(name).map(Some);
        }

        if self.config.strict_detection {
            self.registry.detect_strict()
        } else {
            Ok(self.registry.detect_active_agent())
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    env: Arc<dyn Environment>,
}

impl CommandDispatcher {
    /// Create a new dispatcher reading the process environment.
    pub fn new(working_dir: PathBuf) -> Self {
        Self::with_environment(working_dir, Arc::new(SystemEnvironment::new()))
    }

    /// Create a dispatcher reading the given environment.
    pub fn with_environment(working_dir: PathBuf, env: Arc<dyn Environment>) -> Self {
        Self { working_dir, env }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Build the context shared by all commands.
    pub fn context(&self, cli: &Cli) -> Result<CommandContext> {
        let config = load_config(cli.config.as_deref(), &self.working_dir)?;
        let registry = AgentRegistry::builtin(self.env.clone());
        Ok(CommandContext::new(config, registry).with_agent_override(cli.agent.clone()))
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let ctx = self.context(cli)?;

        match &cli.command {
            Commands::Detect(args) => super::detect::DetectCommand::new(args.clone()).execute(&ctx, out),
            Commands::Branch(args) => super::branch::BranchCommand::new(args.clone()).execute(&ctx, out),
            Commands::SetVersion(args) => {
                super::set_version::SetVersionCommand::new(args.clone()).execute(&ctx, out)
            }
            Commands::List(args) => super::list::ListCommand::new(args.clone()).execute(&ctx, out),
            Commands::Config(args) => super::config::ConfigCommand::new(args.clone()).execute(&ctx, out),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(&ctx, out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use crate::error::BuildAgentError;

    fn context(vars: &[(&str, &str)], config: BuildAgentConfig) -> CommandContext {
        let env = Arc::new(MemoryEnvironment::from_vars(vars));
        CommandContext::new(config, AgentRegistry::builtin(env))
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.working_dir(), Path::new("/test"));
    }

    #[test]
    fn dispatch_reads_settings_and_injected_environment() {
        use clap::Parser;

        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join(".buildagent.yml"), "use_prefix: true\n").unwrap();
        let env = Arc::new(MemoryEnvironment::from_vars(&[
            ("GITLAB_CI", "true"),
            ("CI_COMMIT_REF_NAME", "main"),
        ]));
        let dispatcher = CommandDispatcher::with_environment(temp.path().to_path_buf(), env);

        let cli = Cli::parse_from(["buildagent", "branch"]);
        let mut out = Vec::new();
        let result = dispatcher.dispatch(&cli, &mut out).unwrap();
        assert!(result.success);
        assert_eq!(String::from_utf8(out).unwrap(), "refs/heads/main\n");
    }

    #[test]
    fn active_agent_uses_detection() {
        let ctx = context(&[("GITLAB_CI", "true")], BuildAgentConfig::default());
        assert_eq!(ctx.active_agent().unwrap().map(|a| a.name()), Some("GitLabCi"));
    }

    #[test]
    fn override_beats_settings_and_detection() {
        let config = BuildAgentConfig {
            agent: Some("Jenkins".to_string()),
            ..BuildAgentConfig::default()
        };
        let ctx = context(&[("GITLAB_CI", "true")], config.clone());
        assert_eq!(ctx.active_agent().unwrap().map(|a| a.name()), Some("Jenkins"));

        let ctx = context(&[("GITLAB_CI", "true")], config)
            .with_agent_override(Some("teamcity".to_string()));
        assert_eq!(ctx.active_agent().unwrap().map(|a| a.name()), Some("TeamCity"));
    }

    #[test]
    fn unknown_override_is_an_error() {
        let ctx = context(&[], BuildAgentConfig::default())
            .with_agent_override(Some("Hudson".to_string()));
        assert!(matches!(
            ctx.active_agent(),
            Err(BuildAgentError::UnknownAgent { .. })
        ));
    }

    #[test]
    fn strict_settings_reject_ambiguity() {
        let config = BuildAgentConfig {
            strict_detection: true,
            ..BuildAgentConfig::default()
        };
        let ctx = context(&[("GITLAB_CI", "true"), ("TRAVIS", "true")], config);
        assert!(matches!(
            ctx.active_agent(),
            Err(BuildAgentError::AmbiguousAgent { .. })
        ));
    }
}
