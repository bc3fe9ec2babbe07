//! Settings display.
//!
//! The `buildagent config` command shows the resolved settings.

use std::io::Write;

use crate::cli::args::ConfigArgs;
use crate::error::Result;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(args: ConfigArgs) -> Self {
        Self { args }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<CommandResult> {
        let mut config = ctx.config.clone();
        if ctx.agent_override.is_some() {
            config.agent = ctx.agent_override.clone();
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&config).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            let yaml = serde_yaml::to_string(&config).map_err(anyhow::Error::from)?;
            write!(out, "{}", yaml)?;
        }

        Ok(CommandResult::success())
    }
}
