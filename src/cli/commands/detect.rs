//! Active build agent detection.
//!
//! The `buildagent detect` command prints the name of the build agent
//! this process is running under.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::DetectArgs;
use crate::error::Result;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Detection result as printed by `detect --json`.
#[derive(Debug, Serialize)]
struct DetectionReport<'a> {
    agent: &'a str,
    environment_variable: &'a str,
    branch: Option<String>,
}

/// The detect command implementation.
pub struct DetectCommand {
    args: DetectArgs,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(args: DetectArgs) -> Self {
        Self { args }
    }
}

impl Command for DetectCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<CommandResult> {
        let Some(agent) = ctx.active_agent()? else {
            tracing::warn!("No build agent detected");
            if self.args.json {
                writeln!(out, "null")?;
            }
            return Ok(CommandResult::failure(CommandResult::NOT_DETECTED));
        };

        if self.args.json {
            let report = DetectionReport {
                agent: agent.name(),
                environment_variable: agent.environment_variable(),
                branch: agent.current_branch(ctx.config.use_prefix),
            };
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            writeln!(out, "{}", agent.name())?;
        }

        Ok(CommandResult::success())
    }
}
