//! Current ref reporting.
//!
//! The `buildagent branch` command prints the normalized branch, tag or
//! pull request ref reported by the active build agent.

use std::io::Write;

use crate::cli::args::BranchArgs;
use crate::error::Result;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The branch command implementation.
pub struct BranchCommand {
    args: BranchArgs,
}

impl BranchCommand {
    /// Create a new branch command.
    pub fn new(args: BranchArgs) -> Self {
        Self { args }
    }
}

impl Command for BranchCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<CommandResult> {
        let Some(agent) = ctx.active_agent()? else {
            tracing::warn!("No build agent detected");
            return Ok(CommandResult::failure(CommandResult::NOT_DETECTED));
        };

        let use_prefix = self.args.prefix || ctx.config.use_prefix;
        match agent.current_branch(use_prefix) {
            Some(branch) => {
                writeln!(out, "{}", branch)?;
                Ok(CommandResult::success())
            }
            None => {
                tracing::warn!("Build agent '{}' does not report the current branch", agent.name());
                Ok(CommandResult::failure(CommandResult::NOT_DETECTED))
            }
        }
    }
}
