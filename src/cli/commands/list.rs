//! Build agent listing.
//!
//! The `buildagent list` command shows every known build agent, its
//! detection variable and whether it matches the current environment.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::Result;

use super::dispatcher::{Command, CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct AgentEntry {
    name: &'static str,
    environment_variable: &'static str,
    detected: bool,
}

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<CommandResult> {
        let entries: Vec<AgentEntry> = ctx
            .registry
            .agents()
            .map(|agent| AgentEntry {
                name: agent.name(),
                environment_variable: agent.environment_variable(),
                detected: agent.can_apply_to_current_context(),
            })
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
            return Ok(CommandResult::success());
        }

        let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in &entries {
            let marker = if entry.detected { "*" } else { " " };
            writeln!(
                out,
                "{} {:<width$}  {}",
                marker,
                entry.name,
                entry.environment_variable,
                width = width
            )?;
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildAgentConfig;
    use crate::environment::MemoryEnvironment;
    use crate::registry::AgentRegistry;
    use std::sync::Arc;

    fn run(vars: &[(&str, &str)], json: bool) -> String {
        let env = Arc::new(MemoryEnvironment::from_vars(vars));
        let ctx = CommandContext::new(BuildAgentConfig::default(), AgentRegistry::builtin(env));
        let mut out = Vec::new();
        ListCommand::new(ListArgs { json }).execute(&ctx, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_every_agent() {
        let out = run(&[], false);
        assert_eq!(out.lines().count(), 12);
        assert!(out.contains("SpaceAutomation"));
        assert!(out.contains("JB_SPACE_PROJECT_KEY"));
    }

    #[test]
    fn marks_detected_agent() {
        let out = run(&[("DRONE", "true")], false);
        let drone = out.lines().find(|l| l.contains("Drone")).unwrap();
        assert!(drone.starts_with('*'));
        let jenkins = out.lines().find(|l| l.contains("Jenkins")).unwrap();
        assert!(jenkins.starts_with(' '));
    }

    #[test]
    fn json_output() {
        let out = run(&[("BUILDKITE", "true")], true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 12);
        let buildkite = entries.iter().find(|e| e["name"] == "Buildkite").unwrap();
        assert_eq!(buildkite["detected"], true);
    }
}
