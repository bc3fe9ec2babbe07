//! Version reporting.
//!
//! The `buildagent set-version` command writes the messages that register
//! a computed version with the active build agent.

use std::io::Write;

use crate::cli::args::SetVersionArgs;
use crate::error::Result;
use crate::output::VersionOutput;
use crate::variables::VersionVariables;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The set-version command implementation.
pub struct SetVersionCommand {
    args: SetVersionArgs,
}

impl SetVersionCommand {
    /// Create a new set-version command.
    pub fn new(args: SetVersionArgs) -> Self {
        Self { args }
    }

    fn load_variables(&self) -> Result<VersionVariables> {
        match (&self.args.variables, &self.args.semver) {
            (Some(path), _) => VersionVariables::from_file(path),
            (None, Some(version)) => Ok(VersionVariables::from_version(version)),
            (None, None) => Ok(VersionVariables::default()),
        }
    }
}

impl Command for SetVersionCommand {
    fn execute(&self, ctx: &CommandContext, out: &mut dyn Write) -> Result<CommandResult> {
        let variables = self.load_variables()?;

        let Some(agent) = ctx.active_agent()? else {
            tracing::warn!("No build agent detected, nothing to report");
            return Ok(CommandResult::success());
        };

        let update_build_number = ctx.config.update_build_number && !self.args.no_build_number;
        let mut output = VersionOutput::new(out);
        output.write_integration(agent, &variables, update_build_number)?;

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

    fn run(vars: &[(&str, &str)], args: SetVersionArgs) -> String {
        let env = Arc::new(MemoryEnvironment::from_vars(vars));
        let ctx = CommandContext::new(BuildAgentConfig::default(), AgentRegistry::builtin(env));
        let mut out = Vec::new();
        let result = SetVersionCommand::new(args).execute(&ctx, &mut out).unwrap();
        assert!(result.success);
        String::from_utf8(out).unwrap()
    }

    fn semver(version: &str) -> SetVersionArgs {
        SetVersionArgs {
            semver: Some(version.to_string()),
            ..SetVersionArgs::default()
        }
    }

    #[test]
    fn writes_teamcity_messages() {
        let out = run(&[("TEAMCITY_VERSION", "1")], semver("1.2.3"));
        let first = out.lines().next().unwrap();
        assert_eq!(first, "##teamcity[buildNumber '1.2.3']");
        assert!(out.contains("##teamcity[setParameter name='GitVersion.SemVer' value='1.2.3']"));
    }

    #[test]
    fn no_build_number_skips_set_version_message() {
        let args = SetVersionArgs {
            no_build_number: true,
            ..semver("1.2.3")
        };
        let out = run(&[("TEAMCITY_VERSION", "1")], args);
        assert!(!out.contains("buildNumber"));
    }

    #[test]
    fn space_writes_nothing() {
        let out = run(&[("JB_SPACE_PROJECT_KEY", "key")], semver("1.0.0"));
        assert!(out.is_empty());
    }

    #[test]
    fn no_agent_writes_nothing() {
        let out = run(&[], semver("1.0.0"));
        assert!(out.is_empty());
    }

    #[test]
    fn reads_variables_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"FullSemVer":"5.0.0-rc.1+3","SemVer":"5.0.0-rc.1"}"#).unwrap();
        let args = SetVersionArgs {
            variables: Some(file.path().to_path_buf()),
            ..SetVersionArgs::default()
        };
        let out = run(&[("TF_BUILD", "True")], args);
        assert!(out.starts_with("##vso[build.updatebuildnumber]5.0.0-rc.1+3\n"));
    }
}
