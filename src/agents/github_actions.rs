//! GitHub Actions.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;

use super::{key_value_message, BuildAgent};
use crate::environment::Environment;
use crate::error::Result;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// GitHub Actions workflows.
///
/// Actions has no log command for the run name, so the set-version
/// message is empty. Variables are published by appending
/// `GitVersion_<name>=<value>` lines to the file named by `GITHUB_ENV`,
/// which makes them visible to later steps of the job.
pub struct GitHubActions {
    env: Arc<dyn Environment>,
}

impl GitHubActions {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "GITHUB_ACTIONS";

    /// Variable holding the current ref.
    pub const BRANCH_VARIABLE_NAME: &'static str = "GITHUB_REF";

    /// Variable naming the file that later steps load as environment.
    pub const SET_ENV_FILE_VARIABLE_NAME: &'static str = "GITHUB_ENV";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for GitHubActions {
    fn name(&self) -> &'static str {
        "GitHubActions"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        normalize(self.env.get(Self::BRANCH_VARIABLE_NAME).as_deref(), use_prefix)
    }

    fn set_version_message(&self, _variables: &VersionVariables) -> String {
        String::new()
    }

    fn write_integration(
        &self,
        variables: &VersionVariables,
        _writer: &mut dyn FnMut(&str),
        _update_build_number: bool,
    ) -> Result<()> {
        let Some(path) = self.env.get_non_empty(Self::SET_ENV_FILE_VARIABLE_NAME) else {
            tracing::warn!(
                "Unable to write version variables to ${} because the environment variable is not set",
                Self::SET_ENV_FILE_VARIABLE_NAME
            );
            return Ok(());
        };

        tracing::info!(
            "Writing version variables to ${} file for '{}'",
            Self::SET_ENV_FILE_VARIABLE_NAME,
            self.name()
        );

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        for (name, value) in variables.iter().filter(|(_, value)| !value.is_empty()) {
            writeln!(file, "{}", key_value_message(name, value))?;
        }

        Ok(())
    }
}
