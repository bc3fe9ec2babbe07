//! JetBrains TeamCity.

use std::sync::Arc;

use super::BuildAgent;
use crate::environment::Environment;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// Escape a value for a TeamCity-style `##name[...]` service message.
///
/// Shared with MyGet, which speaks the same syntax.
pub(crate) fn escape_service_message(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => escaped.push_str("||"),
            '\'' => escaped.push_str("|'"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// TeamCity builds.
///
/// The branch comes from `Git_Branch`, which TeamCity only exposes when
/// the build configuration declares it as a parameter.
pub struct TeamCity {
    env: Arc<dyn Environment>,
}

impl TeamCity {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "TEAMCITY_VERSION";

    /// Variable holding the current ref.
    pub const BRANCH_VARIABLE_NAME: &'static str = "Git_Branch";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for TeamCity {
    fn name(&self) -> &'static str {
        "TeamCity"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        let branch = self.env.get_non_empty(Self::BRANCH_VARIABLE_NAME);
        if branch.is_none() {
            tracing::warn!(
                "TeamCity doesn't expose the branch by default. Add a '{}' parameter set to '%teamcity.build.vcs.branch.<vcsid>%'",
                Self::BRANCH_VARIABLE_NAME
            );
        }
        normalize(branch.as_deref(), use_prefix)
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        format!(
            "##teamcity[buildNumber '{}']",
            escape_service_message(&variables.full_sem_ver)
        )
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        let value = escape_service_message(value);
        vec![
            format!(
                "##teamcity[setParameter name='GitVersion.{}' value='{}']",
                name, value
            ),
            format!(
                "##teamcity[setParameter name='system.GitVersion.{}' value='{}']",
                name, value
            ),
        ]
    }
}
