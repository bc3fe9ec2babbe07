//! GitLab CI/CD.

use std::sync::Arc;

use super::{branch_ref, key_value_message, tag_ref, BuildAgent};
use crate::environment::Environment;
use crate::variables::VersionVariables;

/// GitLab CI/CD pipelines.
///
/// GitLab reports bare names: `CI_COMMIT_TAG` for tag pipelines and
/// `CI_COMMIT_REF_NAME` otherwise.
pub struct GitLabCi {
    env: Arc<dyn Environment>,
}

impl GitLabCi {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "GITLAB_CI";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for GitLabCi {
    fn name(&self) -> &'static str {
        "GitLabCi"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        if let Some(tag) = self.env.get_non_empty("CI_COMMIT_TAG") {
            return tag_ref(&tag, use_prefix);
        }
        let branch = self.env.get_non_empty("CI_COMMIT_REF_NAME")?;
        branch_ref(&branch, use_prefix)
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        variables.full_sem_ver.clone()
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        vec![key_value_message(name, value)]
    }
}
