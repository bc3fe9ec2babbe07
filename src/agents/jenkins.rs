//! Jenkins.

use std::sync::Arc;

use super::{key_value_message, BuildAgent};
use crate::environment::Environment;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// Jenkins jobs, freestyle and pipeline.
///
/// Multibranch pipelines set `BRANCH_NAME` (and `CHANGE_BRANCH` for pull
/// requests); freestyle jobs using the git plugin set `GIT_LOCAL_BRANCH`
/// or `GIT_BRANCH`. The first non-empty one wins.
pub struct Jenkins {
    env: Arc<dyn Environment>,
}

impl Jenkins {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "JENKINS_URL";

    /// Branch variables in lookup order.
    pub const BRANCH_VARIABLE_NAMES: &'static [&'static str] =
        &["CHANGE_BRANCH", "BRANCH_NAME", "GIT_LOCAL_BRANCH", "GIT_BRANCH"];

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    fn is_pipeline_as_code(&self) -> bool {
        self.env.get_non_empty("BRANCH_NAME").is_some()
    }
}

impl BuildAgent for Jenkins {
    fn name(&self) -> &'static str {
        "Jenkins"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        let branch = Self::BRANCH_VARIABLE_NAMES
            .iter()
            .find_map(|name| self.env.get_non_empty(name));
        normalize(branch.as_deref(), use_prefix)
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        variables.full_sem_ver.clone()
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        vec![key_value_message(name, value)]
    }

    fn should_clean_up_remotes(&self) -> bool {
        // Pipeline checkouts leave extra remotes behind.
        self.is_pipeline_as_code()
    }
}
