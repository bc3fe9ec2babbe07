//! Buildkite.

use std::sync::Arc;

use super::{is_pull_request_number, BuildAgent};
use crate::environment::Environment;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// Buildkite pipelines.
///
/// `BUILDKITE_PULL_REQUEST` is either `false` or the pull request number.
/// Pull request builds report `refs/pull/<n>/head` instead of the branch.
/// Buildkite has no service messages, so nothing is emitted for versions.
pub struct Buildkite {
    env: Arc<dyn Environment>,
}

impl Buildkite {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "BUILDKITE";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for Buildkite {
    fn name(&self) -> &'static str {
        "Buildkite"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        let pull_request = self.env.get("BUILDKITE_PULL_REQUEST").unwrap_or_default();
        if is_pull_request_number(&pull_request) {
            return normalize(Some(&format!("refs/pull/{}/head", pull_request)), use_prefix);
        }
        normalize(self.env.get("BUILDKITE_BRANCH").as_deref(), use_prefix)
    }

    fn set_version_message(&self, _variables: &VersionVariables) -> String {
        String::new()
    }
}
