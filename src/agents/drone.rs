//! Drone CI.

use std::sync::Arc;

use super::{branch_ref, key_value_message, tag_ref, BuildAgent};
use crate::environment::Environment;
use crate::variables::VersionVariables;

/// Drone pipelines.
///
/// For pull request builds `DRONE_BRANCH` is the target branch, so the
/// source branch is read from `DRONE_SOURCE_BRANCH` instead.
pub struct Drone {
    env: Arc<dyn Environment>,
}

impl Drone {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "DRONE";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for Drone {
    fn name(&self) -> &'static str {
        "Drone"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        if let Some(tag) = self.env.get_non_empty("DRONE_TAG") {
            return tag_ref(&tag, use_prefix);
        }
        let branch = if self.env.get_non_empty("DRONE_PULL_REQUEST").is_some() {
            self.env.get_non_empty("DRONE_SOURCE_BRANCH")
        } else {
            self.env.get_non_empty("DRONE_BRANCH")
        }?;
        branch_ref(&branch, use_prefix)
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        variables.full_sem_ver.clone()
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        vec![key_value_message(name, value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support;

    fn agent(vars: &[(&str, &str)]) -> Drone {
        Drone::new(test_support::env(vars))
    }

    #[test]
    fn detects_drone() {
        assert!(agent(&[("DRONE", "true")]).can_apply_to_current_context());
        assert!(!agent(&[]).can_apply_to_current_context());
    }

    #[test]
    fn current_branch_for_push_build() {
        let agent = agent(&[("DRONE_BRANCH", "main")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("main"));
    }

    #[test]
    fn current_branch_for_pull_request_uses_source_branch() {
        let agent = agent(&[
            ("DRONE_PULL_REQUEST", "7"),
            ("DRONE_BRANCH", "main"),
            ("DRONE_SOURCE_BRANCH", "feature/y"),
        ]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("feature/y"));
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/heads/feature/y"));
    }

    #[test]
    fn current_branch_for_tag_build() {
        let agent = agent(&[("DRONE_TAG", "v3"), ("DRONE_BRANCH", "main")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("v3"));
    }

    #[test]
    fn qualified_tag_is_not_prefixed_twice() {
        let agent = agent(&[("DRONE_TAG", "refs/tags/1.0.0")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("1.0.0"));
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/tags/1.0.0"));
    }

    #[test]
    fn bare_tag_gets_tag_prefix() {
        let agent = agent(&[("DRONE_TAG", "1.0.0")]);
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/tags/1.0.0"));
    }

    #[test]
    fn qualified_branch_and_pull_request_refs_are_kept() {
        let branch = agent(&[("DRONE_BRANCH", "refs/heads/master")]);
        assert_eq!(branch.current_branch(true).as_deref(), Some("refs/heads/master"));
        assert_eq!(branch.current_branch(false).as_deref(), Some("master"));

        let pull_request = agent(&[("DRONE_BRANCH", "refs/pull/1/merge")]);
        assert_eq!(pull_request.current_branch(true).as_deref(), Some("refs/pull/1/merge"));
        assert_eq!(pull_request.current_branch(false).as_deref(), Some("refs/pull/1/merge"));
    }

    #[test]
    fn set_version_message_is_full_sem_ver() {
        let vars = VersionVariables::from_version("0.9.1");
        assert_eq!(agent(&[]).set_version_message(&vars), "0.9.1");
    }
}
