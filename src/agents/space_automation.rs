//! JetBrains Space Automation.

use std::sync::Arc;

use super::BuildAgent;
use crate::environment::Environment;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// Space Automation jobs.
///
/// Space reports the ref fully qualified in `JB_SPACE_GIT_BRANCH` and the
/// value is returned as reported: branch and tag prefixes are kept even
/// when the caller asks for short names. Space has no service message
/// protocol, so nothing is emitted for versions.
pub struct SpaceAutomation {
    env: Arc<dyn Environment>,
}

impl SpaceAutomation {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "JB_SPACE_PROJECT_KEY";

    /// Variable holding the current ref.
    pub const BRANCH_VARIABLE_NAME: &'static str = "JB_SPACE_GIT_BRANCH";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for SpaceAutomation {
    fn name(&self) -> &'static str {
        "SpaceAutomation"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, _use_prefix: bool) -> Option<String> {
        normalize(self.env.get(Self::BRANCH_VARIABLE_NAME).as_deref(), true)
    }

    fn set_version_message(&self, _variables: &VersionVariables) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support;
    use crate::environment::MemoryEnvironment;

    fn setup() -> (Arc<MemoryEnvironment>, SpaceAutomation) {
        let env = test_support::env(&[(SpaceAutomation::ENVIRONMENT_VARIABLE_NAME, "true")]);
        let agent = SpaceAutomation::new(env.clone());
        (env, agent)
    }

    #[test]
    fn can_apply_when_environment_variable_is_set() {
        let (_env, agent) = setup();
        assert!(agent.can_apply_to_current_context());
    }

    #[test]
    fn cannot_apply_when_environment_variable_is_empty() {
        let (env, agent) = setup();
        env.set(SpaceAutomation::ENVIRONMENT_VARIABLE_NAME, Some(""));
        assert!(!agent.can_apply_to_current_context());
    }

    #[test]
    fn cannot_apply_when_environment_variable_is_unset() {
        let (env, agent) = setup();
        env.set(SpaceAutomation::ENVIRONMENT_VARIABLE_NAME, None);
        assert!(!agent.can_apply_to_current_context());
    }

    #[test]
    fn current_branch_handles_branches() {
        let (env, agent) = setup();
        env.set("JB_SPACE_GIT_BRANCH", Some("refs/heads/master"));
        assert_eq!(agent.current_branch(false).as_deref(), Some("refs/heads/master"));
    }

    #[test]
    fn current_branch_handles_tags() {
        let (env, agent) = setup();
        env.set("JB_SPACE_GIT_BRANCH", Some("refs/tags/1.0.0"));
        assert_eq!(agent.current_branch(false).as_deref(), Some("refs/tags/1.0.0"));
    }

    #[test]
    fn current_branch_handles_pull_requests() {
        let (env, agent) = setup();
        env.set("JB_SPACE_GIT_BRANCH", Some("refs/pull/1/merge"));
        assert_eq!(agent.current_branch(false).as_deref(), Some("refs/pull/1/merge"));
    }

    #[test]
    fn current_branch_is_none_when_unset() {
        let (_env, agent) = setup();
        assert_eq!(agent.current_branch(false), None);
    }

    #[test]
    fn set_version_message_is_empty() {
        let (_env, agent) = setup();
        let vars = VersionVariables::from_version("1.0.0");
        assert!(agent.set_version_message(&vars).is_empty());
        assert!(agent.build_log_output(&vars).is_empty());
    }
}
