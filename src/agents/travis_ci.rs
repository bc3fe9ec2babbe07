//! Travis CI.

use std::sync::Arc;

use super::{branch_ref, is_pull_request_number, key_value_message, tag_ref, BuildAgent};
use crate::environment::Environment;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// Travis CI builds.
pub struct TravisCi {
    env: Arc<dyn Environment>,
}

impl TravisCi {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "TRAVIS";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for TravisCi {
    fn name(&self) -> &'static str {
        "TravisCi"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        // TRAVIS_PULL_REQUEST is "false" outside pull request builds.
        let pull_request = self.env.get("TRAVIS_PULL_REQUEST").unwrap_or_default();
        if is_pull_request_number(&pull_request) {
            return normalize(Some(&format!("refs/pull/{}/merge", pull_request)), use_prefix);
        }
        if let Some(tag) = self.env.get_non_empty("TRAVIS_TAG") {
            return tag_ref(&tag, use_prefix);
        }
        let branch = self.env.get_non_empty("TRAVIS_BRANCH")?;
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

    fn agent(vars: &[(&str, &str)]) -> TravisCi {
        TravisCi::new(test_support::env(vars))
    }

    #[test]
    fn detects_travis() {
        assert!(agent(&[("TRAVIS", "true")]).can_apply_to_current_context());
        assert!(!agent(&[("TRAVIS", "")]).can_apply_to_current_context());
    }

    #[test]
    fn current_branch_for_branch_build() {
        let agent = agent(&[("TRAVIS_BRANCH", "main"), ("TRAVIS_PULL_REQUEST", "false")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("main"));
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/heads/main"));
    }

    #[test]
    fn current_branch_for_tag_build() {
        let agent = agent(&[("TRAVIS_BRANCH", "2.0.0"), ("TRAVIS_TAG", "2.0.0")]);
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/tags/2.0.0"));
    }

    #[test]
    fn qualified_tag_is_not_prefixed_twice() {
        let agent = agent(&[("TRAVIS_TAG", "refs/tags/1.0.0"), ("TRAVIS_PULL_REQUEST", "false")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("1.0.0"));
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/tags/1.0.0"));
    }

    #[test]
    fn qualified_branch_is_kept() {
        let agent = agent(&[("TRAVIS_BRANCH", "refs/heads/master")]);
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/heads/master"));
        assert_eq!(agent.current_branch(false).as_deref(), Some("master"));
    }

    #[test]
    fn current_branch_for_pull_request_build() {
        let agent = agent(&[("TRAVIS_BRANCH", "main"), ("TRAVIS_PULL_REQUEST", "9")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("refs/pull/9/merge"));
    }

    #[test]
    fn messages_are_plain_key_values() {
        let vars = VersionVariables::from_version("1.4.0");
        assert_eq!(agent(&[]).set_version_message(&vars), "1.4.0");
        assert_eq!(agent(&[]).set_parameter_messages("Major", "1"), vec!["GitVersion_Major=1"]);
    }
}
