//! Bitbucket Pipelines.

use std::sync::Arc;

use super::{branch_ref, tag_ref, BuildAgent};
use crate::environment::Environment;
use crate::variables::VersionVariables;

/// Bitbucket Pipelines.
///
/// Bitbucket sets `BITBUCKET_BRANCH` for branch builds and
/// `BITBUCKET_TAG` for tag builds, both as bare names. Variables are
/// printed as `export` lines so a step can `source` them.
pub struct BitbucketPipelines {
    env: Arc<dyn Environment>,
}

impl BitbucketPipelines {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "BITBUCKET_WORKSPACE";

    /// Variable holding the branch name.
    pub const BRANCH_VARIABLE_NAME: &'static str = "BITBUCKET_BRANCH";

    /// Variable holding the tag name.
    pub const TAG_VARIABLE_NAME: &'static str = "BITBUCKET_TAG";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for BitbucketPipelines {
    fn name(&self) -> &'static str {
        "BitbucketPipelines"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        if let Some(branch) = self.env.get_non_empty(Self::BRANCH_VARIABLE_NAME) {
            return branch_ref(&branch, use_prefix);
        }
        let tag = self.env.get_non_empty(Self::TAG_VARIABLE_NAME)?;
        tag_ref(&tag, use_prefix)
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        variables.full_sem_ver.clone()
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        vec![format!(
            "export GITVERSION_{}={}",
            name.to_uppercase(),
            value
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support;

    fn agent(vars: &[(&str, &str)]) -> BitbucketPipelines {
        BitbucketPipelines::new(test_support::env(vars))
    }

    #[test]
    fn detects_workspace() {
        assert!(agent(&[("BITBUCKET_WORKSPACE", "acme")]).can_apply_to_current_context());
        assert!(!agent(&[("BITBUCKET_WORKSPACE", "")]).can_apply_to_current_context());
    }

    #[test]
    fn current_branch_from_branch_variable() {
        let agent = agent(&[("BITBUCKET_BRANCH", "develop")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("develop"));
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/heads/develop"));
    }

    #[test]
    fn current_branch_from_tag_variable() {
        let agent = agent(&[("BITBUCKET_TAG", "v1.0.0")]);
        assert_eq!(agent.current_branch(false).as_deref(), Some("v1.0.0"));
        assert_eq!(agent.current_branch(true).as_deref(), Some("refs/tags/v1.0.0"));
    }

    #[test]
    fn qualified_refs_are_not_prefixed_twice() {
        let branch = agent(&[("BITBUCKET_BRANCH", "refs/heads/master")]);
        assert_eq!(branch.current_branch(true).as_deref(), Some("refs/heads/master"));

        let tag = agent(&[("BITBUCKET_TAG", "refs/tags/1.0.0")]);
        assert_eq!(tag.current_branch(true).as_deref(), Some("refs/tags/1.0.0"));

        let pull_request = agent(&[("BITBUCKET_BRANCH", "refs/pull/1/merge")]);
        assert_eq!(pull_request.current_branch(true).as_deref(), Some("refs/pull/1/merge"));
        assert_eq!(pull_request.current_branch(false).as_deref(), Some("refs/pull/1/merge"));
    }

    #[test]
    fn current_branch_is_none_without_either() {
        assert_eq!(agent(&[("BITBUCKET_WORKSPACE", "acme")]).current_branch(true), None);
    }

    #[test]
    fn parameter_messages_are_exports() {
        assert_eq!(
            agent(&[]).set_parameter_messages("FullSemVer", "1.0.0"),
            vec!["export GITVERSION_FULLSEMVER=1.0.0"]
        );
    }
}
