//! Build agents.
//!
//! Each supported CI provider implements [`BuildAgent`]. An agent knows
//! three things about its provider:
//!
//! - how to tell it is running there ([`BuildAgent::can_apply_to_current_context`])
//! - where the provider exposes the current ref ([`BuildAgent::current_branch`])
//! - how to hand a computed version back ([`BuildAgent::set_version_message`],
//!   [`BuildAgent::set_parameter_messages`], [`BuildAgent::write_integration`])
//!
//! Agents only read the environment. None of these methods return errors
//! for "not applicable": a provider that is absent answers `false`, a ref
//! that is missing is `None` and a provider without a message protocol
//! returns an empty string.

pub mod azure_pipelines;
pub mod bitbucket_pipelines;
pub mod buildkite;
pub mod continua_ci;
pub mod drone;
pub mod github_actions;
pub mod gitlab_ci;
pub mod jenkins;
pub mod myget;
pub mod space_automation;
pub mod teamcity;
pub mod travis_ci;

pub use azure_pipelines::AzurePipelines;
pub use bitbucket_pipelines::BitbucketPipelines;
pub use buildkite::Buildkite;
pub use continua_ci::ContinuaCi;
pub use drone::Drone;
pub use github_actions::GitHubActions;
pub use gitlab_ci::GitLabCi;
pub use jenkins::Jenkins;
pub use myget::MyGet;
pub use space_automation::SpaceAutomation;
pub use teamcity::TeamCity;
pub use travis_ci::TravisCi;

use crate::environment::Environment;
use crate::error::Result;
use crate::refs::{normalize, GitRef, RefKind, BRANCH_PREFIX, TAG_PREFIX};
use crate::variables::VersionVariables;

/// A CI provider adapter.
pub trait BuildAgent: Send + Sync {
    /// Stable provider name.
    fn name(&self) -> &'static str;

    /// The variable whose presence signals this provider.
    fn environment_variable(&self) -> &'static str;

    /// The environment this agent reads from.
    fn environment(&self) -> &dyn Environment;

    /// Check whether the tool is running under this provider.
    ///
    /// True iff the detection variable is set to a non-blank value.
    fn can_apply_to_current_context(&self) -> bool {
        self.environment().is_truthy(self.environment_variable())
    }

    /// The current branch, tag or pull request ref, normalized.
    ///
    /// Re-reads the environment on every call.
    fn current_branch(&self, use_prefix: bool) -> Option<String>;

    /// The message that sets the build number, or an empty string if the
    /// provider has no such mechanism.
    fn set_version_message(&self, variables: &VersionVariables) -> String;

    /// Messages that publish a single variable to the provider.
    fn set_parameter_messages(&self, _name: &str, _value: &str) -> Vec<String> {
        Vec::new()
    }

    /// Parameter messages for every variable, in declaration order.
    fn build_log_output(&self, variables: &VersionVariables) -> Vec<String> {
        variables
            .iter()
            .flat_map(|(name, value)| self.set_parameter_messages(name, value))
            .collect()
    }

    /// Write everything the provider needs to register a version.
    ///
    /// The default writes the set-version message (when `update_build_number`
    /// is set) followed by [`build_log_output`](Self::build_log_output).
    /// Empty messages are skipped.
    fn write_integration(
        &self,
        variables: &VersionVariables,
        writer: &mut dyn FnMut(&str),
        update_build_number: bool,
    ) -> Result<()> {
        if update_build_number {
            tracing::info!("Executing set version message for '{}'", self.name());
            let message = self.set_version_message(variables);
            if !message.is_empty() {
                writer(&message);
            }
        }

        tracing::info!("Executing build log output for '{}'", self.name());
        for message in self.build_log_output(variables) {
            if !message.is_empty() {
                writer(&message);
            }
        }

        Ok(())
    }

    /// Whether remotes other than the build's own should be removed before
    /// inspecting the repository.
    fn should_clean_up_remotes(&self) -> bool {
        false
    }
}

/// Normalize a branch name reported by a provider.
///
/// Bare names get `refs/heads/`. Values that already are branch, tag or
/// pull request refs are normalized as they are.
pub(crate) fn branch_ref(name: &str, use_prefix: bool) -> Option<String> {
    qualify(name, BRANCH_PREFIX, use_prefix)
}

/// Normalize a tag name reported by a provider.
///
/// Bare names get `refs/tags/`; qualified refs are kept.
pub(crate) fn tag_ref(name: &str, use_prefix: bool) -> Option<String> {
    qualify(name, TAG_PREFIX, use_prefix)
}

fn qualify(name: &str, prefix: &str, use_prefix: bool) -> Option<String> {
    match GitRef::parse(name)?.kind() {
        RefKind::Other => normalize(Some(&format!("{}{}", prefix, name)), use_prefix),
        RefKind::Branch | RefKind::Tag | RefKind::PullRequest => normalize(Some(name), use_prefix),
    }
}

/// `GitVersion_<name>=<value>`, the plain key/value form several providers read.
pub(crate) fn key_value_message(name: &str, value: &str) -> String {
    format!("GitVersion_{}={}", name, value)
}

/// Check whether a value is a pull request number.
pub(crate) fn is_pull_request_number(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
