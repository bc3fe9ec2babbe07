//! Continua CI.

use std::sync::Arc;

use super::teamcity::escape_service_message;
use super::BuildAgent;
use crate::environment::Environment;
use crate::variables::VersionVariables;

/// Continua CI builds.
///
/// Continua does not expose the branch through the environment.
pub struct ContinuaCi {
    env: Arc<dyn Environment>,
}

impl ContinuaCi {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "ContinuaCI.Version";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for ContinuaCi {
    fn name(&self) -> &'static str {
        "ContinuaCi"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, _use_prefix: bool) -> Option<String> {
        None
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        format!(
            "@@continua[setBuildVersion value='{}']",
            escape_service_message(&variables.full_sem_ver)
        )
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        vec![format!(
            "@@continua[setVariable name='GitVersion_{}' value='{}' skipIfNotDefined='true']",
            name,
            escape_service_message(value)
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support;

    #[test]
    fn detects_continua() {
        let env = test_support::env(&[("ContinuaCI.Version", "1.9")]);
        assert!(ContinuaCi::new(env).can_apply_to_current_context());
    }

    #[test]
    fn branch_is_never_reported() {
        let agent = ContinuaCi::new(test_support::env(&[("ContinuaCI.Version", "1.9")]));
        assert_eq!(agent.current_branch(false), None);
    }

    #[test]
    fn messages_use_continua_syntax() {
        let agent = ContinuaCi::new(test_support::env(&[]));
        let vars = VersionVariables::from_version("0.0.0-Unstable4");
        assert_eq!(
            agent.set_version_message(&vars),
            "@@continua[setBuildVersion value='0.0.0-Unstable4']"
        );
        assert_eq!(
            agent.set_parameter_messages("Foo", "0.8.0-unstable568"),
            vec!["@@continua[setVariable name='GitVersion_Foo' value='0.8.0-unstable568' skipIfNotDefined='true']"]
        );
    }

    #[test]
    fn values_are_escaped() {
        let agent = ContinuaCi::new(test_support::env(&[]));
        assert_eq!(
            agent.set_parameter_messages("BranchName", "a']\n@@continua[x]"),
            vec!["@@continua[setVariable name='GitVersion_BranchName' value='a|'|]|n@@continua|[x|]' skipIfNotDefined='true']"]
        );
    }
}
