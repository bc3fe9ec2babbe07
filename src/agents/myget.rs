//! MyGet build services.

use std::sync::Arc;

use super::teamcity::escape_service_message;
use super::BuildAgent;
use crate::environment::Environment;
use crate::variables::VersionVariables;

/// MyGet build services.
///
/// MyGet sets `BuildRunner=MyGet`, so detection compares the value rather
/// than only checking presence. Messages use TeamCity's syntax under a
/// `##myget` prefix.
pub struct MyGet {
    env: Arc<dyn Environment>,
}

impl MyGet {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "BuildRunner";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl BuildAgent for MyGet {
    fn name(&self) -> &'static str {
        "MyGet"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn can_apply_to_current_context(&self) -> bool {
        self.env
            .get(Self::ENVIRONMENT_VARIABLE_NAME)
            .is_some_and(|runner| runner.trim().eq_ignore_ascii_case("MyGet"))
    }

    fn current_branch(&self, _use_prefix: bool) -> Option<String> {
        None
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        format!(
            "##myget[buildNumber '{}']",
            escape_service_message(&variables.full_sem_ver)
        )
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        vec![format!(
            "##myget[setParameter name='GitVersion.{}' value='{}']",
            name,
            escape_service_message(value)
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support;

    fn agent(vars: &[(&str, &str)]) -> MyGet {
        MyGet::new(test_support::env(vars))
    }

    #[test]
    fn detection_requires_myget_runner() {
        assert!(agent(&[("BuildRunner", "MyGet")]).can_apply_to_current_context());
        assert!(agent(&[("BuildRunner", "myget")]).can_apply_to_current_context());
        assert!(!agent(&[("BuildRunner", "Jenkins")]).can_apply_to_current_context());
        assert!(!agent(&[("BuildRunner", "")]).can_apply_to_current_context());
        assert!(!agent(&[]).can_apply_to_current_context());
    }

    #[test]
    fn messages_are_escaped() {
        let agent = agent(&[]);
        let vars = VersionVariables::from_version("1.0.0");
        assert_eq!(agent.set_version_message(&vars), "##myget[buildNumber '1.0.0']");
        assert_eq!(
            agent.set_parameter_messages("Foo", "it's [x]"),
            vec!["##myget[setParameter name='GitVersion.Foo' value='it|'s |[x|]']"]
        );
    }
}
