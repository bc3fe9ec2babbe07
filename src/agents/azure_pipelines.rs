//! Azure Pipelines (formerly VSTS / TFS build).

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use super::BuildAgent;
use crate::environment::Environment;
use crate::refs::normalize;
use crate::variables::VersionVariables;

/// `$(GITVERSION_FullSemVer)` or `$(GitVersion.SemVer)` tokens in a build number format.
static VARIABLE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\(GITVERSION[._](?P<name>[A-Za-z]+)\)").expect("token pattern is valid")
});

/// Escape the data part of a `##vso[...]` logging command.
///
/// A raw line break would end the command and start a new one.
fn escape_logging_data(value: &str) -> String {
    value
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Azure Pipelines builds.
///
/// When `BUILD_BUILDNUMBER` still holds `$(GITVERSION_<name>)` tokens from
/// the pipeline's build number format, they are substituted with the
/// computed values; otherwise the build number becomes `FullSemVer`.
pub struct AzurePipelines {
    env: Arc<dyn Environment>,
}

impl AzurePipelines {
    /// Detection variable.
    pub const ENVIRONMENT_VARIABLE_NAME: &'static str = "TF_BUILD";

    /// Variable holding the current ref.
    pub const BRANCH_VARIABLE_NAME: &'static str = "BUILD_SOURCEBRANCH";

    /// Variable holding the build number format.
    pub const BUILD_NUMBER_VARIABLE_NAME: &'static str = "BUILD_BUILDNUMBER";

    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    fn substitute_tokens(format: &str, variables: &VersionVariables) -> String {
        VARIABLE_TOKEN
            .replace_all(format, |caps: &Captures<'_>| match variables.get(&caps["name"]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl BuildAgent for AzurePipelines {
    fn name(&self) -> &'static str {
        "AzurePipelines"
    }

    fn environment_variable(&self) -> &'static str {
        Self::ENVIRONMENT_VARIABLE_NAME
    }

    fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    fn current_branch(&self, use_prefix: bool) -> Option<String> {
        normalize(self.env.get(Self::BRANCH_VARIABLE_NAME).as_deref(), use_prefix)
    }

    fn set_version_message(&self, variables: &VersionVariables) -> String {
        let build_number = match self.env.get_non_empty(Self::BUILD_NUMBER_VARIABLE_NAME) {
            Some(format) => {
                let substituted = Self::substitute_tokens(&format, variables);
                if substituted != format {
                    substituted
                } else {
                    variables.full_sem_ver.clone()
                }
            }
            None => variables.full_sem_ver.clone(),
        };
        format!(
            "##vso[build.updatebuildnumber]{}",
            escape_logging_data(&build_number)
        )
    }

    fn set_parameter_messages(&self, name: &str, value: &str) -> Vec<String> {
        let value = escape_logging_data(value);
        vec![
            format!("##vso[task.setvariable variable=GitVersion.{}]{}", name, value),
            format!(
                "##vso[task.setvariable variable=GitVersion.{};isOutput=true]{}",
                name, value
            ),
        ]
    }
}
