//! Settings file schema.
//!
//! Maps the `.buildagent.yml` settings file.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Root settings structure for `.buildagent.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildAgentConfig {
    /// Use this agent instead of auto-detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Fail when more than one agent matches instead of taking the first.
    #[serde(skip_serializing_if = "is_false")]
    pub strict_detection: bool,

    /// Emit the set-version message along with the variables.
    #[serde(default = "default_true")]
    pub update_build_number: bool,

    /// Keep `refs/heads/` and `refs/tags/` prefixes on reported refs.
    #[serde(skip_serializing_if = "is_false")]
    pub use_prefix: bool,
}

impl Default for BuildAgentConfig {
    fn default() -> Self {
        Self {
            agent: None,
            strict_detection: false,
            update_build_number: true,
            use_prefix: false,
        }
    }
}
