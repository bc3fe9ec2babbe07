//! Process environment.

use super::Environment;

/// Environment backed by the real process environment.
///
/// Process environment variables are global state with no locking of
/// their own. Callers that mutate them from several threads must
/// serialize access themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    /// Create a handle to the process environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        // Non-UTF-8 values are converted lossily rather than treated as unset.
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }

    fn set(&self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
}
