//! In-memory environment.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::Environment;

/// Environment backed by a map instead of the process environment.
///
/// Interior mutability lets one instance be shared behind an
/// `Arc<dyn Environment>` between a test and the agents it drives.
///
/// # Example
///
/// ```
/// use buildagent::environment::{Environment, MemoryEnvironment};
///
/// let env = MemoryEnvironment::new();
/// env.set("TEAMCITY_VERSION", Some("2024.1"));
/// assert_eq!(env.get("TEAMCITY_VERSION").as_deref(), Some("2024.1"));
///
/// env.set("TEAMCITY_VERSION", None);
/// assert_eq!(env.get("TEAMCITY_VERSION"), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    vars: Mutex<HashMap<String, String>>,
}

impl MemoryEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment pre-populated with the given variables.
    pub fn from_vars(vars: &[(&str, &str)]) -> Self {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            vars: Mutex::new(map),
        }
    }

    /// Remove every variable.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of variables currently set.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.vars.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Environment for MemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    fn set(&self, name: &str, value: Option<&str>) {
        let mut vars = self.lock();
        match value {
            Some(value) => {
                vars.insert(name.to_string(), value.to_string());
            }
            None => {
                vars.remove(name);
            }
        }
    }
}
