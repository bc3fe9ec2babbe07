//! Environment variable access.
//!
//! Build agents never call `std::env` directly. They read through the
//! [`Environment`] trait so tests can substitute a [`MemoryEnvironment`]
//! instead of mutating process state.
//!
//! Absence and emptiness are different answers: [`Environment::get`]
//! returns `None` for an unset variable and `Some("")` for one that is
//! set to the empty string.

pub mod memory;
pub mod system;

pub use memory::MemoryEnvironment;
pub use system::SystemEnvironment;

/// Read/write access to named environment variables.
pub trait Environment: Send + Sync {
    /// Get the value of a variable, `None` if it is unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Set a variable. `None` unsets it.
    fn set(&self, name: &str, value: Option<&str>);

    /// Check whether a variable is set to something other than whitespace.
    fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.trim().is_empty())
    }

    /// Get a variable only if it holds a non-blank value.
    fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }
}
