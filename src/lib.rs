//! buildagent - Build agent detection and version reporting.
//!
//! buildagent figures out which CI system is running the current process,
//! reports the branch, tag or pull request being built, and writes the
//! service messages that register a computed version with that system.
//!
//! # Modules
//!
//! - [`agents`] - One [`BuildAgent`] per supported CI provider
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading
//! - [`environment`] - Environment variable access
//! - [`error`] - Error types and result aliases
//! - [`output`] - Writing version messages to the CI log
//! - [`refs`] - Git ref normalization
//! - [`registry`] - Active build agent selection
//! - [`variables`] - Computed version variables
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use buildagent::environment::MemoryEnvironment;
//! use buildagent::{AgentRegistry, VersionVariables};
//!
//! let env = Arc::new(MemoryEnvironment::from_vars(&[
//!     ("TF_BUILD", "True"),
//!     ("BUILD_SOURCEBRANCH", "refs/heads/feature/login"),
//! ]));
//! let registry = AgentRegistry::builtin(env);
//!
//! let agent = registry.detect_active_agent().unwrap();
//! assert_eq!(agent.current_branch(false).as_deref(), Some("feature/login"));
//!
//! let vars = VersionVariables::from_version("1.4.0-alpha.2");
//! assert_eq!(
//!     agent.set_version_message(&vars),
//!     "##vso[build.updatebuildnumber]1.4.0-alpha.2"
//! );
//! ```

pub mod agents;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod output;
pub mod refs;
pub mod registry;
pub mod variables;

pub use agents::BuildAgent;
pub use error::{BuildAgentError, Result};
pub use output::VersionOutput;
pub use refs::{normalize, GitRef, RefKind};
pub use registry::AgentRegistry;
pub use variables::VersionVariables;
