//! Settings for the build agent CLI.
//!
//! Settings are optional. They come from `.buildagent.yml` in the working
//! directory, or from the file passed with `--config`.
//!
//! # Example
//!
//! ```
//! use buildagent::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "strict_detection: true").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert!(config.strict_detection);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::BuildAgentConfig;
