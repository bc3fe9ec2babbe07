//! Error types for build agent operations.
//!
//! This module defines [`BuildAgentError`], the error type used by the
//! parts of the crate that can genuinely fail, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! Detection, ref normalization and message generation never fail: an
//! agent that does not apply answers `false`, a missing ref is `None` and
//! a provider without a message protocol produces an empty string.
//! Errors are reserved for settings files, version variable files,
//! strict detection and integrations that write to disk.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for build agent operations.
#[derive(Debug, Error)]
pub enum BuildAgentError {
    /// Settings file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a version variables file.
    #[error("Failed to parse version variables from {source_name}: {message}")]
    VariablesParseError {
        source_name: String,
        message: String,
    },

    /// More than one build agent matched under strict detection.
    #[error("Multiple build agents detected: {}", agents.join(", "))]
    AmbiguousAgent { agents: Vec<String> },

    /// A build agent was requested by a name nobody registered.
    #[error("Unknown build agent: {name}")]
    UnknownAgent { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for build agent operations.
pub type Result<T> = std::result::Result<T, BuildAgentError>;
