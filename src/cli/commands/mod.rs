//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads settings,
//! builds the agent registry once and routes CLI subcommands to their
//! implementations. Commands write results to standard output only;
//! diagnostics go through `tracing` to standard error so CI systems never
//! mistake them for service messages.

pub mod branch;
pub mod completions;
pub mod config;
pub mod detect;
pub mod dispatcher;
pub mod list;
pub mod set_version;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
