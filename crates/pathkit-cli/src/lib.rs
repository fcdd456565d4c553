//! pathkit CLI - rewrite import/export paths from the command line.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - layered configuration (defaults, file, environment, flags)
//! - [`commands`] - `convert`, `scan` and `path` implementations
//! - [`error`] - CLI error types with hints, rendered through `miette`
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - colored status output and summaries

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
