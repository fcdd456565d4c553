//! Command-line interface definition for pathkit.
//!
//! # Command Structure
//!
//! - `pathkit convert` - rewrite import/export paths across a directory tree
//! - `pathkit scan` - list the import/export statements of one file
//! - `pathkit path` - run a single path algebra operation

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{Command, ConvertArgs, PathArgs, PathOp, ScanArgs};
pub use enums::*;
pub use validation::{parse_key_val, parse_lib};

/// pathkit - convert import/export paths between relative, absolute, alias,
/// bare, dynamic and module forms
#[derive(Parser, Debug)]
#[command(
    name = "pathkit",
    version,
    about = "Rewrite import/export paths in JavaScript/TypeScript sources",
    long_about = "pathkit converts the paths of import and export statements between\n\
                  relative, absolute, alias, bare, dynamic and workspace-module forms\n\
                  across a source tree, and exposes its forward-slash path algebra."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every file visited and every path rewritten.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
