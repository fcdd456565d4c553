//! Command implementations for the pathkit CLI.
//!
//! - [`convert`] - rewrite a directory tree
//! - [`scan`] - list statements of one file
//! - [`path`] - path algebra operations
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments.

pub mod convert;
pub mod path;
pub mod scan;

pub use convert::execute as convert_execute;
pub use path::execute as path_execute;
pub use scan::execute as scan_execute;
