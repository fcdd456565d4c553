#![cfg_attr(docsrs, feature(doc_cfg))]

//! # pathkit
//!
//! Forward-slash path algebra and an import/export path rewriter.
//!
//! The crate has two layers:
//!
//! - **Path algebra** ([`path`], [`alias`]): pure string functions that treat
//!   Windows and POSIX input uniformly, plus alias tables that resolve
//!   `@/`-style prefixes in both directions.
//! - **Rewriting** ([`scan`], [`classify`], [`convert`], [`rewrite`]): find the
//!   import and export statements of JavaScript/TypeScript sources, classify
//!   their paths and convert them between relative, absolute, alias, bare,
//!   module and dynamic forms across a whole directory tree.
//!
//! File system access goes through the [`Runtime`] trait; [`NativeRuntime`]
//! is the `std::fs` implementation.
//!
//! ```no_run
//! use std::sync::Arc;
//! use pathkit::{NativeRuntime, PathType, RewriteOptions};
//!
//! # async fn demo() -> pathkit::Result<()> {
//! let mut options = RewriteOptions::new("/project/src", PathType::Relative, PathType::Alias);
//! options.alias_prefix = Some("@/".to_string());
//! let results = pathkit::rewrite::run(options, Arc::new(NativeRuntime::new())).await?;
//! for result in results.iter().filter(|r| r.is_modified()) {
//!     println!("{}: {}", result.file_path, result.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod alias;
pub mod classify;
pub mod convert;
pub mod error;
pub mod path;
pub mod rewrite;
pub mod runtime;
pub mod scan;

// Test utilities (available in test builds and when test-utils feature is enabled)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub mod native_runtime;
pub use native_runtime::NativeRuntime;

pub use alias::{AliasTable, IntoAliasTable, normalize_aliases, resolve_alias, reverse_resolve_alias};
pub use classify::{PathClass, PathClassifier, PathType};
pub use convert::{
    Conversion, ConversionContext, ConversionMatrix, ExtensionFilter, FileContext, LibraryEntry,
};
pub use error::{ConfigError, Error, Result};
pub use path::{ParsedPath, PathContext, PathError, Platform};
pub use rewrite::{FileChangeResult, PathChange, RewriteOptions, RunSummary};
pub use runtime::{EntryKind, Runtime, RuntimeError, RuntimeResult};
pub use scan::{ImportExportStatement, KindFilter, ScanOptions, Specifier, SpecifierKind, scan};
