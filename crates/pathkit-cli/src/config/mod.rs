//! Configuration for `pathkit convert` with multi-source loading.
//!
//! The result of loading is a [`pathkit::RewriteOptions`]. Sources are
//! merged in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. a config file (`--config`, or `pathkit.toml` / `pathkit.json` in the
//!    working directory) using the camelCase keys of `RewriteOptions`
//! 3. `PATHKIT_*` environment variables, e.g. `PATHKIT_ALIAS_PREFIX=@/`
//! 4. command-line flags
//!
//! Maps (`aliases`, `urlMap`, `libs`) merge key by key across sources;
//! lists replace each other.

mod conversions;
mod loading;

use indexmap::IndexMap;
use pathkit::{LibraryEntry, PathType};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loading::{DEFAULT_CONFIG_FILES, ENV_PREFIX, find_config_file, load_options, load_options_in};

/// Settings contributed by the environment or the command line.
///
/// Read with snake_case keys (as produced by `PATHKIT_*` variables) and
/// written with the camelCase keys of the config file, so it layers over
/// file values. Unset fields are not written and leave lower layers intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"), default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_type: Option<PathType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_type: Option<PathType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libs: Option<IndexMap<String, LibraryEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_lib_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_map: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "dist_jsr_dry_run")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_source_map: Option<bool>,
}
