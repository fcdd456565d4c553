//! Path type classification for import/export sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alias::matches_prefix;
use crate::path::is_absolute;

/// The six path categories a source path can be converted between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// `./x`, `../x`
    Relative,
    /// `/x`, `C:/x`
    Absolute,
    /// `@/x`, `~/x`
    Alias,
    /// External package or URL with no workspace counterpart.
    Bare,
    /// `import("x")`
    Dynamic,
    /// A library of the current workspace, or a URL import.
    Module,
}

impl PathType {
    pub const ALL: [PathType; 6] = [
        PathType::Relative,
        PathType::Absolute,
        PathType::Alias,
        PathType::Bare,
        PathType::Dynamic,
        PathType::Module,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Alias => "alias",
            Self::Bare => "bare",
            Self::Dynamic => "dynamic",
            Self::Module => "module",
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown path type '{s}' (expected one of: relative, absolute, alias, bare, dynamic, module)"
                )
            })
    }
}

/// Result of classifying one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathClass {
    pub path_type: PathType,
    /// Matched alias prefix or URL scheme; `None` for everything else.
    pub symbol: Option<String>,
}

impl PathClass {
    fn new(path_type: PathType, symbol: Option<&str>) -> Self {
        Self {
            path_type,
            symbol: symbol.map(str::to_string),
        }
    }
}

const DEFAULT_ALIAS_PREFIXES: &[&str] = &["@/", "~/"];
const URL_SCHEMES: &[&str] = &["https://", "http://"];

/// Classifies source paths using the configured alias prefixes and the
/// workspace library registry.
#[derive(Debug, Clone, Default)]
pub struct PathClassifier {
    alias_prefixes: Vec<String>,
    libraries: Vec<String>,
    current_lib: Option<String>,
}

impl PathClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias prefixes to recognize. When none are configured `@/` and `~/`
    /// are used.
    pub fn with_alias_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Known workspace library names.
    pub fn with_libraries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries = names.into_iter().map(Into::into).collect();
        self
    }

    /// Library being processed; imports of itself are not treated as modules.
    pub fn with_current_lib(mut self, name: Option<String>) -> Self {
        self.current_lib = name;
        self
    }

    fn alias_prefix_for(&self, path: &str) -> Option<&str> {
        if self.alias_prefixes.is_empty() {
            DEFAULT_ALIAS_PREFIXES
                .iter()
                .copied()
                .find(|p| matches_prefix(path, p))
        } else {
            self.alias_prefixes
                .iter()
                .map(String::as_str)
                .filter(|p| !p.is_empty())
                .find(|p| matches_prefix(path, p))
        }
    }

    /// Name of the workspace library `path` refers to, if any.
    pub fn library_for<'a>(&'a self, path: &str) -> Option<&'a str> {
        self.libraries
            .iter()
            .map(String::as_str)
            .filter(|name| Some(*name) != self.current_lib.as_deref())
            .filter(|name| {
                path == *name
                    || path
                        .strip_prefix(name)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|name| name.len())
    }

    pub fn classify(&self, path: &str) -> PathClass {
        if let Some(prefix) = self.alias_prefix_for(path) {
            return PathClass::new(PathType::Alias, Some(prefix));
        }
        if is_relative(path) {
            return PathClass::new(PathType::Relative, None);
        }
        if is_absolute(path) {
            return PathClass::new(PathType::Absolute, None);
        }
        if let Some(scheme) = URL_SCHEMES.iter().find(|s| path.starts_with(**s)) {
            return PathClass::new(PathType::Module, Some(*scheme));
        }
        if self.library_for(path).is_some() {
            return PathClass::new(PathType::Module, None);
        }
        PathClass::new(PathType::Bare, None)
    }
}

/// `./x`, `../x`, `.` or `..`
pub fn is_relative(path: &str) -> bool {
    path == "."
        || path == ".."
        || path.starts_with("./")
        || path.starts_with("../")
        || path.starts_with(".\\")
        || path.starts_with("..\\")
}

/// `http://` or `https://` URL.
pub fn is_url(path: &str) -> bool {
    URL_SCHEMES.iter().any(|s| path.starts_with(s))
}
