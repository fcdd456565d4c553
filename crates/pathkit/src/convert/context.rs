use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::alias::AliasTable;
use crate::classify::{PathClassifier, PathType};
use crate::error::ConfigError;
use crate::path::{dirname, extname, is_absolute, normalize, resolve_with_cwd};
use crate::runtime::Runtime;

/// A library of the current workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    /// Entry file, absolute or relative to the base directory.
    #[serde(alias = "main")]
    pub main_file: String,
}

impl LibraryEntry {
    pub fn new(main_file: impl Into<String>) -> Self {
        Self {
            main_file: main_file.into(),
        }
    }
}

/// Which written alias paths an alias→relative conversion applies to.
///
/// Serialized as `"any"`, `"none"` or an extension such as `".ts"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExtensionFilter {
    #[default]
    Any,
    /// Only paths written without an extension.
    NoExtension,
    /// Only paths written with this extension (including the dot).
    Only(String),
}

impl ExtensionFilter {
    pub fn accepts(&self, path: &str) -> bool {
        match self {
            Self::Any => true,
            Self::NoExtension => extname(path).is_empty(),
            Self::Only(ext) => extname(path) == *ext,
        }
    }
}

impl FromStr for ExtensionFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "any" => Ok(Self::Any),
            "none" => Ok(Self::NoExtension),
            ext if ext.contains('/') => Err(ConfigError::InvalidValue {
                field: "extFilter",
                reason: format!("'{ext}' is not an extension"),
            }),
            ext if ext.starts_with('.') => Ok(Self::Only(ext.to_string())),
            ext => Ok(Self::Only(format!(".{ext}"))),
        }
    }
}

impl TryFrom<String> for ExtensionFilter {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ExtensionFilter> for String {
    fn from(filter: ExtensionFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::NoExtension => f.write_str("none"),
            Self::Only(ext) => f.write_str(ext),
        }
    }
}

/// Immutable per-run conversion settings.
///
/// Built once per run and shared by every file task; the file being
/// rewritten is passed separately through [`FileContext`].
#[derive(Debug, Clone)]
pub struct ConversionContext {
    alias_prefix: Option<String>,
    base_dir: String,
    aliases: AliasTable,
    libs: IndexMap<String, LibraryEntry>,
    current_lib: Option<String>,
    url_map: IndexMap<String, String>,
    strip_segments: Vec<String>,
    extension_filter: ExtensionFilter,
    target_extension: Option<String>,
    classifier: PathClassifier,
}

impl ConversionContext {
    pub fn builder(base_dir: impl Into<String>) -> ConversionContextBuilder {
        ConversionContextBuilder {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    pub fn alias_prefix(&self) -> Option<&str> {
        self.alias_prefix.as_deref()
    }

    /// Absolute, normalized base directory.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn libs(&self) -> &IndexMap<String, LibraryEntry> {
        &self.libs
    }

    pub fn current_lib(&self) -> Option<&str> {
        self.current_lib.as_deref()
    }

    pub fn url_map(&self) -> &IndexMap<String, String> {
        &self.url_map
    }

    pub fn strip_segments(&self) -> &[String] {
        &self.strip_segments
    }

    pub fn extension_filter(&self) -> &ExtensionFilter {
        &self.extension_filter
    }

    pub fn target_extension(&self) -> Option<&str> {
        self.target_extension.as_deref()
    }

    pub fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    /// Anchor `path` at the base directory unless it is already absolute.
    pub fn anchor(&self, path: &str) -> String {
        resolve_with_cwd(&self.base_dir, [path])
    }

    /// Check that every field the `from`→`to` conversion needs is present.
    pub fn validate_for(&self, from: PathType, to: PathType) -> Result<(), ConfigError> {
        let involves = |t: PathType| from == t || to == t;

        if involves(PathType::Alias) && self.alias_prefix.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingAliasPrefix { from, to });
        }
        if involves(PathType::Module) && self.libs.is_empty() {
            return Err(ConfigError::MissingLibraries { from, to });
        }
        let bare_dynamic = matches!(
            (from, to),
            (PathType::Bare, PathType::Dynamic) | (PathType::Dynamic, PathType::Bare)
        );
        if bare_dynamic && self.url_map.is_empty() {
            return Err(ConfigError::MissingUrlMap { from, to });
        }
        Ok(())
    }
}

/// Builder for [`ConversionContext`].
#[derive(Debug, Clone, Default)]
pub struct ConversionContextBuilder {
    base_dir: String,
    alias_prefix: Option<String>,
    extra_aliases: Vec<(String, String)>,
    libs: IndexMap<String, LibraryEntry>,
    current_lib: Option<String>,
    url_map: IndexMap<String, String>,
    strip_segments: Vec<String>,
    extension_filter: ExtensionFilter,
    target_extension: Option<String>,
}

impl ConversionContextBuilder {
    /// Alias prefix standing for the base directory, e.g. `@/`.
    pub fn alias_prefix(mut self, prefix: Option<String>) -> Self {
        self.alias_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    /// Additional alias; relative targets are anchored at the base directory.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.extra_aliases.push((alias.into(), target.into()));
        self
    }

    pub fn libs(mut self, libs: IndexMap<String, LibraryEntry>) -> Self {
        self.libs = libs;
        self
    }

    pub fn lib(mut self, name: impl Into<String>, entry: LibraryEntry) -> Self {
        self.libs.insert(name.into(), entry);
        self
    }

    pub fn current_lib(mut self, name: Option<String>) -> Self {
        self.current_lib = name;
        self
    }

    pub fn url_map(mut self, url_map: IndexMap<String, String>) -> Self {
        self.url_map = url_map;
        self
    }

    pub fn strip_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn extension_filter(mut self, filter: ExtensionFilter) -> Self {
        self.extension_filter = filter;
        self
    }

    pub fn target_extension(mut self, ext: Option<String>) -> Self {
        self.target_extension = ext.filter(|e| !e.is_empty()).map(|e| {
            if e.starts_with('.') {
                e
            } else {
                format!(".{e}")
            }
        });
        self
    }

    pub fn build(self) -> Result<ConversionContext, ConfigError> {
        let base_dir = normalize(&self.base_dir);
        if !is_absolute(&base_dir) {
            return Err(ConfigError::InvalidValue {
                field: "baseDir",
                reason: format!("'{}' must be an absolute path", self.base_dir),
            });
        }
        let base_dir = base_dir.trim_end_matches('/').to_string();
        let base_dir = if base_dir.is_empty() || base_dir.ends_with(':') {
            format!("{base_dir}/")
        } else {
            base_dir
        };

        let mut raw: Vec<(String, String)> = Vec::new();
        if let Some(prefix) = &self.alias_prefix {
            raw.push((prefix.trim_end_matches('/').to_string(), base_dir.clone()));
        }
        for (alias, target) in &self.extra_aliases {
            raw.push((alias.clone(), resolve_with_cwd(&base_dir, [target])));
        }
        let aliases = AliasTable::normalize(raw);

        let mut prefixes: Vec<String> = Vec::new();
        if let Some(prefix) = &self.alias_prefix {
            prefixes.push(prefix.clone());
        }
        for (alias, _) in &self.extra_aliases {
            let alias = alias.trim_end_matches('/');
            prefixes.push(format!("{alias}/"));
        }

        let classifier = PathClassifier::new()
            .with_alias_prefixes(prefixes)
            .with_libraries(self.libs.keys().cloned())
            .with_current_lib(self.current_lib.clone());

        Ok(ConversionContext {
            alias_prefix: self.alias_prefix,
            base_dir,
            aliases,
            libs: self.libs,
            current_lib: self.current_lib,
            url_map: self.url_map,
            strip_segments: self.strip_segments,
            extension_filter: self.extension_filter,
            target_extension: self.target_extension,
            classifier,
        })
    }
}

/// Per-file view of a run: shared context, the file being rewritten and the
/// runtime used for probing.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    pub ctx: &'a ConversionContext,
    /// Absolute slash path of the importing file.
    pub source_file: &'a str,
    pub runtime: &'a dyn Runtime,
}

impl<'a> FileContext<'a> {
    pub fn new(ctx: &'a ConversionContext, source_file: &'a str, runtime: &'a dyn Runtime) -> Self {
        Self {
            ctx,
            source_file,
            runtime,
        }
    }

    /// Directory containing the importing file.
    pub fn importer_dir(&self) -> String {
        dirname(self.source_file)
    }
}
