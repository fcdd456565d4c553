//! Import/export statement scanning.
//!
//! [`scan`] tokenizes a source file and recognizes every `import`/`export`
//! statement in two passes:
//!
//! 1. statements that reference a source path (`import x from "y"`,
//!    `export * from "y"`, `import("y")`, ...)
//! 2. exports without a source (`export const x`, `export default ...`)
//!
//! All offsets are byte offsets into the unmodified input, so callers can
//! compute every edit against the original text before applying any of them.

mod lexer;
mod parser;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::classify::{PathClassifier, PathType};

/// Byte range `[start, end)` in the scanned text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Import,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementForm {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecifierKind {
    /// `{ a }`, `{ a as b }`
    Named,
    /// `import a from`, `export default`
    Default,
    /// `* as ns`
    Namespace,
    /// `export *`
    All,
}

/// One binding introduced by a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specifier {
    pub kind: SpecifierKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_alias: Option<String>,
    pub is_type: bool,
}

impl Specifier {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: SpecifierKind::Named,
            name: name.into(),
            local_alias: None,
            is_type: false,
        }
    }

    pub fn default_export(name: impl Into<String>) -> Self {
        Self {
            kind: SpecifierKind::Default,
            ..Self::named(name)
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.local_alias = Some(alias.into());
        self
    }

    pub fn with_type(mut self, is_type: bool) -> Self {
        self.is_type = is_type;
        self
    }

    /// Name the binding is visible under in the importing module.
    pub fn local_name(&self) -> &str {
        self.local_alias.as_deref().unwrap_or(&self.name)
    }
}

/// The quoted source path of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLiteral {
    /// Text between the quotes.
    pub value: String,
    /// `'`, `"` or `` ` ``
    pub quote: char,
    /// Span of the literal including its quotes.
    pub span: Span,
}

/// One recognized import or export statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportExportStatement {
    pub kind: StatementKind,
    pub form: StatementForm,
    pub source: Option<SourceLiteral>,
    pub path_type: Option<PathType>,
    pub path_type_symbol: Option<String>,
    pub is_type_only: bool,
    pub specifiers: Vec<Specifier>,
    pub span: Span,
    /// Span of the `from` keyword, when the statement has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_keyword: Option<Span>,
}

impl ImportExportStatement {
    pub fn source_path(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.value.as_str())
    }

    /// `Dynamic` matches dynamic `import()` expressions; every other type
    /// matches the classified type of the source path.
    pub fn matches_type(&self, path_type: PathType) -> bool {
        match path_type {
            PathType::Dynamic => self.form == StatementForm::Dynamic,
            other => self.path_type == Some(other),
        }
    }

    pub fn is_static_import(&self) -> bool {
        self.kind == StatementKind::Import && self.form == StatementForm::Static
    }
}

/// Which statement kinds [`scan`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    Import,
    Export,
    #[default]
    All,
}

impl KindFilter {
    fn accepts(self, kind: StatementKind) -> bool {
        match self {
            Self::All => true,
            Self::Import => kind == StatementKind::Import,
            Self::Export => kind == StatementKind::Export,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub kind: KindFilter,
    /// Keep only statements with a source matching one of these types.
    pub path_types: Option<Vec<PathType>>,
    /// Cap on statements per `(kind, path type)` bucket.
    pub limit_per_type: Option<usize>,
}

/// Scan `source` for import and export statements, ordered by position.
pub fn scan(
    source: &str,
    options: &ScanOptions,
    classifier: &PathClassifier,
) -> Vec<ImportExportStatement> {
    let parser = parser::Parser::new(source, classifier);
    let mut statements = parser.sourced_statements();
    statements.extend(parser.local_exports());
    statements.sort_by_key(|s| s.span.start);

    statements.retain(|s| options.kind.accepts(s.kind));

    if let Some(types) = &options.path_types {
        statements.retain(|s| s.source.is_some() && types.iter().any(|t| s.matches_type(*t)));
    }

    if let Some(limit) = options.limit_per_type {
        let mut seen: FxHashMap<(StatementKind, Option<PathType>), usize> = FxHashMap::default();
        statements.retain(|s| {
            let count = seen.entry((s.kind, s.path_type)).or_insert(0);
            *count += 1;
            *count <= limit
        });
    }

    statements
}

#[cfg(test)]
mod tests;
