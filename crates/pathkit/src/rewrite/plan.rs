//! Edits for one file.

use tracing::debug;

use super::edits::EditList;
use super::result::PathChange;
use crate::classify::{PathType, is_url};
use crate::convert::{ConversionMatrix, FileContext};
use crate::scan::{
    ImportExportStatement, ScanOptions, SourceLiteral, Span, Specifier, SpecifierKind,
    StatementForm, StatementKind, scan,
};

#[derive(Debug, Default)]
pub(crate) struct Plan {
    pub edits: EditList,
    pub changes: Vec<PathChange>,
}

/// Whether `stmt` is rewritten when converting from `from`.
fn selects(stmt: &ImportExportStatement, from: PathType) -> bool {
    let Some(path) = stmt.source_path() else {
        return false;
    };
    stmt.matches_type(from)
        || (from == PathType::Bare && stmt.path_type == Some(PathType::Module) && is_url(path))
}

fn quoted(quote: char, path: &str) -> String {
    format!("{quote}{path}{quote}")
}

/// Destructuring pattern binding the same names as an import clause.
///
/// `None` when the clause binds no values or mixes a namespace with other
/// bindings.
fn binding_pattern(specifiers: &[Specifier]) -> Option<String> {
    let values: Vec<&Specifier> = specifiers.iter().filter(|s| !s.is_type).collect();
    if let Some(ns) = values.iter().find(|s| s.kind == SpecifierKind::Namespace) {
        return (values.len() == 1).then(|| ns.local_name().to_string());
    }
    if values.is_empty() {
        return None;
    }
    let props: Vec<String> = values
        .iter()
        .map(|s| match (s.kind, &s.local_alias) {
            (SpecifierKind::Default, _) => format!("default: {}", s.local_name()),
            (_, Some(alias)) => format!("{}: {alias}", s.name),
            _ => s.name.clone(),
        })
        .collect();
    Some(format!("{{ {} }}", props.join(", ")))
}

/// Rewrite a static import into `await import()`.
///
/// The clause up to `from` becomes the binding; `from` through the end of
/// the statement becomes the call. Side-effect imports are one edit.
fn push_dynamic_import(
    stmt: &ImportExportStatement,
    literal: &SourceLiteral,
    path: &str,
    edits: &mut EditList,
) -> bool {
    let call = format!("await import({});", quoted(literal.quote, path));
    let Some(from_kw) = stmt.from_keyword else {
        if !stmt.specifiers.is_empty() {
            return false;
        }
        edits.push(stmt.span, call);
        return true;
    };
    let Some(pattern) = binding_pattern(&stmt.specifiers) else {
        debug!(
            start = stmt.span.start,
            "import clause has no destructurable bindings; leaving static"
        );
        return false;
    };
    edits.push(
        Span::new(stmt.span.start, from_kw.start),
        format!("const {pattern} "),
    );
    edits.push(Span::new(from_kw.start, stmt.span.end), format!("= {call}"));
    true
}

pub(crate) fn plan(
    source: &str,
    from: PathType,
    to: PathType,
    matrix: &ConversionMatrix,
    fc: &FileContext<'_>,
) -> Plan {
    let mut plan = Plan::default();
    let statements = scan(source, &ScanOptions::default(), fc.ctx.classifier());

    for stmt in statements.iter().filter(|s| selects(s, from)) {
        let Some(literal) = &stmt.source else {
            continue;
        };
        let converted = matrix.convert(from, to, &literal.value, fc).changed();

        if to == PathType::Dynamic && stmt.form == StatementForm::Static {
            if stmt.kind == StatementKind::Export || stmt.is_type_only {
                continue;
            }
            let path = converted.unwrap_or_else(|| literal.value.clone());
            if push_dynamic_import(stmt, literal, &path, &mut plan.edits) {
                debug!(from = %literal.value, to = %path, "static import made dynamic");
                plan.changes.push(PathChange {
                    from: literal.value.clone(),
                    to: path,
                });
            }
            continue;
        }

        if let Some(path) = converted {
            debug!(from = %literal.value, to = %path, "path converted");
            plan.edits.push(literal.span, quoted(literal.quote, &path));
            plan.changes.push(PathChange {
                from: literal.value.clone(),
                to: path,
            });
        }
    }
    plan
}
