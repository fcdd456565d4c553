use super::*;

fn scan_all(source: &str) -> Vec<ImportExportStatement> {
    scan(source, &ScanOptions::default(), &PathClassifier::new())
}

fn names(stmt: &ImportExportStatement) -> Vec<(SpecifierKind, &str, Option<&str>, bool)> {
    stmt.specifiers
        .iter()
        .map(|s| (s.kind, s.name.as_str(), s.local_alias.as_deref(), s.is_type))
        .collect()
}

#[test]
fn side_effect_and_default_imports() {
    let source = "import './styles.css';\nimport React from \"react\";\n";
    let stmts = scan_all(source);
    assert_eq!(stmts.len(), 2);

    assert_eq!(stmts[0].source_path(), Some("./styles.css"));
    assert!(stmts[0].specifiers.is_empty());
    assert_eq!(&source[stmts[0].span.start..stmts[0].span.end], "import './styles.css';");
    assert_eq!(stmts[0].path_type, Some(PathType::Relative));

    let react = &stmts[1];
    assert_eq!(react.source.as_ref().map(|s| s.quote), Some('"'));
    assert_eq!(react.path_type, Some(PathType::Bare));
    assert_eq!(names(react), vec![(SpecifierKind::Default, "React", None, false)]);
    let literal = react.source.as_ref().map(|s| s.span).unwrap_or_default();
    assert_eq!(&source[literal.start..literal.end], "\"react\"");
}

#[test]
fn multi_line_brace_block_with_comments() {
    let source = r#"import {
    a, // first
    /* second */ b as c,
    type D,
} from '@/lib';"#;
    let stmts = scan_all(source);
    assert_eq!(stmts.len(), 1);
    let stmt = &stmts[0];
    assert_eq!(stmt.span, Span::new(0, source.len()));
    assert_eq!(stmt.path_type, Some(PathType::Alias));
    assert_eq!(stmt.path_type_symbol.as_deref(), Some("@/"));
    assert!(!stmt.is_type_only);
    assert_eq!(
        names(stmt),
        vec![
            (SpecifierKind::Named, "a", None, false),
            (SpecifierKind::Named, "b", Some("c"), false),
            (SpecifierKind::Named, "D", None, true),
        ]
    );
}

#[test]
fn namespace_and_mixed_imports() {
    let stmts = scan_all("import * as path from 'node:path';\nimport def, { x } from './m';");
    assert_eq!(
        names(&stmts[0]),
        vec![(SpecifierKind::Namespace, "*", Some("path"), false)]
    );
    assert_eq!(
        names(&stmts[1]),
        vec![
            (SpecifierKind::Default, "def", None, false),
            (SpecifierKind::Named, "x", None, false),
        ]
    );
}

#[test]
fn type_only_imports() {
    let stmts = scan_all("import type { A, B } from './types';\nimport type Def, { C, type E } from './t';");
    assert!(stmts[0].is_type_only);
    assert!(stmts[0].specifiers.iter().all(|s| s.is_type));

    // Only the leading identifier takes the statement-level flag.
    assert!(stmts[1].is_type_only);
    assert_eq!(
        names(&stmts[1]),
        vec![
            (SpecifierKind::Default, "Def", None, true),
            (SpecifierKind::Named, "C", None, false),
            (SpecifierKind::Named, "E", None, true),
        ]
    );
}

#[test]
fn import_named_type_is_not_type_only() {
    let stmts = scan_all("import type from './type';\nimport { type as t } from './x';");
    assert!(!stmts[0].is_type_only);
    assert_eq!(names(&stmts[0]), vec![(SpecifierKind::Default, "type", None, false)]);
    assert_eq!(names(&stmts[1]), vec![(SpecifierKind::Named, "type", Some("t"), false)]);
}

#[test]
fn export_from_forms() {
    let source = r#"export * from "./bar";
export * as utils from './utils';
export { a, b as c } from './ab';
export type { T } from './types';
export default, { d } from './d';
export type Something, { x } from 'y';
export foo from './foo';"#;
    let stmts = scan_all(source);
    assert_eq!(stmts.len(), 7);
    assert!(stmts.iter().all(|s| s.kind == StatementKind::Export));

    assert_eq!(names(&stmts[0]), vec![(SpecifierKind::All, "*", None, false)]);
    assert_eq!(
        names(&stmts[1]),
        vec![(SpecifierKind::Namespace, "*", Some("utils"), false)]
    );
    assert_eq!(
        names(&stmts[2]),
        vec![
            (SpecifierKind::Named, "a", None, false),
            (SpecifierKind::Named, "b", Some("c"), false),
        ]
    );
    assert!(stmts[3].is_type_only);
    assert_eq!(
        names(&stmts[4]),
        vec![
            (SpecifierKind::Default, "default", None, false),
            (SpecifierKind::Named, "d", None, false),
        ]
    );
    assert_eq!(
        names(&stmts[5]),
        vec![
            (SpecifierKind::Default, "Something", None, true),
            (SpecifierKind::Named, "x", None, false),
        ]
    );
    assert_eq!(names(&stmts[6]), vec![(SpecifierKind::Default, "foo", None, false)]);
}

#[test]
fn dynamic_imports() {
    let source = "const m = await import('./lazy');\nconst n = import(name);\nimport.meta.url;";
    let stmts = scan_all(source);
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0].form, StatementForm::Dynamic);
    assert_eq!(stmts[0].source_path(), Some("./lazy"));
    assert_eq!(&source[stmts[0].span.start..stmts[0].span.end], "import('./lazy')");
    assert!(stmts[0].matches_type(PathType::Dynamic));
    assert!(stmts[0].matches_type(PathType::Relative));
    assert_eq!(stmts[1].source, None);
    assert_eq!(stmts[1].path_type, None);
}

#[test]
fn import_attributes_are_part_of_the_statement() {
    let source = "import data from './data.json' with { type: 'json' };\nlet x;";
    let stmts = scan_all(source);
    assert_eq!(
        &source[stmts[0].span.start..stmts[0].span.end],
        "import data from './data.json' with { type: 'json' };"
    );
}

#[test]
fn ignores_statements_inside_literals_and_comments() {
    let source = r#"
// import a from './commented';
/* export * from './block'; */
const s = "import b from './string'";
const t = `export { c } from './template'`;
const r = /import d from '.\/regex'/;
obj.import('./member');
"#;
    assert!(scan_all(source).is_empty());
}

#[test]
fn local_exports() {
    let source = r#"export const x = 1, { y, z: w } = obj;
export function f() { return 1 }
export async function g() {}
export default class Widget {}
export { x as ex };
export interface Props { a: string }
export type Alias = string | number
export enum Color { Red }
export default 42;"#;
    let stmts = scan_all(source);
    assert_eq!(stmts.len(), 9);
    assert!(stmts.iter().all(|s| s.source.is_none() && s.path_type.is_none()));

    assert_eq!(
        names(&stmts[0]),
        vec![
            (SpecifierKind::Named, "x", None, false),
            (SpecifierKind::Named, "y", None, false),
            (SpecifierKind::Named, "w", None, false),
        ]
    );
    assert_eq!(names(&stmts[1]), vec![(SpecifierKind::Named, "f", None, false)]);
    assert_eq!(
        &source[stmts[1].span.start..stmts[1].span.end],
        "export function f() { return 1 }"
    );
    assert_eq!(names(&stmts[2]), vec![(SpecifierKind::Named, "g", None, false)]);
    assert_eq!(names(&stmts[3]), vec![(SpecifierKind::Default, "Widget", None, false)]);
    assert_eq!(names(&stmts[4]), vec![(SpecifierKind::Named, "x", Some("ex"), false)]);
    assert!(stmts[5].is_type_only);
    assert_eq!(names(&stmts[6]), vec![(SpecifierKind::Named, "Alias", None, true)]);
    assert_eq!(
        &source[stmts[6].span.start..stmts[6].span.end],
        "export type Alias = string | number"
    );
    assert_eq!(names(&stmts[7]), vec![(SpecifierKind::Named, "Color", None, false)]);
    assert_eq!(names(&stmts[8]), vec![(SpecifierKind::Default, "default", None, false)]);
}

#[test]
fn statements_are_ordered_by_position() {
    let source = "export const a = 1;\nexport * from './b';\nexport { c };\nimport d from './d';";
    let starts: Vec<usize> = scan_all(source).iter().map(|s| s.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts.len(), 4);
    assert_eq!(starts, sorted);
}

#[test]
fn kind_and_path_type_filters() {
    let source = "import a from './a';\nimport b from 'b';\nexport * from './c';\nexport const d = 1;";
    let classifier = PathClassifier::new();

    let imports = scan(
        source,
        &ScanOptions {
            kind: KindFilter::Import,
            ..Default::default()
        },
        &classifier,
    );
    assert_eq!(imports.len(), 2);

    let relative = scan(
        source,
        &ScanOptions {
            path_types: Some(vec![PathType::Relative]),
            ..Default::default()
        },
        &classifier,
    );
    let paths: Vec<_> = relative.iter().filter_map(|s| s.source_path()).collect();
    assert_eq!(paths, vec!["./a", "./c"]);
}

#[test]
fn limit_per_type_keeps_first_of_each_bucket() {
    let source = "import a from './a';\nimport b from './b';\nimport c from 'c';\nexport * from './d';";
    let stmts = scan(
        source,
        &ScanOptions {
            limit_per_type: Some(1),
            ..Default::default()
        },
        &PathClassifier::new(),
    );
    let paths: Vec<_> = stmts.iter().filter_map(|s| s.source_path()).collect();
    assert_eq!(paths, vec!["./a", "c", "./d"]);
}

#[test]
fn offsets_are_byte_offsets_for_non_ascii_text() {
    let source = "// héllo wörld\nimport x from './ü';";
    let stmts = scan_all(source);
    let literal = stmts[0].source.as_ref().map(|s| s.span).unwrap_or_default();
    assert_eq!(&source[literal.start..literal.end], "'./ü'");
}
