//! Span edits over an unmodified source text.
//!
//! Every edit is computed against the original text. [`EditList::apply`]
//! sorts them, drops any edit overlapping an earlier one and copies the
//! result in a single ascending pass, recording where each original offset
//! lands in the output.

use memchr::memchr_iter;
use oxc_sourcemap::{SourceMap, SourceMapBuilder};
use tracing::warn;

use crate::scan::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

#[derive(Debug, Clone, Default)]
pub struct EditList {
    edits: Vec<Edit>,
}

/// An original offset and the output offset it was copied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMapping {
    pub original: usize,
    pub generated: usize,
}

/// Result of applying an [`EditList`].
#[derive(Debug, Clone)]
pub struct Applied {
    pub code: String,
    /// Ascending in both offsets.
    pub mappings: Vec<OffsetMapping>,
}

impl EditList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: Span, replacement: impl Into<String>) {
        self.edits.push(Edit {
            span,
            replacement: replacement.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn apply(mut self, source: &str) -> Applied {
        self.edits.sort_by_key(|e| (e.span.start, e.span.end));

        let mut code = String::with_capacity(source.len());
        let mut mappings = Vec::new();
        let mut cursor = 0;

        for edit in self.edits {
            let Span { start, end } = edit.span;
            if start < cursor || end > source.len() || start > end {
                warn!(start, end, "dropping overlapping edit");
                continue;
            }
            copy_unchanged(source, cursor, start, &mut code, &mut mappings);
            mappings.push(OffsetMapping {
                original: start,
                generated: code.len(),
            });
            code.push_str(&edit.replacement);
            cursor = end;
        }
        copy_unchanged(source, cursor, source.len(), &mut code, &mut mappings);

        Applied { code, mappings }
    }
}

fn copy_unchanged(
    source: &str,
    start: usize,
    end: usize,
    code: &mut String,
    mappings: &mut Vec<OffsetMapping>,
) {
    if start >= end {
        return;
    }
    let chunk = &source[start..end];
    let generated = code.len();
    mappings.push(OffsetMapping {
        original: start,
        generated,
    });
    // One mapping per copied line keeps the map usable for long files.
    for newline in memchr_iter(b'\n', chunk.as_bytes()) {
        let next = newline + 1;
        if next < chunk.len() {
            mappings.push(OffsetMapping {
                original: start + next,
                generated: generated + next,
            });
        }
    }
    code.push_str(chunk);
}

/// Line starts of a text, for offset to line/column lookups.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(memchr_iter(b'\n', text.as_bytes()).map(|i| i + 1));
        Self { starts }
    }

    /// Zero-based line and UTF-16 column of `offset`.
    fn position(&self, text: &str, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        let line_start = self.starts[line];
        let column = text
            .get(line_start..offset)
            .map_or(0, |s| s.encode_utf16().count());
        (to_u32(line), to_u32(column))
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Applied {
    /// Source map v3 from the output back to `original`.
    pub fn source_map(&self, original: &str, file_name: &str) -> SourceMap {
        let src_lines = LineIndex::new(original);
        let dst_lines = LineIndex::new(&self.code);

        let mut builder = SourceMapBuilder::default();
        builder.set_file(file_name);
        let source_id = builder.set_source_and_content(file_name, original);
        for mapping in &self.mappings {
            let (src_line, src_col) = src_lines.position(original, mapping.original);
            let (dst_line, dst_col) = dst_lines.position(&self.code, mapping.generated);
            builder.add_token(dst_line, dst_col, src_line, src_col, Some(source_id), None);
        }
        builder.into_sourcemap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end)
    }

    #[test]
    fn applies_edits_in_order() {
        let source = r#"import a from "./a"; import b from "./b";"#;
        let mut edits = EditList::new();
        // pushed out of order
        edits.push(span(35, 40), r#""@/b""#);
        edits.push(span(14, 19), r#""@/a""#);

        let applied = edits.apply(source);
        assert_eq!(applied.code, r#"import a from "@/a"; import b from "@/b";"#);
    }

    #[test]
    fn drops_overlapping_edits() {
        let mut edits = EditList::new();
        edits.push(span(0, 4), "ABCD");
        edits.push(span(2, 6), "zz");
        edits.push(span(6, 7), "G");
        assert_eq!(edits.len(), 3);

        let applied = edits.apply("abcdefgh");
        assert_eq!(applied.code, "ABCDefGh");
    }

    #[test]
    fn records_offsets_through_length_changes() {
        let mut edits = EditList::new();
        edits.push(span(1, 2), "xyz");
        let applied = edits.apply("ab\ncd\nef");

        assert_eq!(applied.code, "axyz\ncd\nef");
        assert_eq!(
            applied.mappings,
            vec![
                OffsetMapping { original: 0, generated: 0 },
                OffsetMapping { original: 1, generated: 1 },
                OffsetMapping { original: 2, generated: 4 },
                OffsetMapping { original: 3, generated: 5 },
                OffsetMapping { original: 6, generated: 8 },
            ]
        );
    }

    #[test]
    fn empty_list_copies_source() {
        let applied = EditList::new().apply("const x = 1;\n");
        assert_eq!(applied.code, "const x = 1;\n");
    }

    #[test]
    fn line_index_counts_utf16_columns() {
        let text = "ab\n\u{1F600}c";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 0), (0, 0));
        assert_eq!(index.position(text, 3), (1, 0));
        assert_eq!(index.position(text, 7), (1, 2));
    }

    #[test]
    fn builds_source_map() {
        let source = "import a from './a';\nconsole.log(a);\n";
        let mut edits = EditList::new();
        edits.push(span(14, 19), "'@/a'");
        let applied = edits.apply(source);

        let json = applied.source_map(source, "index.ts").to_json_string();
        assert!(json.contains("\"mappings\""));
        assert!(json.contains("index.ts"));
    }
}
