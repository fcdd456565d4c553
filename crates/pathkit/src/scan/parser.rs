//! Statement recognition over the token stream.

use super::lexer::{Token, TokenKind, tokenize};
use super::{
    ImportExportStatement, SourceLiteral, Span, Specifier, SpecifierKind, StatementForm,
    StatementKind,
};
use crate::classify::PathClassifier;

/// Identifiers that start a declaration after `export`, so they can never
/// be a default-from binding name.
const DECLARATION_KEYWORDS: &[&str] = &[
    "const",
    "let",
    "var",
    "function",
    "class",
    "async",
    "interface",
    "enum",
    "type",
    "default",
    "declare",
    "abstract",
    "namespace",
    "module",
    "as",
    "import",
];

pub(crate) struct Parser<'s, 'c> {
    source: &'s str,
    tokens: Vec<Token>,
    classifier: &'c PathClassifier,
}

/// Specifiers parsed from a clause plus the index of the token after it.
type Clause = (Vec<Specifier>, usize);

impl<'s, 'c> Parser<'s, 'c> {
    pub fn new(source: &'s str, classifier: &'c PathClassifier) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            classifier,
        }
    }

    fn tok(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    fn is_ident(&self, i: usize, word: &str) -> bool {
        self.tok(i).is_some_and(|t| t.is_ident(self.source, word))
    }

    fn is_punct(&self, i: usize, ch: u8) -> bool {
        self.tok(i).is_some_and(|t| t.is_punct(ch))
    }

    fn any_ident(&self, i: usize) -> Option<&'s str> {
        let source = self.source;
        self.tok(i)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text(source))
    }

    fn is_literal(&self, i: usize) -> bool {
        self.tok(i).is_some_and(Token::is_literal)
    }

    /// `obj.import`, `a?.export`; `...import` is a spread, not a member.
    fn is_member_access(&self, i: usize) -> bool {
        if i == 0 || !self.is_punct(i - 1, b'.') {
            return false;
        }
        let spread = i >= 2
            && self.is_punct(i - 2, b'.')
            && self.tokens[i - 2].end == self.tokens[i - 1].start;
        !spread
    }

    fn statement_keyword(&self, i: usize) -> Option<StatementKind> {
        let token = self.tok(i)?;
        if token.kind != TokenKind::Ident || self.is_member_access(i) {
            return None;
        }
        match token.text(self.source) {
            "import" => Some(StatementKind::Import),
            "export" => Some(StatementKind::Export),
            _ => None,
        }
    }

    /// Index of the token closing the bracket opened at `open`.
    fn matching(&self, open: usize) -> Option<usize> {
        let (o, c) = match self.tok(open)?.kind {
            TokenKind::Punct(b'{') => (b'{', b'}'),
            TokenKind::Punct(b'(') => (b'(', b')'),
            TokenKind::Punct(b'[') => (b'[', b']'),
            _ => return None,
        };
        let mut depth = 0usize;
        for (k, t) in self.tokens.iter().enumerate().skip(open) {
            if t.is_punct(o) {
                depth += 1;
            } else if t.is_punct(c) {
                depth -= 1;
                if depth == 0 {
                    return Some(k);
                }
            }
        }
        None
    }

    fn literal(&self, i: usize) -> Option<SourceLiteral> {
        let token = self.tok(i).filter(|t| t.is_literal())?;
        let text = token.text(self.source);
        let quote = text.chars().next()?;
        let inner = &text[1..];
        let value = inner.strip_suffix(quote).unwrap_or(inner);
        Some(SourceLiteral {
            value: value.to_string(),
            quote,
            span: Span::new(token.start, token.end),
        })
    }

    /// Binding name: identifier or string (`{ "a-b" as c }`).
    fn binding_name(&self, i: usize) -> Option<String> {
        let token = self.tok(i)?;
        match token.kind {
            TokenKind::Ident => Some(token.text(self.source).to_string()),
            TokenKind::Str(_) => self.literal(i).map(|l| l.value),
            _ => None,
        }
    }

    /// Parse `{ a, type b, c as d }` starting at the `{` at `open`.
    ///
    /// `inherit_type` marks every entry as type-only in addition to its own
    /// `type` keyword.
    fn brace_list(&self, open: usize, inherit_type: bool) -> Option<Clause> {
        if !self.is_punct(open, b'{') {
            return None;
        }
        let mut specs = Vec::new();
        let mut j = open + 1;
        loop {
            if self.is_punct(j, b'}') {
                return Some((specs, j + 1));
            }
            let mut entry_type = false;
            // `type X` marks the entry; a lone `type` or `type as x` names it.
            let followed_by_name = self
                .tok(j + 1)
                .is_some_and(|t| matches!(t.kind, TokenKind::Ident | TokenKind::Str(_)));
            let renames_type = self.is_ident(j + 1, "as")
                && !(self.is_punct(j + 2, b',')
                    || self.is_punct(j + 2, b'}')
                    || self.is_ident(j + 2, "as"));
            if self.is_ident(j, "type") && followed_by_name && !renames_type {
                entry_type = true;
                j += 1;
            }
            let name = self.binding_name(j)?;
            j += 1;
            let mut spec = Specifier::named(name).with_type(entry_type || inherit_type);
            if self.is_ident(j, "as") {
                spec = spec.with_alias(self.binding_name(j + 1)?);
                j += 2;
            }
            specs.push(spec);
            if self.is_punct(j, b',') {
                j += 1;
            } else if !self.is_punct(j, b'}') {
                return None;
            }
        }
    }

    /// `* as ns` at `star`.
    fn namespace(&self, star: usize, is_type: bool) -> Option<Clause> {
        if !self.is_punct(star, b'*') || !self.is_ident(star + 1, "as") {
            return None;
        }
        let alias = self.binding_name(star + 2)?;
        let spec = Specifier {
            kind: SpecifierKind::Namespace,
            name: "*".to_string(),
            local_alias: Some(alias),
            is_type,
        };
        Some((vec![spec], star + 3))
    }

    /// `from "x"` at `from`, then optional import attributes and `;`.
    /// Returns the literal, the `from` span and the last statement token.
    fn from_clause(&self, from: usize) -> Option<(SourceLiteral, Span, usize)> {
        if !self.is_ident(from, "from") {
            return None;
        }
        let literal = self.literal(from + 1)?;
        let from_span = Span::new(self.tokens[from].start, self.tokens[from].end);
        Some((literal, from_span, self.statement_tail(from + 1)))
    }

    /// Extend a statement ending at `last` over `with { ... }` /
    /// `assert { ... }` and a trailing `;`.
    fn statement_tail(&self, mut last: usize) -> usize {
        let attrs = self.is_ident(last + 1, "with")
            || (self.is_ident(last + 1, "assert")
                && self.tok(last + 1).is_some_and(|t| !t.newline_before));
        if attrs && self.is_punct(last + 2, b'{') {
            if let Some(close) = self.matching(last + 2) {
                last = close;
            }
        }
        if self.is_punct(last + 1, b';') {
            last += 1;
        }
        last
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        kind: StatementKind,
        form: StatementForm,
        start: usize,
        last: usize,
        source: Option<SourceLiteral>,
        from_keyword: Option<Span>,
        is_type_only: bool,
        specifiers: Vec<Specifier>,
    ) -> ImportExportStatement {
        let class = source
            .as_ref()
            .map(|s| self.classifier.classify(&s.value));
        ImportExportStatement {
            kind,
            form,
            path_type: class.as_ref().map(|c| c.path_type),
            path_type_symbol: class.and_then(|c| c.symbol),
            source,
            is_type_only,
            specifiers,
            span: Span::new(self.tokens[start].start, self.tokens[last].end),
            from_keyword,
        }
    }

    /// First pass: every statement that names a source path.
    pub fn sourced_statements(&self) -> Vec<ImportExportStatement> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < self.tokens.len() {
            let found = match self.statement_keyword(i) {
                Some(StatementKind::Import) => self.import_statement(i),
                Some(StatementKind::Export) => self.export_from_statement(i),
                None => None,
            };
            match found {
                // Dynamic imports may nest inside their own argument.
                Some((stmt, _)) if stmt.form == StatementForm::Dynamic => {
                    out.push(stmt);
                    i += 1;
                }
                Some((stmt, last)) => {
                    out.push(stmt);
                    i = last + 1;
                }
                None => i += 1,
            }
        }
        out
    }

    fn import_statement(&self, i: usize) -> Option<(ImportExportStatement, usize)> {
        let next = self.tok(i + 1)?;

        if next.is_punct(b'(') {
            return self.dynamic_import(i);
        }
        if next.is_punct(b'.') {
            // import.meta
            return None;
        }
        if next.is_literal() {
            let literal = self.literal(i + 1)?;
            let last = self.statement_tail(i + 1);
            let stmt = self.build(
                StatementKind::Import,
                StatementForm::Static,
                i,
                last,
                Some(literal),
                None,
                false,
                Vec::new(),
            );
            return Some((stmt, last));
        }

        let mut j = i + 1;
        let mut type_only = false;
        if self.is_ident(j, "type") {
            let after = self.tok(j + 1)?;
            let names_type = after.is_punct(b',')
                || (after.is_ident(self.source, "from") && self.is_literal(j + 2));
            if !names_type {
                type_only = true;
                j += 1;
            }
        }

        let (specifiers, from) = self.import_clause(j, type_only)?;
        let (literal, from_span, last) = self.from_clause(from)?;
        let stmt = self.build(
            StatementKind::Import,
            StatementForm::Static,
            i,
            last,
            Some(literal),
            Some(from_span),
            type_only,
            specifiers,
        );
        Some((stmt, last))
    }

    /// `Default`, `Default, { ... }`, `Default, * as ns`, `{ ... }`, `* as ns`.
    fn import_clause(&self, j: usize, type_only: bool) -> Option<Clause> {
        if self.is_punct(j, b'{') {
            return self.brace_list(j, type_only);
        }
        if self.is_punct(j, b'*') {
            return self.namespace(j, type_only);
        }
        let name = self.any_ident(j)?;
        if name == "from" && self.is_literal(j + 1) {
            return None;
        }
        let mut specs = vec![Specifier::default_export(name).with_type(type_only)];
        if !self.is_punct(j + 1, b',') {
            return Some((specs, j + 1));
        }
        // Mixed form: only the leading default carries the statement flag.
        let (rest, next) = if self.is_punct(j + 2, b'{') {
            self.brace_list(j + 2, false)?
        } else {
            self.namespace(j + 2, false)?
        };
        specs.extend(rest);
        Some((specs, next))
    }

    fn dynamic_import(&self, i: usize) -> Option<(ImportExportStatement, usize)> {
        let close = self.matching(i + 1)?;
        // `import() { ... }` is a method named import, not an expression.
        if self.is_punct(close + 1, b'{') {
            return None;
        }
        let literal_arg = self.is_literal(i + 2)
            && (self.is_punct(i + 3, b')') || self.is_punct(i + 3, b','));
        let source = if literal_arg { self.literal(i + 2) } else { None };
        let stmt = self.build(
            StatementKind::Import,
            StatementForm::Dynamic,
            i,
            close,
            source,
            None,
            false,
            Vec::new(),
        );
        Some((stmt, close))
    }

    fn export_from_statement(&self, i: usize) -> Option<(ImportExportStatement, usize)> {
        let mut j = i + 1;
        let mut type_only = false;
        if self.is_ident(j, "type")
            && self
                .tok(j + 1)
                .is_some_and(|t| t.is_punct(b'{') || t.is_punct(b'*') || t.kind == TokenKind::Ident)
        {
            type_only = true;
            j += 1;
        }

        let (specifiers, from) = if self.is_punct(j, b'*') {
            match self.namespace(j, type_only) {
                Some(clause) => clause,
                None => {
                    let all = Specifier {
                        kind: SpecifierKind::All,
                        name: "*".to_string(),
                        local_alias: None,
                        is_type: type_only,
                    };
                    (vec![all], j + 1)
                }
            }
        } else if self.is_punct(j, b'{') {
            self.brace_list(j, type_only)?
        } else {
            let name = self.any_ident(j)?;
            let default_from = name == "default"
                && (self.is_punct(j + 1, b',') || self.is_ident(j + 1, "from"));
            if !default_from && DECLARATION_KEYWORDS.contains(&name) {
                return None;
            }
            let mut specs = vec![Specifier::default_export(name).with_type(type_only)];
            let mut next = j + 1;
            if self.is_punct(next, b',') {
                let (rest, after) = if self.is_punct(next + 1, b'{') {
                    self.brace_list(next + 1, false)?
                } else {
                    self.namespace(next + 1, false)?
                };
                specs.extend(rest);
                next = after;
            }
            (specs, next)
        };

        let (literal, from_span, last) = self.from_clause(from)?;
        let stmt = self.build(
            StatementKind::Export,
            StatementForm::Static,
            i,
            last,
            Some(literal),
            Some(from_span),
            type_only,
            specifiers,
        );
        Some((stmt, last))
    }

    /// Second pass: exports that declare or re-export local bindings.
    pub fn local_exports(&self) -> Vec<ImportExportStatement> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < self.tokens.len() {
            if self.statement_keyword(i) == Some(StatementKind::Export)
                && self.export_from_statement(i).is_none()
            {
                if let Some((stmt, last)) = self.local_export(i) {
                    out.push(stmt);
                    i = last + 1;
                    continue;
                }
            }
            i += 1;
        }
        out
    }

    fn local_export(&self, i: usize) -> Option<(ImportExportStatement, usize)> {
        let mut j = i + 1;

        let local = |specifiers: Vec<Specifier>, last: usize, type_only: bool| {
            let stmt = self.build(
                StatementKind::Export,
                StatementForm::Static,
                i,
                last,
                None,
                None,
                type_only,
                specifiers,
            );
            Some((stmt, last))
        };

        if self.is_punct(j, b'{') || (self.is_ident(j, "type") && self.is_punct(j + 1, b'{')) {
            let type_only = self.is_ident(j, "type");
            if type_only {
                j += 1;
            }
            let (specs, next) = self.brace_list(j, type_only)?;
            let last = if self.is_punct(next, b';') { next } else { next - 1 };
            return local(specs, last, type_only);
        }

        if self.is_ident(j, "default") {
            let mut k = j + 1;
            if self.is_ident(k, "async") && self.is_ident(k + 1, "function") {
                k += 1;
            }
            if self.is_ident(k, "abstract") && self.is_ident(k + 1, "class") {
                k += 1;
            }
            let declared = self.is_ident(k, "function") || self.is_ident(k, "class");
            let name = if declared {
                let mut n = k + 1;
                if self.is_punct(n, b'*') {
                    n += 1;
                }
                self.any_ident(n).filter(|id| *id != "extends" && *id != "implements")
            } else {
                None
            };
            let last = if declared {
                self.block_end(k)?
            } else {
                self.expression_end(j + 1)
            };
            let spec = Specifier::default_export(name.unwrap_or("default"));
            return local(vec![spec], last, false);
        }

        if self.is_ident(j, "declare") {
            j += 1;
        }
        let keyword = self.any_ident(j)?;
        match keyword {
            "const" if self.is_ident(j + 1, "enum") => {
                let name = self.any_ident(j + 2)?;
                local(vec![Specifier::named(name)], self.block_end(j + 1)?, false)
            }
            "const" | "let" | "var" | "using" => {
                let last = self.expression_end(j + 1);
                let names = self.declarator_names(j + 1, last);
                if names.is_empty() {
                    return None;
                }
                let specs = names.into_iter().map(Specifier::named).collect();
                local(specs, last, false)
            }
            "async" if self.is_ident(j + 1, "function") => self.declaration(i, j + 1, false),
            "function" | "class" | "enum" | "namespace" | "module" => {
                self.declaration(i, j, false)
            }
            "abstract" if self.is_ident(j + 1, "class") => self.declaration(i, j + 1, false),
            "interface" => self.declaration(i, j, true),
            "type" => {
                let name = self.any_ident(j + 1)?;
                if !(self.is_punct(j + 2, b'=') || self.is_punct(j + 2, b'<')) {
                    return None;
                }
                let spec = Specifier::named(name).with_type(true);
                local(vec![spec], self.expression_end(j + 2), true)
            }
            _ => None,
        }
    }

    /// `function f`, `class C`, `interface I`, ... at `keyword`.
    fn declaration(
        &self,
        start: usize,
        keyword: usize,
        type_only: bool,
    ) -> Option<(ImportExportStatement, usize)> {
        let mut n = keyword + 1;
        if self.is_punct(n, b'*') {
            n += 1;
        }
        let name = self.any_ident(n)?;
        let last = self.block_end(keyword).unwrap_or(n);
        let spec = Specifier::named(name).with_type(type_only);
        let stmt = self.build(
            StatementKind::Export,
            StatementForm::Static,
            start,
            last,
            None,
            None,
            type_only,
            vec![spec],
        );
        Some((stmt, last))
    }

    /// Closing `}` of the first body block after `from`, plus a trailing `;`.
    fn block_end(&self, from: usize) -> Option<usize> {
        let mut parens = 0i32;
        let mut k = from;
        while let Some(t) = self.tok(k) {
            match t.kind {
                TokenKind::Punct(b'(') | TokenKind::Punct(b'[') | TokenKind::Punct(b'<') => {
                    parens += 1
                }
                TokenKind::Punct(b')') | TokenKind::Punct(b']') | TokenKind::Punct(b'>') => {
                    parens -= 1
                }
                TokenKind::Punct(b'{') if parens <= 0 => {
                    let close = self.matching(k)?;
                    return Some(if self.is_punct(close + 1, b';') {
                        close + 1
                    } else {
                        close
                    });
                }
                TokenKind::Punct(b';') if parens <= 0 => return Some(k),
                _ => {}
            }
            k += 1;
        }
        None
    }

    /// Last token of an expression-like statement starting at `from`: a `;`
    /// at depth zero, or the last token before a line break that cannot
    /// continue the expression.
    fn expression_end(&self, from: usize) -> usize {
        const CONTINUES_AFTER: &[u8] = b"=,+-*/%&|^!?:<>.([{~";
        const CONTINUES_BEFORE: &[u8] = b".,?:+-*/%&|^=<>([";

        let mut depth = 0i32;
        let mut k = from;
        while let Some(t) = self.tok(k) {
            match t.kind {
                TokenKind::Punct(b'(') | TokenKind::Punct(b'[') | TokenKind::Punct(b'{') => {
                    depth += 1
                }
                TokenKind::Punct(b')') | TokenKind::Punct(b']') | TokenKind::Punct(b'}') => {
                    depth -= 1;
                    if depth < 0 {
                        return k.saturating_sub(1).max(from);
                    }
                }
                TokenKind::Punct(b';') if depth == 0 => return k,
                _ => {}
            }
            if depth == 0 {
                if let Some(next) = self.tok(k + 1) {
                    let ends_line = next.newline_before
                        && !matches!(t.kind, TokenKind::Punct(c) if CONTINUES_AFTER.contains(&c))
                        && !matches!(next.kind, TokenKind::Punct(c) if CONTINUES_BEFORE.contains(&c))
                        && !next.is_ident(self.source, "as")
                        && !next.is_ident(self.source, "satisfies");
                    if ends_line {
                        return k;
                    }
                }
            }
            k += 1;
        }
        self.tokens.len().saturating_sub(1).max(from)
    }

    /// Names bound by `a = 1, { b, c: d } = o` between `from` and `last`.
    fn declarator_names(&self, from: usize, last: usize) -> Vec<String> {
        let mut names = Vec::new();
        let mut k = from;
        let mut at_declarator = true;
        let mut depth = 0i32;
        while k <= last {
            let Some(t) = self.tok(k) else { break };
            if at_declarator {
                at_declarator = false;
                if t.kind == TokenKind::Ident {
                    names.push(t.text(self.source).to_string());
                } else if t.is_punct(b'{') || t.is_punct(b'[') {
                    if let Some(close) = self.matching(k) {
                        names.extend(self.pattern_names(k + 1, close));
                        k = close + 1;
                        continue;
                    }
                }
            }
            match t.kind {
                TokenKind::Punct(b'(') | TokenKind::Punct(b'[') | TokenKind::Punct(b'{') => {
                    depth += 1
                }
                TokenKind::Punct(b')') | TokenKind::Punct(b']') | TokenKind::Punct(b'}') => {
                    depth -= 1
                }
                TokenKind::Punct(b',') if depth == 0 => at_declarator = true,
                _ => {}
            }
            k += 1;
        }
        names
    }

    /// Binding identifiers inside a destructuring pattern.
    fn pattern_names(&self, from: usize, to: usize) -> Vec<String> {
        let mut names = Vec::new();
        let mut after_eq = false;
        for k in from..to {
            let t = &self.tokens[k];
            match t.kind {
                TokenKind::Punct(b'=') => after_eq = true,
                TokenKind::Punct(b',') => after_eq = false,
                TokenKind::Ident if !after_eq => {
                    let binds = self.tok(k + 1).is_some_and(|n| {
                        n.is_punct(b',') || n.is_punct(b'}') || n.is_punct(b']') || n.is_punct(b'=')
                    });
                    if binds {
                        names.push(t.text(self.source).to_string());
                    }
                }
                _ => {}
            }
        }
        names
    }
}
