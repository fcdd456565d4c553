//! Minimal ECMAScript tokenizer.
//!
//! Produces only the significant tokens the statement recognizer needs.
//! Whitespace and comments are skipped; string, template and regex literals
//! are single tokens so that `import`/`export` text inside them is never
//! mistaken for a statement.

use memchr::{memchr, memmem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Punct(u8),
    Str(u8),
    /// Template literal; `true` when it contains `${...}` substitutions.
    Template(bool),
    Number,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// A line terminator appears between the previous token and this one.
    pub newline_before: bool,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    pub fn is_punct(&self, ch: u8) -> bool {
        self.kind == TokenKind::Punct(ch)
    }

    pub fn is_ident(&self, source: &str, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(source) == word
    }

    /// String literal or substitution-free template.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Str(_) | TokenKind::Template(false))
    }
}

const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b == b'#' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

pub(crate) struct Lexer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut newline_before = false;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b'\n' | b'\r' => {
                    newline_before = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek(1) == Some(b'/') => {
                    self.pos = match memchr(b'\n', &self.bytes[self.pos..]) {
                        Some(off) => self.pos + off,
                        None => self.bytes.len(),
                    };
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    let body = &self.bytes[self.pos + 2..];
                    let end = match memmem::find(body, b"*/") {
                        Some(off) => self.pos + 2 + off + 2,
                        None => self.bytes.len(),
                    };
                    if memchr(b'\n', &self.bytes[self.pos..end]).is_some() {
                        newline_before = true;
                    }
                    self.pos = end;
                }
                _ => {
                    let token = self.next_token(b, newline_before);
                    self.tokens.push(token);
                    newline_before = false;
                }
            }
        }
        self.tokens
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn next_token(&mut self, b: u8, newline_before: bool) -> Token {
        let start = self.pos;
        let kind = match b {
            b'\'' | b'"' => {
                self.pos = self.skip_string(start, b);
                TokenKind::Str(b)
            }
            b'`' => {
                let (end, has_subst) = self.skip_template(start);
                self.pos = end;
                TokenKind::Template(has_subst)
            }
            b'0'..=b'9' => {
                self.pos = self.skip_number(start);
                TokenKind::Number
            }
            b'.' if matches!(self.peek(1), Some(b'0'..=b'9')) => {
                self.pos = self.skip_number(start);
                TokenKind::Number
            }
            b'/' if self.regex_allowed() => {
                self.pos = self.skip_regex(start);
                TokenKind::Regex
            }
            _ if is_ident_start(b) => {
                let mut end = start + 1;
                while end < self.bytes.len() && is_ident_part(self.bytes[end]) {
                    end += 1;
                }
                // Keep token boundaries on char boundaries for non-ASCII input.
                while end < self.bytes.len() && !self.source.is_char_boundary(end) {
                    end += 1;
                }
                self.pos = end;
                TokenKind::Ident
            }
            _ => {
                self.pos += 1;
                TokenKind::Punct(b)
            }
        };
        Token {
            kind,
            start,
            end: self.pos,
            newline_before,
        }
    }

    /// Whether a `/` at the current position starts a regex literal rather
    /// than a division, judged from the previous token.
    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(prev) => match prev.kind {
                TokenKind::Punct(b')') | TokenKind::Punct(b']') => false,
                TokenKind::Punct(_) => true,
                TokenKind::Ident => REGEX_KEYWORDS.contains(&prev.text(self.source)),
                _ => false,
            },
        }
    }

    /// End offset of a quoted string. Unterminated strings stop at the line end.
    fn skip_string(&self, start: usize, quote: u8) -> usize {
        let mut i = start + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'\n' => return i,
                c if c == quote => return i + 1,
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    fn skip_number(&self, start: usize) -> usize {
        let mut i = start + 1;
        while i < self.bytes.len() {
            let c = self.bytes[i];
            let exponent_sign = (c == b'+' || c == b'-')
                && matches!(self.bytes[i - 1], b'e' | b'E')
                && !self.bytes[start..i].starts_with(b"0x");
            if c.is_ascii_alphanumeric() || c == b'.' || c == b'_' || exponent_sign {
                i += 1;
            } else {
                break;
            }
        }
        i
    }

    fn skip_regex(&self, start: usize) -> usize {
        let mut i = start + 1;
        let mut in_class = false;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'\n' => return i,
                b'[' => {
                    in_class = true;
                    i += 1;
                }
                b']' => {
                    in_class = false;
                    i += 1;
                }
                b'/' if !in_class => {
                    i += 1;
                    while i < self.bytes.len() && is_ident_part(self.bytes[i]) {
                        i += 1;
                    }
                    return i;
                }
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    /// End offset of a template literal starting at `start`, and whether it
    /// has substitutions.
    fn skip_template(&self, start: usize) -> (usize, bool) {
        let mut i = start + 1;
        let mut has_subst = false;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'`' => return (i + 1, has_subst),
                b'$' if self.bytes.get(i + 1) == Some(&b'{') => {
                    has_subst = true;
                    i = self.skip_substitution(i + 2);
                }
                _ => i += 1,
            }
        }
        (self.bytes.len(), has_subst)
    }

    /// Skip a `${ ... }` body starting just after `${`; returns the offset
    /// after the closing brace.
    fn skip_substitution(&self, mut i: usize) -> usize {
        let mut depth = 1usize;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'{' => {
                    depth += 1;
                    i += 1;
                }
                b'}' => {
                    depth -= 1;
                    i += 1;
                    if depth == 0 {
                        return i;
                    }
                }
                q @ (b'\'' | b'"') => i = self.skip_string(i, q),
                b'`' => i = self.skip_template(i).0,
                b'/' if self.bytes.get(i + 1) == Some(&b'/') => {
                    i = match memchr(b'\n', &self.bytes[i..]) {
                        Some(off) => i + off,
                        None => self.bytes.len(),
                    };
                }
                b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                    i = match memmem::find(&self.bytes[i + 2..], b"*/") {
                        Some(off) => i + 2 + off + 2,
                        None => self.bytes.len(),
                    };
                }
                _ => i += 1,
            }
        }
        self.bytes.len()
    }
}

pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text(source).to_string()))
            .collect()
    }

    #[test]
    fn skips_comments() {
        let toks = kinds("import /* a */ x // tail\nfrom 'y'");
        let texts: Vec<&str> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["import", "x", "from", "'y'"]);
    }

    #[test]
    fn strings_and_templates_are_single_tokens() {
        let toks = kinds(r#"a = "import x from 'y'"; b = `t ${ "}" + `n${1}` } u`"#);
        assert_eq!(toks[2].0, TokenKind::Str(b'"'));
        assert!(matches!(toks.last().map(|t| t.0), Some(TokenKind::Template(true))));
        assert!(!toks.iter().any(|(_, t)| t == "import"));
    }

    #[test]
    fn distinguishes_regex_from_division() {
        let toks = kinds("x = a / b; y = /import '[/]'/g.test(s)");
        assert_eq!(toks[3], (TokenKind::Punct(b'/'), "/".to_string()));
        assert!(toks.iter().any(|(k, t)| *k == TokenKind::Regex && t == "/import '[/]'/g"));
    }

    #[test]
    fn tracks_newlines() {
        let toks = tokenize("a\n/* x\n */ b c");
        assert!(!toks[0].newline_before);
        assert!(toks[1].newline_before);
        assert!(!toks[2].newline_before);
    }

    #[test]
    fn unterminated_string_stops_at_line_end() {
        let toks = kinds("'abc\nimport");
        assert_eq!(toks[0].1, "'abc");
        assert_eq!(toks[1].1, "import");
    }
}
