//! Tokenizers
//!
//! [`Tokenizer`] is the seam between the line token map and whatever lexes
//! the source. [`HaskellTokenizer`] is a small lexer that only classifies
//! tokens; it never fails and never rejects input.

use crate::diagnostics::{Column, Line};

use super::token::{HighlightingToken, TokenKind, TokenSpan};

/// Splits source text into highlighting tokens.
pub trait Tokenizer {
    /// Tokenizes `text`, whose first byte sits at `(line, column)`.
    ///
    /// Tokens must be returned in text order.
    fn tokenize(&self, line: Line, column: Column, text: &str) -> Vec<HighlightingToken>;
}

impl<F> Tokenizer for F
where
    F: Fn(Line, Column, &str) -> Vec<HighlightingToken>,
{
    fn tokenize(&self, line: Line, column: Column, text: &str) -> Vec<HighlightingToken> {
        self(line, column, text)
    }
}

/// Lexer for Haskell source.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaskellTokenizer;

const KEYWORDS: &[&str] = &[
    "as", "case", "class", "data", "default", "deriving", "do", "else", "family", "forall",
    "foreign", "hiding", "if", "import", "in", "infix", "infixl", "infixr", "instance", "let",
    "mdo", "module", "newtype", "of", "pattern", "qualified", "rec", "then", "type", "where",
];

const RESERVED_SYMBOLS: &[&str] = &[
    "..", ":", "::", "=", "\\", "|", "<-", "->", "@", "~", "=>", "-", "!", "*", ".",
];

impl Tokenizer for HaskellTokenizer {
    fn tokenize(&self, line: Line, column: Column, text: &str) -> Vec<HighlightingToken> {
        let mut cursor = Cursor {
            text,
            pos: 0,
            line,
            column,
        };
        let mut tokens = Vec::new();
        while let Some(c) = cursor.peek() {
            if c.is_whitespace() {
                cursor.bump();
                continue;
            }
            let (start_line, start_column) = (cursor.line, cursor.column);
            let kind = lex_token(&mut cursor, c);
            tokens.push(HighlightingToken {
                kind,
                span: TokenSpan {
                    line: start_line,
                    column: start_column,
                    lines: cursor.line - start_line + 1,
                    end_column: cursor.column,
                },
            });
        }
        tokens
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: Line,
    column: Column,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += c.len_utf8();
        }
        Some(c)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.text[start..self.pos]
    }
}

fn is_symbol(c: char) -> bool {
    "!#$%&*+./<=>?@\\^|-~:".contains(c)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn lex_token(cursor: &mut Cursor<'_>, c: char) -> TokenKind {
    if cursor.starts_with("{-#") {
        block_comment(cursor);
        return TokenKind::Pragma;
    }
    if cursor.starts_with("{-") {
        block_comment(cursor);
        return TokenKind::BlockComment;
    }
    if starts_line_comment(cursor.rest()) {
        cursor.bump_while(|c| c != '\n');
        return TokenKind::LineComment;
    }
    match c {
        '"' => {
            string_literal(cursor);
            TokenKind::StringLit
        }
        '\'' => quote(cursor),
        '0'..='9' => {
            number(cursor);
            TokenKind::NumberLit
        }
        c if c.is_uppercase() => qualified_name(cursor),
        c if c.is_lowercase() || c == '_' => {
            let word = cursor.bump_while(is_ident_char);
            if word == "_" {
                TokenKind::Keysymbol
            } else if KEYWORDS.contains(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::VariableWord
            }
        }
        c if is_symbol(c) => {
            let symbol = cursor.bump_while(is_symbol);
            classify_symbol(symbol)
        }
        '(' | ')' | ',' | ';' | '[' | ']' | '{' | '}' | '`' => {
            cursor.bump();
            TokenKind::Keysymbol
        }
        _ => {
            cursor.bump();
            TokenKind::Other
        }
    }
}

fn classify_symbol(symbol: &str) -> TokenKind {
    if RESERVED_SYMBOLS.contains(&symbol) {
        TokenKind::Keysymbol
    } else if symbol.starts_with(':') {
        TokenKind::ConstructorSymbol
    } else {
        TokenKind::VariableSymbol
    }
}

/// `--`, `---` and so on start a comment unless more symbol characters follow.
fn starts_line_comment(rest: &str) -> bool {
    let dashes = rest.bytes().take_while(|&b| b == b'-').count();
    dashes >= 2 && rest[dashes..].chars().next().is_none_or(|c| !is_symbol(c))
}

/// Consumes a possibly nested `{- -}` comment; unterminated comments run to
/// the end of the text.
fn block_comment(cursor: &mut Cursor<'_>) {
    cursor.bump_n(2);
    let mut depth = 1usize;
    while depth > 0 && cursor.peek().is_some() {
        if cursor.starts_with("{-") {
            cursor.bump_n(2);
            depth += 1;
        } else if cursor.starts_with("-}") {
            cursor.bump_n(2);
            depth -= 1;
        } else {
            cursor.bump();
        }
    }
}

/// Strings end at the closing quote or the end of the line.
fn string_literal(cursor: &mut Cursor<'_>) {
    cursor.bump();
    while let Some(c) = cursor.peek() {
        match c {
            '\n' => break,
            '\\' => {
                cursor.bump();
                if cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
            }
            '"' => {
                cursor.bump();
                break;
            }
            _ => {
                cursor.bump();
            }
        }
    }
}

/// A character literal, or a lone quote as used by promoted constructors and
/// Template Haskell names.
fn quote(cursor: &mut Cursor<'_>) -> TokenKind {
    let rest = cursor.rest();
    if let Some(escaped) = rest.strip_prefix("'\\")
        && !escaped.starts_with('\n')
    {
        let body_len = escaped
            .char_indices()
            .skip(1)
            .take_while(|&(_, c)| c != '\n')
            .find(|&(_, c)| c == '\'')
            .map(|(i, _)| i);
        if let Some(len) = body_len {
            let chars = rest[..len + 3].chars().count();
            cursor.bump_n(chars);
            return TokenKind::CharacterLit;
        }
    } else if cursor.peek_at(1).is_some_and(|c| c != '\n' && c != '\'')
        && cursor.peek_at(2) == Some('\'')
    {
        cursor.bump_n(3);
        return TokenKind::CharacterLit;
    }
    cursor.bump();
    TokenKind::Keysymbol
}

fn number(cursor: &mut Cursor<'_>) {
    let radix = match (cursor.peek(), cursor.peek_at(1)) {
        (Some('0'), Some('x' | 'X')) => Some(16),
        (Some('0'), Some('o' | 'O')) => Some(8),
        (Some('0'), Some('b' | 'B')) => Some(2),
        _ => None,
    };
    if let Some(radix) = radix
        && cursor.peek_at(2).is_some_and(|c| c.is_digit(radix))
    {
        cursor.bump_n(2);
        cursor.bump_while(|c| c.is_digit(radix) || c == '_');
        return;
    }
    cursor.bump_while(|c| c.is_ascii_digit() || c == '_');
    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        cursor.bump_while(|c| c.is_ascii_digit() || c == '_');
    }
    if matches!(cursor.peek(), Some('e' | 'E')) {
        let sign = usize::from(matches!(cursor.peek_at(1), Some('+' | '-')));
        if cursor.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
            cursor.bump_n(1 + sign);
            cursor.bump_while(|c| c.is_ascii_digit());
        }
    }
}

/// `Data.Map.Map`, `Map.lookup` and `Prelude.+` are single tokens whose kind
/// comes from the last component.
fn qualified_name(cursor: &mut Cursor<'_>) -> TokenKind {
    cursor.bump_while(is_ident_char);
    while cursor.peek() == Some('.') {
        match cursor.peek_at(1) {
            Some(c) if c.is_uppercase() => {
                cursor.bump();
                cursor.bump_while(is_ident_char);
            }
            Some(c) if c.is_lowercase() || c == '_' => {
                cursor.bump();
                cursor.bump_while(is_ident_char);
                return TokenKind::VariableWord;
            }
            Some(c) if is_symbol(c) => {
                cursor.bump();
                let symbol = cursor.bump_while(is_symbol);
                return if symbol.starts_with(':') {
                    TokenKind::ConstructorSymbol
                } else {
                    TokenKind::VariableSymbol
                };
            }
            _ => break,
        }
    }
    TokenKind::ConstructorWord
}
