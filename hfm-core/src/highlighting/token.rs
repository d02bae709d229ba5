//! Highlighting tokens

use std::fmt;

use serde::Serialize;

use crate::diagnostics::{Column, Line};

/// Token classes distinguished when highlighting Haskell source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Reserved word (`where`, `let`, `import`, ...)
    Keyword,
    /// Reserved symbol or special character (`::`, `->`, `(`, ...)
    Keysymbol,
    /// Alphanumeric variable or function
    VariableWord,
    /// Operator symbol
    VariableSymbol,
    /// Alphanumeric constructor or module name
    ConstructorWord,
    /// Constructor operator starting with `:`
    ConstructorSymbol,
    /// String literal
    StringLit,
    /// Character literal
    CharacterLit,
    /// Numeric literal
    NumberLit,
    /// `--` comment
    LineComment,
    /// `{- -}` comment, possibly nested
    BlockComment,
    /// `{-# #-}` compiler pragma
    Pragma,
    /// Anything else
    Other,
}

impl TokenKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Keysymbol => "keysymbol",
            Self::VariableWord => "variable_word",
            Self::VariableSymbol => "variable_symbol",
            Self::ConstructorWord => "constructor_word",
            Self::ConstructorSymbol => "constructor_symbol",
            Self::StringLit => "string",
            Self::CharacterLit => "character",
            Self::NumberLit => "number",
            Self::LineComment => "line_comment",
            Self::BlockComment => "block_comment",
            Self::Pragma => "pragma",
            Self::Other => "other",
        }
    }

    /// Human-readable description, as shown next to a theme colour.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Keyword => "Keyword",
            Self::Keysymbol => "Reserved symbol",
            Self::VariableWord => "Alphanumeric variable or function",
            Self::VariableSymbol => "Function operator symbol",
            Self::ConstructorWord => "Alphanumeric constructor or module name",
            Self::ConstructorSymbol => "Data or type constructor symbol",
            Self::StringLit => "String constant",
            Self::CharacterLit => "Character constant",
            Self::NumberLit => "Numeric constant",
            Self::LineComment | Self::BlockComment => "Single line or block comment",
            Self::Pragma => "Compiler pragma",
            Self::Other => "Default foreground color",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a token sits in the text.
///
/// Columns count bytes from the start of the line, starting at 1.
/// `end_column` is exclusive and refers to the token's last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenSpan {
    /// First line.
    pub line: Line,
    /// First column on the first line.
    pub column: Column,
    /// Number of lines covered, at least 1.
    pub lines: usize,
    /// Column after the last byte, on the last line.
    pub end_column: Column,
}

impl TokenSpan {
    /// Last line covered.
    #[must_use]
    pub const fn end_line(&self) -> Line {
        self.line + self.lines - 1
    }

    /// The same span moved by `delta` lines.
    #[must_use]
    pub fn shifted(self, delta: isize) -> Self {
        Self {
            line: self.line.saturating_add_signed(delta).max(1),
            ..self
        }
    }
}

/// A classified piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HighlightingToken {
    /// Token class.
    pub kind: TokenKind,
    /// Position in the text.
    pub span: TokenSpan,
}
