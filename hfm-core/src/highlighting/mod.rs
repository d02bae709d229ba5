//! Syntax highlighting
//!
//! The editor pane keeps a [`LineTokenMap`] of its text and updates it after
//! every edit instead of re-tokenizing the whole file. Tokens come from a
//! [`Tokenizer`]; [`HaskellTokenizer`] covers Haskell source.

mod line_map;
mod token;
mod tokenizer;

pub use line_map::LineTokenMap;
pub use token::{HighlightingToken, TokenKind, TokenSpan};
pub use tokenizer::{HaskellTokenizer, Tokenizer};
