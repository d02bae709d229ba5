//! Compiler diagnostics
//!
//! Issues reported by the compiler are collected per source file and routed
//! to the editor showing that file.
//!
//! # Example
//!
//! ```
//! use hfm_core::diagnostics::{Severity, parse_compiler_messages};
//!
//! let files = parse_compiler_messages("Main.hs:3:1: warning: unused\n");
//! assert_eq!(files[0].max_severity(), Some(Severity::Warning));
//! ```

mod error;
mod parse;
mod types;

pub use error::{DiagnosticsError, DiagnosticsResult};
pub use parse::{parse_compiler_messages, parse_span};
pub use types::{Column, Issue, IssuesForFile, Line, Severity, SrcLoc, SrcSpan, max_severity};
