//! Diagnostics model
//!
//! Source locations, spans and the issues the compiler reports against them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{DiagnosticsError, DiagnosticsResult};

/// 1-based line number.
pub type Line = usize;

/// 1-based column number.
pub type Column = usize;

/// Severity of an issue.
///
/// Variants are declared in ascending order, so `Ord` ranks errors highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational output, dumps and anything unrecognised.
    Other,
    /// A compiler warning.
    Warning,
    /// A compiler error.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other => write!(f, "other"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    /// Unknown severities map to [`Severity::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other,
        })
    }
}

/// A source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SrcLoc {
    /// File the location refers to.
    pub file: PathBuf,
    /// Line, starting at 1.
    pub line: Line,
    /// Column, starting at 1.
    pub column: Column,
}

impl SrcLoc {
    /// Creates a location, rejecting line or column 0.
    ///
    /// # Errors
    ///
    /// Returns `DiagnosticsError::InvalidLocation` for a zero line or column.
    pub fn new(file: impl Into<PathBuf>, line: Line, column: Column) -> DiagnosticsResult<Self> {
        let file = file.into();
        if line == 0 || column == 0 {
            return Err(DiagnosticsError::InvalidLocation(format!(
                "{}:{line}:{column}",
                file.display()
            )));
        }
        Ok(Self { file, line, column })
    }
}

impl fmt::Display for SrcLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A source code span.
///
/// `end_column` is the column *after* the last character included in the span,
/// on the span's last line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SrcSpan {
    /// First character of the span.
    pub start: SrcLoc,
    /// Number of lines covered, at least 1.
    pub lines: usize,
    /// Exclusive end column on the last line.
    pub end_column: Column,
}

impl SrcSpan {
    /// Creates a span.
    ///
    /// # Errors
    ///
    /// Returns `DiagnosticsError::InvalidLocation` if the span covers no lines
    /// or a single-line span ends before it starts.
    pub fn new(start: SrcLoc, lines: usize, end_column: Column) -> DiagnosticsResult<Self> {
        if lines == 0 || (lines == 1 && end_column < start.column) {
            return Err(DiagnosticsError::InvalidLocation(format!(
                "{start} spanning {lines} line(s) to column {end_column}"
            )));
        }
        Ok(Self {
            start,
            lines,
            end_column,
        })
    }

    /// Span covering a single character.
    #[must_use]
    pub fn point(start: SrcLoc) -> Self {
        let end_column = start.column.saturating_add(1);
        Self {
            start,
            lines: 1,
            end_column,
        }
    }

    /// Last line covered by the span.
    #[must_use]
    pub const fn end_line(&self) -> Line {
        self.start.line + self.lines - 1
    }
}

/// A single issue flagged by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Where the issue is.
    pub span: SrcSpan,
    /// How bad it is.
    pub severity: Severity,
    /// Compiler message, possibly spanning several lines.
    pub message: String,
}

impl Issue {
    /// Line the issue starts on.
    #[must_use]
    pub const fn line(&self) -> Line {
        self.span.start.line
    }

    /// Column the issue starts at.
    #[must_use]
    pub const fn column(&self) -> Column {
        self.span.start.column
    }
}

/// Highest severity among the given issues, or `None` if there are none.
pub fn max_severity<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Option<Severity> {
    issues.into_iter().map(|issue| issue.severity).max()
}

/// All issues flagged for one source file, indexed by line.
///
/// Issues on the same line are kept sorted by starting column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesForFile {
    /// File the issues belong to.
    pub file: PathBuf,
    /// Issues keyed by starting line.
    pub issues: BTreeMap<Line, Vec<Issue>>,
}

impl IssuesForFile {
    /// Creates an empty issue set, which clears any issues previously shown.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            issues: BTreeMap::new(),
        }
    }

    /// Creates an issue set from a list of issues.
    #[must_use]
    pub fn from_issues(file: impl Into<PathBuf>, issues: impl IntoIterator<Item = Issue>) -> Self {
        let mut set = Self::new(file);
        for issue in issues {
            set.add(issue);
        }
        set
    }

    /// Adds an issue, keeping its line sorted by column.
    ///
    /// Issues with equal columns keep their insertion order.
    pub fn add(&mut self, issue: Issue) {
        let line = self.issues.entry(issue.line()).or_default();
        let pos = line.partition_point(|existing| existing.column() <= issue.column());
        line.insert(pos, issue);
    }

    /// Issues starting on the given line.
    #[must_use]
    pub fn on_line(&self, line: Line) -> &[Issue] {
        self.issues.get(&line).map_or(&[], Vec::as_slice)
    }

    /// All issues in line and column order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Issue> {
        self.issues.values().flatten()
    }

    /// Total number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Returns true if there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Highest severity in this file.
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        max_severity(self.iter())
    }

    /// First issue starting after `(line, column)`, wrapping around to the
    /// first issue of the file.
    #[must_use]
    pub fn next_issue(&self, line: Line, column: Column) -> Option<&Issue> {
        self.iter()
            .find(|issue| (issue.line(), issue.column()) > (line, column))
            .or_else(|| self.iter().next())
    }

    /// Last issue starting before `(line, column)`, wrapping around to the
    /// last issue of the file.
    #[must_use]
    pub fn previous_issue(&self, line: Line, column: Column) -> Option<&Issue> {
        self.iter()
            .rev()
            .find(|issue| (issue.line(), issue.column()) < (line, column))
            .or_else(|| self.iter().next_back())
    }

    /// Returns true if these issues belong to the file at `path`.
    ///
    /// The compiler may report absolute paths for project-relative files, so a
    /// reported path that ends with `path` also matches.
    #[must_use]
    pub fn is_for(&self, path: &Path) -> bool {
        self.file == path || (!path.as_os_str().is_empty() && self.file.ends_with(path))
    }
}
