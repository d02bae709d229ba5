//! Parser for GHC-style compiler messages
//!
//! Recognised header forms:
//!
//! ```text
//! src/Main.hs:12:5: error: ...
//! src/Main.hs:12:5-9: warning: [-Wunused-imports] ...
//! src/Main.hs:(12,5)-(14,3): error:
//! src/Main.hs:12:5:
//! ```
//!
//! Lines that start with whitespace continue the message of the preceding
//! header. Source excerpts (`12 | code` and caret lines) are dropped.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{DiagnosticsError, DiagnosticsResult};
use super::types::{Issue, IssuesForFile, Severity, SrcLoc, SrcSpan};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<file>[^\s:][^:]*):(?P<loc>\d+:\d+(?:-\d+)?|\(\d+,\d+\)-\(\d+,\d+\)):\s*(?:(?P<severity>[A-Za-z]+):)?\s*(?P<rest>.*)$",
    )
    .expect("diagnostic header regex is valid")
});

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((\d+),(\d+)\)-\((\d+),(\d+)\)$").expect("diagnostic range regex is valid")
});

static EXCERPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d*\s*\|").expect("source excerpt regex is valid"));

/// Parses the span part of a header (`12:5`, `12:5-9` or `(12,5)-(14,3)`).
///
/// Compiler columns are inclusive; the returned span's end column is the one
/// after the last character.
///
/// # Errors
///
/// Returns `DiagnosticsError::InvalidLocation` if the location is malformed or
/// refers to line or column 0.
pub fn parse_span(file: impl Into<PathBuf>, location: &str) -> DiagnosticsResult<SrcSpan> {
    let file = file.into();
    let invalid = || DiagnosticsError::InvalidLocation(location.to_string());
    let number = |s: &str| s.parse::<usize>().map_err(|_| invalid());

    if let Some(caps) = RANGE.captures(location) {
        let start_line = number(&caps[1])?;
        let start_col = number(&caps[2])?;
        let end_line = number(&caps[3])?;
        let end_col = number(&caps[4])?;
        if end_line < start_line {
            return Err(invalid());
        }
        let start = SrcLoc::new(file, start_line, start_col)?;
        let end_column = end_col.checked_add(1).ok_or_else(invalid)?;
        return SrcSpan::new(start, end_line - start_line + 1, end_column);
    }

    let (line, columns) = location.split_once(':').ok_or_else(invalid)?;
    let line = number(line)?;
    let (start_col, end_col) = match columns.split_once('-') {
        Some((start, end)) => (number(start)?, number(end)?),
        None => {
            let col = number(columns)?;
            (col, col)
        }
    };
    let end_column = end_col.checked_add(1).ok_or_else(invalid)?;
    SrcSpan::new(SrcLoc::new(file, line, start_col)?, 1, end_column)
}

struct Pending {
    issue: Issue,
    body: Vec<String>,
}

impl Pending {
    fn finish(mut self) -> Issue {
        while self.body.last().is_some_and(String::is_empty) {
            self.body.pop();
        }
        let mut message = self.issue.message;
        for line in self.body {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&line);
        }
        self.issue.message = message;
        self.issue
    }
}

fn flush(pending: Option<Pending>, files: &mut Vec<IssuesForFile>) {
    if let Some(pending) = pending {
        let issue = pending.finish();
        let file = issue.span.start.file.clone();
        match files.iter_mut().find(|f| f.file == file) {
            Some(set) => set.add(issue),
            None => files.push(IssuesForFile::from_issues(file, [issue])),
        }
    }
}

/// Parses compiler output into issues grouped by file.
///
/// Files appear in the order of their first issue. Headers with an invalid
/// location are skipped with a warning, and so is their continuation text.
/// A header without a severity is an error, as older compilers print them.
#[must_use]
pub fn parse_compiler_messages(text: &str) -> Vec<IssuesForFile> {
    let mut files: Vec<IssuesForFile> = Vec::new();
    let mut current: Option<Pending> = None;
    let mut skipping = false;

    for line in text.lines() {
        if let Some(caps) = HEADER.captures(line) {
            flush(current.take(), &mut files);
            let file = &caps["file"];
            match parse_span(file, &caps["loc"]) {
                Ok(span) => {
                    let severity = caps
                        .name("severity")
                        .map_or(Severity::Error, |s| {
                            s.as_str().parse().unwrap_or(Severity::Other)
                        });
                    current = Some(Pending {
                        issue: Issue {
                            span,
                            severity,
                            message: caps["rest"].trim().to_string(),
                        },
                        body: Vec::new(),
                    });
                    skipping = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping compiler message with invalid location");
                    skipping = true;
                }
            }
            continue;
        }

        let is_continuation = line.is_empty()
            || line.starts_with(char::is_whitespace)
            || EXCERPT.is_match(line);
        if !is_continuation {
            flush(current.take(), &mut files);
            skipping = false;
            continue;
        }
        if skipping || EXCERPT.is_match(line) {
            continue;
        }
        if let Some(pending) = current.as_mut() {
            let trimmed = line.trim();
            if !(trimmed.is_empty() && pending.body.is_empty()) {
                pending.body.push(trimmed.to_string());
            }
        }
    }
    flush(current.take(), &mut files);
    files
}
