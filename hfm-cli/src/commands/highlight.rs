//! Print the highlighting tokens of a Haskell file.

use std::ops::RangeInclusive;
use std::path::Path;

use hfm_core::highlighting::{HaskellTokenizer, LineTokenMap, TokenKind};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{read_input, to_json};

/// One token as printed
#[derive(Debug, Serialize)]
pub struct TokenRow {
    /// Line the row refers to
    pub line: usize,
    /// First column on that line
    pub column: usize,
    /// Column after the token's last byte on that line
    pub end_column: usize,
    /// Token class
    pub kind: TokenKind,
    /// Token text on that line
    pub text: String,
}

/// Highlight command handler
pub fn cmd_highlight(file: &Path, lines: Option<&str>, format: OutputFormat) -> Result<(), CliError> {
    let source = read_input(file)?;
    let map = LineTokenMap::new(&source, &HaskellTokenizer);
    let selected = parse_lines(lines, map.last_line())?;
    let rows = token_rows(&map, &source, selected);

    match format {
        OutputFormat::Text => {
            for row in &rows {
                println!(
                    "{}:{}-{} {} {:?}",
                    row.line, row.column, row.end_column, row.kind, row.text
                );
            }
        }
        OutputFormat::Json => println!("{}", to_json(&rows)?),
    }
    Ok(())
}

/// Parses `3` or `3-7`; no argument selects every line.
fn parse_lines(lines: Option<&str>, last: usize) -> Result<RangeInclusive<usize>, CliError> {
    let Some(lines) = lines else {
        return Ok(1..=last);
    };
    let invalid = || CliError::InvalidArgument(format!("line range '{lines}'"));
    let number = |s: &str| s.trim().parse::<usize>().ok().filter(|&n| n > 0);
    let (first, end) = match lines.split_once('-') {
        Some((first, end)) => (number(first), number(end)),
        None => (number(lines), number(lines)),
    };
    match (first, end) {
        (Some(first), Some(end)) if first <= end => Ok(first..=end.min(last)),
        _ => Err(invalid()),
    }
}

fn token_rows(map: &LineTokenMap, source: &str, lines: RangeInclusive<usize>) -> Vec<TokenRow> {
    lines
        .flat_map(|line| {
            let start = map.start_of_line(line).unwrap_or_default();
            map.tokens_at_line(line)
                .into_iter()
                .map(move |(token, covered)| TokenRow {
                    line,
                    column: covered.start - start + 1,
                    end_column: covered.end - start + 1,
                    kind: token.kind,
                    text: source
                        .get(covered)
                        .unwrap_or_default()
                        .trim_end_matches('\n')
                        .to_string(),
                })
        })
        .collect()
}
