//! Parse compiler output into per-file issues.

use std::path::Path;

use hfm_core::diagnostics::{IssuesForFile, parse_compiler_messages};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{read_input, to_json};

/// Diagnostics command handler
pub fn cmd_diagnostics(file: &Path, format: OutputFormat) -> Result<(), CliError> {
    let text = read_input(file)?;
    let files = parse_compiler_messages(&text);

    match format {
        OutputFormat::Text => {
            if files.is_empty() {
                println!("No issues found.");
            }
            for set in &files {
                println!("{}", format_issues(set));
            }
        }
        OutputFormat::Json => println!("{}", to_json(&files)?),
    }
    Ok(())
}

/// Formats the issues of one file, worst severity first in the header
#[must_use]
pub fn format_issues(set: &IssuesForFile) -> String {
    let severity = set
        .max_severity()
        .map_or_else(|| "none".to_string(), |s| s.to_string());
    let mut lines = vec![format!(
        "{} ({} issue(s), max severity: {severity})",
        set.file.display(),
        set.len()
    )];
    for issue in set.iter() {
        let first_line = issue.message.lines().next().unwrap_or_default();
        lines.push(format!(
            "  {}:{} {}: {first_line}",
            issue.line(),
            issue.column(),
            issue.severity
        ));
    }
    lines.join("\n")
}
