//! Print the outline of a project fixture.

use std::fmt::Write as _;
use std::path::Path;

use hfm_core::outline::{OutlineModel, OutlineRow};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_outline, to_json};

/// Outline command handler
pub fn cmd_outline(fixture: &Path, format: OutputFormat) -> Result<(), CliError> {
    let outline = load_outline(fixture)?;
    let rows = outline.rows();

    match format {
        OutputFormat::Text => {
            println!("{}", outline.root().name);
            println!("{}", format_rows(&rows));
        }
        OutputFormat::Json => println!("{}", to_json(&rows)?),
    }
    Ok(())
}

/// Formats rows as an indented tree
#[must_use]
pub fn format_rows(rows: &[OutlineRow]) -> String {
    if rows.is_empty() {
        return "  (empty project)".to_string();
    }

    let name_width = rows
        .iter()
        .map(|row| row.name.len() + 2 * (row.depth + 1))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for row in rows {
        let indented = format!("{}{}", "  ".repeat(row.depth + 1), row.name);
        let marker = if row.has_children { "/" } else { "" };
        let _ = writeln!(
            output,
            "{:<width$}  {}{marker}",
            indented,
            row.kind.as_str(),
            width = name_width
        );
    }
    output.trim_end().to_string()
}
