//! Output helpers: tables, JSON, and colored status lines.

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Print a list of rows in the selected format.
///
/// `plain` falls back to one primary value per line, supplied by the
/// caller so scripting output stays stable even if table columns change.
pub fn print_list<T>(
    format: OutputFormat,
    rows: &[T],
    plain_value: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: Tabled + Serialize,
{
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                eprintln!("{}", "(no results)".dimmed());
            } else {
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
            }
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Plain => {
            for row in rows {
                println!("{}", plain_value(row));
            }
        }
    }
    Ok(())
}

/// Print a single record as pretty JSON (all formats collapse to JSON
/// for single records; tables are for lists).
pub fn print_record<T: Serialize>(value: &T) -> Result<(), CliError> {
    print_json(value)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Internal(format!("cannot render JSON output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// A green success line, suppressed by `--quiet`.
pub fn success(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{} {message}", "✓".green().bold());
    }
}

/// Footer for paged lists, suppressed by `--quiet`.
pub fn page_footer(quiet: bool, shown: usize, total: i64) {
    if !quiet {
        eprintln!("{}", format!("showing {shown} of {total}").dimmed());
    }
}
