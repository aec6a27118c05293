//! Console output for report tables.

use sampledb_db::reports::{ReportKind, ReportTable};
use serde::Serialize;
use std::io::{self, Write};

/// How result sets are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text tables
    #[default]
    Text,
    /// One JSON object per report, one per line
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report: ReportKind,
    tables: &'a [ReportTable],
}

/// Write every result set of one report.
pub fn write_report(
    out: &mut impl Write,
    kind: ReportKind,
    tables: &[ReportTable],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for table in tables {
                write_table(out, table)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &JsonReport { report: kind, tables })?;
            writeln!(out)
        }
    }
}

/// Write one table with columns padded to their widest cell.
pub fn write_table(out: &mut impl Write, table: &ReportTable) -> io::Result<()> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "== {} ==", table.title)?;
    write_line(out, &table.columns, &widths)?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;

    for row in &table.rows {
        write_line(out, row, &widths)?;
    }

    match table.rows.len() {
        0 => writeln!(out, "(no rows)")?,
        1 => writeln!(out, "(1 row)")?,
        n => writeln!(out, "({} rows)", n)?,
    }
    writeln!(out)
}

fn write_line(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}
