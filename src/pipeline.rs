//! The full run: ensure schema, seed, then every report of the variant.

use anyhow::{Context, Result};
use rusqlite::Connection;
use sampledb_common::Variant;
use sampledb_db::reports::{self, ReportKind, ReportParams};
use sampledb_db::seed::{self, SeedSummary};
use sampledb_db::schema;
use serde::Serialize;
use std::io::Write;

use crate::render::{self, OutputFormat};

/// What a single pipeline run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub variant: Variant,
    /// Clear the variant's tables before seeding.
    pub reset: bool,
    pub params: ReportParams,
    pub format: OutputFormat,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            reset: false,
            params: ReportParams::default(),
            format: OutputFormat::default(),
        }
    }
}

/// A report that returned an error instead of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFailure {
    pub report: ReportKind,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub variant: Variant,
    /// Rows removed by a reset, zero without one.
    pub cleared: usize,
    pub seeded: SeedSummary,
    pub reports_run: usize,
    pub failures: Vec<ReportFailure>,
}

impl PipelineSummary {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the whole pipeline on one connection, writing result sets to `out`.
///
/// Schema and seed errors abort the run. Report errors do not: each failure
/// is logged and recorded in the summary and the next report still runs.
pub fn run_pipeline(
    conn: &Connection,
    options: &PipelineOptions,
    out: &mut impl Write,
) -> Result<PipelineSummary> {
    let variant = options.variant;

    schema::create_tables(conn, variant)
        .with_context(|| format!("Failed to create {} tables", variant))?;

    let cleared = if options.reset {
        schema::clear_tables(conn, variant)
            .with_context(|| format!("Failed to clear {} tables", variant))?
    } else {
        0
    };

    let seeded = seed::load(conn, variant)
        .with_context(|| format!("Failed to seed {} tables", variant))?;

    let kinds = ReportKind::for_variant(variant);
    let failures = run_reports(conn, kinds, &options.params, options.format, out)?;

    Ok(PipelineSummary {
        variant,
        cleared,
        seeded,
        reports_run: kinds.len(),
        failures,
    })
}

/// Run the given reports in order, printing each one that succeeds.
///
/// Only write errors on `out` are returned as `Err`.
pub fn run_reports(
    conn: &Connection,
    kinds: &[ReportKind],
    params: &ReportParams,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Vec<ReportFailure>> {
    let mut failures = Vec::new();

    for &kind in kinds {
        match reports::run(conn, kind, params) {
            Ok(tables) => {
                tracing::debug!(report = %kind, tables = tables.len(), "Report finished");
                render::write_report(out, kind, &tables, format)
                    .context("Failed to write report output")?;
            }
            Err(e) => {
                tracing::error!(report = %kind, "Report failed: {}", e);
                failures.push(ReportFailure {
                    report: kind,
                    error: e.to_string(),
                });
            }
        }
    }

    out.flush().context("Failed to flush report output")?;
    Ok(failures)
}
