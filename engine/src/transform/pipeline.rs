//! High-level import API: workbook bytes + schema -> workshops.
//!
//! # Example
//!
//! ```rust,ignore
//! use workshop_import::{default_schema, import_workbook_file, ConsoleSink, ImportOptions};
//!
//! let schema = default_schema(&ConsoleSink)?;
//! let outcome = import_workbook_file("registrations.xlsx", &schema, &ImportOptions::default(), &ConsoleSink)?;
//! println!("{} workshops", outcome.workshops.len());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticSink;
use crate::error::ImportResult;
use crate::models::Workshop;
use crate::schema::Schema;
use crate::workbook::Workbook;

use super::attendees::load_attendees;
use super::collector::{collect_with_summaries, PeriodSummary};

/// Options for an import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Skip period sheets absent from the workbook instead of failing
    pub skip_missing_periods: bool,

    /// Warn about workshop cells without a "(Leader)" part
    pub warn_on_malformed_cells: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_missing_periods: true,
            warn_on_malformed_cells: true,
        }
    }
}

/// Result of a complete import
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Workshops, grouped by period in schema order
    pub workshops: Vec<Workshop>,

    /// Distinct attendees on the roster sheet
    pub attendee_count: usize,

    /// One entry per configured period sheet
    pub periods: Vec<PeriodSummary>,
}

impl ImportOutcome {
    pub fn selection_count(&self) -> usize {
        self.workshops.iter().map(|w| w.selections.len()).sum()
    }
}

/// Import an xlsx workbook held in memory.
pub fn import_workbook(
    bytes: &[u8],
    schema: &Schema,
    options: &ImportOptions,
    sink: &dyn DiagnosticSink,
) -> ImportResult<ImportOutcome> {
    sink.info("📖 Reading workbook...".to_string());
    let workbook = Workbook::from_xlsx_bytes(bytes)?;
    sink.success(format!("{} sheet(s): {}", workbook.sheets().len(), workbook.sheet_names().join(", ")));
    import_parsed(&workbook, schema, options, sink)
}

/// Import an xlsx workbook from disk.
pub fn import_workbook_file<P: AsRef<Path>>(
    path: P,
    schema: &Schema,
    options: &ImportOptions,
    sink: &dyn DiagnosticSink,
) -> ImportResult<ImportOutcome> {
    let bytes = std::fs::read(path.as_ref())?;
    import_workbook(&bytes, schema, options, sink)
}

/// Import a workbook that has already been read.
pub fn import_parsed(
    workbook: &Workbook,
    schema: &Schema,
    options: &ImportOptions,
    sink: &dyn DiagnosticSink,
) -> ImportResult<ImportOutcome> {
    sink.info(format!("👥 Loading attendees for '{}'...", schema.event_name));
    let attendees = load_attendees(schema, workbook, sink)?;

    sink.info(format!("📦 Collecting workshops from {} period sheet(s)...", schema.period_sheets.len()));
    let (workshops, periods) = collect_with_summaries(schema, workbook, &attendees, options, sink)?;

    let outcome = ImportOutcome {
        workshops,
        attendee_count: attendees.len(),
        periods,
    };
    sink.success(format!(
        "{} workshops, {} selections",
        outcome.workshops.len(),
        outcome.selection_count()
    ));

    Ok(outcome)
}
