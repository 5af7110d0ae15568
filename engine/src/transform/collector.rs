//! Period sheets -> workshop aggregates.
//!
//! Every non-blank workshop cell of every period row becomes one
//! [`WorkshopSelection`], appended to the [`Workshop`] for its key:
//!
//! ```text
//! Period rows (one per attendee)                 Workshops (one per key)
//! ┌──────────────────────────────────────┐       ┌──────────────────────────────┐
//! │ Jane  │ Days 1-4: Pottery (Maria)     │       │ Pottery / Maria / Days 1-4   │
//! │ John  │ Days 1-4: Pottery (Maria)     │  →    │   Jane, John                 │
//! │ John  │ Days 1-2: Pottery (Maria)     │       ├──────────────────────────────┤
//! └──────────────────────────────────────┘       │ Pottery / Maria / Days 1-2   │
//!                                                │   John                       │
//!                                                └──────────────────────────────┘
//! ```
//!
//! The key is (sheet, name, leader, start day, end day). Workshops keep the
//! order in which their key was first seen and selections keep row order;
//! nothing here sorts.

use indexmap::IndexMap;
use serde::Serialize;

use crate::diagnostics::DiagnosticSink;
use crate::error::{ImportError, ImportResult};
use crate::models::{Attendee, Period, Workshop, WorkshopKey, WorkshopSelection};
use crate::schema::{keys, PeriodSheetConfig, Schema, WorkshopColumn};
use crate::workbook::{Sheet, Workbook};

use super::attendees::{fallback_selection_id, AttendeeMap};
use super::columns::ColumnResolver;
use super::format::parse_workshop_cell;
use super::pipeline::ImportOptions;

/// What one period sheet contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub sheet_name: String,
    pub display_name: String,
    /// False when the sheet was absent and skipped.
    pub present: bool,
    pub workshop_count: usize,
    pub selection_count: usize,
}

/// Choice number cell -> rank; blank, non-numeric or < 1 reads as 1.
pub fn parse_choice_number(text: &str) -> u32 {
    parse_whole_number(text)
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(1)
}

/// Registration id cell -> id; blank or non-numeric reads as 0.
pub fn parse_registration_id(text: &str) -> i64 {
    parse_whole_number(text).unwrap_or(0)
}

/// Integers, including whole numbers stored as floats ("3.0").
fn parse_whole_number(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Column indices of one period sheet, resolved before scanning rows.
struct PeriodColumns<'c> {
    selection_id: Option<u32>,
    choice_number: Option<u32>,
    registration_id: Option<u32>,
    first_name: Option<u32>,
    last_name: Option<u32>,
    workshops: Vec<(&'c WorkshopColumn, u32)>,
}

impl<'c> PeriodColumns<'c> {
    /// Selection and registration ids match by pattern, everything else exactly.
    fn resolve(config: &'c PeriodSheetConfig, resolver: &mut ColumnResolver<'_>) -> ImportResult<Self> {
        let mut optional = |key: &str, pattern: bool| -> ImportResult<Option<u32>> {
            let text = config.column_name(key);
            if text.is_empty() {
                return Ok(None);
            }
            let index = if pattern {
                resolver.find_column_by_pattern(text)?
            } else {
                resolver.find_column(text)?
            };
            Ok(Some(index))
        };

        let selection_id = optional(keys::SELECTION_ID, true)?;
        let choice_number = optional(keys::CHOICE_NUMBER, false)?;
        let registration_id = optional(keys::REGISTRATION_ID, true)?;
        let first_name = optional(keys::FIRST_NAME, false)?;
        let last_name = optional(keys::LAST_NAME, false)?;

        let workshops = config
            .workshop_columns
            .iter()
            .map(|column| Ok((column, resolver.find_column(&column.column_name)?)))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(Self {
            selection_id,
            choice_number,
            registration_id,
            first_name,
            last_name,
            workshops,
        })
    }
}

fn read(sheet: &Sheet, row: u32, column: Option<u32>) -> &str {
    column.map_or("", |c| sheet.cell(row, c)).trim()
}

/// Owns the workshop dictionary for one import run.
pub struct WorkshopCollector<'a> {
    attendees: &'a AttendeeMap,
    options: &'a ImportOptions,
    sink: &'a dyn DiagnosticSink,
    workshops: IndexMap<WorkshopKey, Workshop>,
}

impl<'a> WorkshopCollector<'a> {
    pub fn new(attendees: &'a AttendeeMap, options: &'a ImportOptions, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            attendees,
            options,
            sink,
            workshops: IndexMap::new(),
        }
    }

    /// Scan one period sheet.
    ///
    /// An absent sheet is skipped with a warning unless
    /// [`ImportOptions::skip_missing_periods`] is off.
    pub fn collect_period(&mut self, config: &PeriodSheetConfig, workbook: &Workbook) -> ImportResult<PeriodSummary> {
        let period = config.period();
        let mut summary = PeriodSummary {
            sheet_name: period.sheet_name.clone(),
            display_name: period.display_name.clone(),
            present: false,
            workshop_count: 0,
            selection_count: 0,
        };

        let mut resolver = match ColumnResolver::new(workbook, &config.sheet_name) {
            Ok(resolver) => resolver,
            Err(ImportError::MissingSheet { .. }) if self.options.skip_missing_periods => {
                self.sink.warning(format!(
                    "Period sheet '{}' not found, skipping (available: {})",
                    config.sheet_name,
                    workbook.sheet_names().join(", ")
                ));
                return Ok(summary);
            }
            Err(e) => return Err(e),
        };
        summary.present = true;

        self.sink.info(format!("Collecting workshops from '{}'...", period.display_name));

        let columns = PeriodColumns::resolve(config, &mut resolver)?;
        let sheet = resolver.sheet();
        let workshops_before = self.workshops.len();

        for row in sheet.data_rows() {
            summary.selection_count += self.collect_row(&period, sheet, row, &columns);
        }

        summary.workshop_count = self.workshops.len() - workshops_before;
        self.sink.success(format!(
            "{}: {} workshops, {} selections",
            period.display_name, summary.workshop_count, summary.selection_count
        ));

        Ok(summary)
    }

    /// Returns the number of selections the row produced.
    fn collect_row(&mut self, period: &Period, sheet: &Sheet, row: u32, columns: &PeriodColumns<'_>) -> usize {
        let selection_id = read(sheet, row, columns.selection_id);
        let choice_number = parse_choice_number(read(sheet, row, columns.choice_number));
        let registration_id = parse_registration_id(read(sheet, row, columns.registration_id));

        let mut attendee: Option<Attendee> = None;
        let mut added = 0;

        for (column, index) in &columns.workshops {
            let cell = sheet.cell(row, *index).trim();
            if cell.is_empty() {
                continue;
            }

            let parsed = parse_workshop_cell(cell);
            if parsed.name.is_empty() {
                continue;
            }
            if !parsed.well_formed && self.options.warn_on_malformed_cells {
                self.sink.warning(format!(
                    "{} row {}, column '{}': '{}' has no (Leader) part, kept as workshop name",
                    sheet.name(),
                    row,
                    column.column_name,
                    cell
                ));
            }

            let attendee = attendee.get_or_insert_with(|| self.resolve_attendee(sheet, row, selection_id, columns));
            let duration = column.duration();
            let key = WorkshopKey::new(period, &parsed.name, &parsed.leader, duration);

            let workshop = self
                .workshops
                .entry(key)
                .or_insert_with(|| Workshop::new(parsed.name.clone(), parsed.leader.clone(), period.clone(), duration));

            workshop.add_selection(WorkshopSelection {
                selection_id: attendee.selection_id.clone(),
                workshop_name: parsed.name,
                first_name: attendee.first_name.clone(),
                last_name: attendee.last_name.clone(),
                full_name: attendee.full_name.clone(),
                choice_number,
                duration,
                registration_id,
            });
            added += 1;
        }

        added
    }

    /// Roster first; otherwise an attendee built from the period row's own names.
    fn resolve_attendee(&self, sheet: &Sheet, row: u32, selection_id: &str, columns: &PeriodColumns<'_>) -> Attendee {
        let first_name = read(sheet, row, columns.first_name);
        let last_name = read(sheet, row, columns.last_name);

        let id = if selection_id.is_empty() {
            fallback_selection_id(first_name, last_name)
        } else {
            selection_id.to_string()
        };

        if let Some(attendee) = self.attendees.get(&id) {
            return attendee.clone();
        }

        if id.is_empty() {
            self.sink.warning(format!(
                "{} row {}: workshop selected without a selection id or name",
                sheet.name(),
                row
            ));
        }
        Attendee::new(id, first_name, last_name, "", "")
    }

    /// Workshops in first-seen order.
    pub fn finish(self) -> Vec<Workshop> {
        self.workshops.into_values().collect()
    }
}

/// Collect every configured period sheet, in schema order.
pub fn collect_workshops(
    schema: &Schema,
    workbook: &Workbook,
    attendees: &AttendeeMap,
    options: &ImportOptions,
    sink: &dyn DiagnosticSink,
) -> ImportResult<Vec<Workshop>> {
    collect_with_summaries(schema, workbook, attendees, options, sink).map(|(workshops, _)| workshops)
}

pub(crate) fn collect_with_summaries(
    schema: &Schema,
    workbook: &Workbook,
    attendees: &AttendeeMap,
    options: &ImportOptions,
    sink: &dyn DiagnosticSink,
) -> ImportResult<(Vec<Workshop>, Vec<PeriodSummary>)> {
    let mut collector = WorkshopCollector::new(attendees, options, sink);
    let summaries = schema
        .period_sheets
        .iter()
        .map(|config| collector.collect_period(config, workbook))
        .collect::<ImportResult<Vec<_>>>()?;
    Ok((collector.finish(), summaries))
}
