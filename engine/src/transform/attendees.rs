//! Roster sheet -> attendees keyed by selection id.
//!
//! Rows with neither a first nor a last name are template filler and are
//! skipped. A blank selection id is replaced by the fallback identifier
//! (first and last name with all whitespace removed), so two attendees with
//! identical names share an id. When ids collide the later row wins.

use std::collections::HashMap;

use crate::diagnostics::DiagnosticSink;
use crate::error::ImportResult;
use crate::models::Attendee;
use crate::schema::{keys, ColumnSpec, Schema};
use crate::workbook::Workbook;

use super::columns::ColumnResolver;

/// Selection id -> attendee.
pub type AttendeeMap = HashMap<String, Attendee>;

/// Identifier used when a row carries no selection id.
pub fn fallback_selection_id(first_name: &str, last_name: &str) -> String {
    first_name
        .trim()
        .chars()
        .chain(last_name.trim().chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Column indices of the roster sheet, resolved once.
struct RosterColumns {
    selection_id: Option<u32>,
    first_name: u32,
    last_name: u32,
    email: Option<u32>,
    age: Option<u32>,
}

fn resolve_configured(resolver: &mut ColumnResolver<'_>, spec: Option<&ColumnSpec>) -> ImportResult<Option<u32>> {
    spec.map(|spec| resolver.column_index(spec.text(), spec.mode()))
        .transpose()
}

/// Scan the roster sheet once.
///
/// Column errors (missing sheet, empty sheet, unknown header) abort the load;
/// blank rows do not.
pub fn load_attendees(schema: &Schema, workbook: &Workbook, sink: &dyn DiagnosticSink) -> ImportResult<AttendeeMap> {
    let config = &schema.roster_sheet;
    sink.info(format!("Reading roster sheet '{}'...", config.sheet_name));

    let mut resolver = ColumnResolver::new(workbook, &config.sheet_name)?;
    let columns = RosterColumns {
        first_name: resolver.find_column(config.column_name(keys::FIRST_NAME))?,
        last_name: resolver.find_column(config.column_name(keys::LAST_NAME))?,
        selection_id: resolve_configured(&mut resolver, config.columns.spec(keys::SELECTION_ID))?,
        email: resolve_configured(&mut resolver, config.columns.spec(keys::EMAIL))?,
        age: resolve_configured(&mut resolver, config.columns.spec(keys::AGE))?,
    };

    let sheet = resolver.sheet();
    let read = |row: u32, column: Option<u32>| column.map_or("", |c| sheet.cell(row, c));

    let mut attendees = AttendeeMap::new();
    let mut skipped = 0usize;
    let mut generated = 0usize;
    let mut replaced = 0usize;

    for row in sheet.data_rows() {
        let first_name = sheet.cell(row, columns.first_name).trim();
        let last_name = sheet.cell(row, columns.last_name).trim();
        if first_name.is_empty() && last_name.is_empty() {
            skipped += 1;
            continue;
        }

        let mut selection_id = read(row, columns.selection_id).trim().to_string();
        if selection_id.is_empty() {
            selection_id = fallback_selection_id(first_name, last_name);
            generated += 1;
        }

        let attendee = Attendee::new(
            selection_id.clone(),
            first_name,
            last_name,
            read(row, columns.email),
            read(row, columns.age),
        );
        if attendees.insert(selection_id, attendee).is_some() {
            replaced += 1;
        }
    }

    sink.success(format!("{} attendees loaded", attendees.len()));
    if generated > 0 {
        sink.info(format!("{} selection id(s) generated from names", generated));
    }
    if replaced > 0 {
        sink.info(format!("{} row(s) replaced an earlier row with the same selection id", replaced));
    }
    if skipped > 0 {
        sink.info(format!("{} blank row(s) skipped", skipped));
    }

    Ok(attendees)
}
