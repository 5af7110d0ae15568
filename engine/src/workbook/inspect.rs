//! Structural dump of a workbook, used when onboarding a new spreadsheet
//! layout. Not part of the import path.
//!
//! ```json
//! {
//!   "sheets": [{
//!     "name": "ClassSelection",
//!     "dimension": "A1:E120",
//!     "rows": 120,
//!     "columns": 5,
//!     "headers": ["Selection ID", "First Name", ...],
//!     "sample": { "Selection ID": "S1", "First Name": "Jane", ... }
//!   }]
//! }
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use super::{column_letter, Sheet, Workbook};
use crate::error::{ImportError, ImportResult};

/// Dump of every sheet.
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookDump {
    pub sheets: Vec<SheetDump>,
}

/// Dump of one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SheetDump {
    pub name: String,
    /// `None` for an empty sheet.
    pub dimension: Option<String>,
    pub rows: u32,
    pub columns: u32,
    pub headers: Vec<String>,
    /// First data row keyed by header; blank headers use the column letter.
    pub sample: Option<IndexMap<String, String>>,
}

impl SheetDump {
    fn from_sheet(sheet: &Sheet) -> Self {
        let dimension = sheet.dimension();
        let headers = sheet.header_row().to_vec();

        let sample = (sheet.last_row() >= 2).then(|| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let column = i as u32 + 1;
                    let key = if header.trim().is_empty() {
                        column_letter(column)
                    } else {
                        header.clone()
                    };
                    (key, sheet.cell(2, column).to_string())
                })
                .collect()
        });

        Self {
            name: sheet.name().to_string(),
            dimension: dimension.map(|d| d.reference()),
            rows: dimension.map_or(0, |d| d.rows),
            columns: dimension.map_or(0, |d| d.columns),
            headers,
            sample,
        }
    }
}

pub fn inspect_workbook(workbook: &Workbook) -> WorkbookDump {
    WorkbookDump {
        sheets: workbook.sheets().iter().map(SheetDump::from_sheet).collect(),
    }
}

/// Read xlsx bytes and render the dump as pretty JSON.
pub fn dump_json(bytes: &[u8]) -> ImportResult<String> {
    let workbook = Workbook::from_xlsx_bytes(bytes)?;
    serde_json::to_string_pretty(&inspect_workbook(&workbook))
        .map_err(|e| ImportError::Workbook { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::xlsx_bytes;

    #[test]
    fn test_dump_headers_and_sample() {
        let workbook = Workbook::new(vec![
            Sheet::from_rows(
                "Roster",
                vec![vec!["ID", "", "Name"], vec!["S1", "x", "Jane"], vec!["S2", "", "John"]],
            ),
            Sheet::from_rows("Empty", Vec::<Vec<&str>>::new()),
        ]);

        let dump = inspect_workbook(&workbook);
        assert_eq!(dump.sheets.len(), 2);

        let roster = &dump.sheets[0];
        assert_eq!(roster.dimension.as_deref(), Some("A1:C3"));
        assert_eq!(roster.headers, vec!["ID", "", "Name"]);
        let sample = roster.sample.as_ref().unwrap();
        assert_eq!(sample["ID"], "S1");
        assert_eq!(sample["B"], "x");
        assert_eq!(sample["Name"], "Jane");

        let empty = &dump.sheets[1];
        assert!(empty.dimension.is_none());
        assert!(empty.sample.is_none());
        assert_eq!(empty.rows, 0);
    }

    #[test]
    fn test_dump_json_from_bytes() {
        let bytes = xlsx_bytes(&[("Morning", vec![vec!["Choice Number"], vec!["1"]])]);
        let json: serde_json::Value = serde_json::from_str(&dump_json(&bytes).unwrap()).unwrap();
        assert_eq!(json["sheets"][0]["name"], "Morning");
        assert_eq!(json["sheets"][0]["dimension"], "A1:A2");
        assert_eq!(json["sheets"][0]["sample"]["Choice Number"], "1");
    }
}
