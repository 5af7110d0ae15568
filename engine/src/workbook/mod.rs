//! In-memory workbook: every sheet as a grid of cell texts.
//!
//! Workbooks are read once from xlsx bytes and never mutated afterwards, so
//! an import can be retried against the same [`Workbook`] with a different
//! schema. Rows and columns are 1-based throughout, row 1 being the header.

pub mod inspect;

use std::io::Cursor;
use std::path::Path;

use serde::Serialize;
use umya_spreadsheet::Worksheet;

use crate::error::{ImportError, ImportResult};

// =============================================================================
// Dimension
// =============================================================================

/// Extent of the non-blank cells of a sheet, anchored at A1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub rows: u32,
    pub columns: u32,
}

impl Dimension {
    /// Spreadsheet-style range, e.g. `A1:D20`.
    pub fn reference(&self) -> String {
        format!("A1:{}{}", column_letter(self.columns), self.rows)
    }
}

/// 1 -> "A", 27 -> "AA".
pub fn column_letter(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

// =============================================================================
// Sheet
// =============================================================================

/// One worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Build a sheet from row-major cell texts. The first row is the header.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let mut sheet = Self { name: name.into(), rows };
        sheet.trim_to_content();
        sheet
    }

    fn from_worksheet(worksheet: &Worksheet) -> Self {
        let (max_col, max_row) = worksheet.get_highest_column_and_row();
        let rows = (1..=max_row)
            .map(|row| {
                (1..=max_col)
                    .map(|col| {
                        worksheet
                            .get_cell((col, row))
                            .map(|cell| cell.get_value().to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        let mut sheet = Self { name: worksheet.get_name().to_string(), rows };
        sheet.trim_to_content();
        sheet
    }

    /// Drop trailing blank rows and columns (styled but empty cells).
    fn trim_to_content(&mut self) {
        while self.rows.last().is_some_and(|row| row.iter().all(|c| c.trim().is_empty())) {
            self.rows.pop();
        }
        let width = self
            .rows
            .iter()
            .filter_map(|row| row.iter().rposition(|c| !c.trim().is_empty()))
            .max()
            .map_or(0, |last| last + 1);
        for row in &mut self.rows {
            row.truncate(width);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` when the sheet holds no non-blank cell.
    pub fn dimension(&self) -> Option<Dimension> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if self.rows.is_empty() || columns == 0 {
            return None;
        }
        Some(Dimension {
            rows: self.rows.len() as u32,
            columns: columns as u32,
        })
    }

    /// Last row holding data, 0 for an empty sheet.
    pub fn last_row(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Text of the cell at 1-based `(row, column)`, empty when blank or out of range.
    pub fn cell(&self, row: u32, column: u32) -> &str {
        if row == 0 || column == 0 {
            return "";
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(column as usize - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Row 1 as written, including blank header cells.
    pub fn header_row(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row numbers after the header.
    pub fn data_rows(&self) -> std::ops::RangeInclusive<u32> {
        2..=self.last_row()
    }
}

// =============================================================================
// Workbook
// =============================================================================

/// All sheets of one workbook, in tab order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Read an xlsx document. The bytes are copied; the caller's buffer is not retained.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> ImportResult<Self> {
        let cursor = Cursor::new(bytes.to_vec());
        let book = umya_spreadsheet::reader::xlsx::read_reader(cursor, true)
            .map_err(|e| ImportError::Workbook { reason: e.to_string() })?;

        let sheets = book
            .get_sheet_collection()
            .iter()
            .map(Sheet::from_worksheet)
            .collect();

        Ok(Self { sheets })
    }

    /// Read an xlsx file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_xlsx_bytes(&bytes)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Like [`Workbook::sheet`], but absence is a `MissingSheet` error.
    pub fn require_sheet(&self, name: &str) -> ImportResult<&Sheet> {
        self.sheet(name).ok_or_else(|| ImportError::MissingSheet {
            expected: name.to_string(),
            available: self.sheet_names(),
        })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::xlsx_bytes;

    fn roster() -> Sheet {
        Sheet::from_rows(
            "Roster",
            vec![
                vec!["Selection ID", "First Name", "Last Name"],
                vec!["S1", "Jane", "Doe"],
                vec!["", "John", ""],
            ],
        )
    }

    #[test]
    fn test_cell_access_is_one_based() {
        let sheet = roster();
        assert_eq!(sheet.cell(1, 1), "Selection ID");
        assert_eq!(sheet.cell(2, 2), "Jane");
        assert_eq!(sheet.cell(3, 3), "");
        assert_eq!(sheet.cell(0, 1), "");
        assert_eq!(sheet.cell(99, 1), "");
        assert_eq!(sheet.last_row(), 3);
        assert_eq!(sheet.data_rows().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_dimension() {
        let sheet = roster();
        let dim = sheet.dimension().unwrap();
        assert_eq!(dim, Dimension { rows: 3, columns: 3 });
        assert_eq!(dim.reference(), "A1:C3");

        let empty = Sheet::from_rows("Empty", Vec::<Vec<&str>>::new());
        assert!(empty.dimension().is_none());
        assert_eq!(empty.data_rows().count(), 0);
    }

    #[test]
    fn test_trailing_blanks_trimmed() {
        let sheet = Sheet::from_rows(
            "Padded",
            vec![vec!["A", "B", ""], vec!["1", "", "  "], vec!["", "", ""]],
        );
        assert_eq!(sheet.dimension().unwrap(), Dimension { rows: 2, columns: 2 });

        let blank = Sheet::from_rows("Blank", vec![vec!["", " "]]);
        assert!(blank.dimension().is_none());
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(53), "BA");
    }

    #[test]
    fn test_require_sheet_lists_available() {
        let workbook = Workbook::new(vec![roster()]);
        assert!(workbook.require_sheet("Roster").is_ok());
        match workbook.require_sheet("Morning").unwrap_err() {
            ImportError::MissingSheet { expected, available } => {
                assert_eq!(expected, "Morning");
                assert_eq!(available, vec!["Roster".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_xlsx_bytes_roundtrip_keeps_sheet_order_and_cells() {
        let bytes = xlsx_bytes(&[
            ("Roster", vec![vec!["Selection ID", "First Name"], vec!["S1", "Jane"]]),
            ("Morning", vec![vec!["Choice Number"], vec!["2"]]),
        ]);

        let workbook = Workbook::from_xlsx_bytes(&bytes).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Roster", "Morning"]);

        let roster = workbook.sheet("Roster").unwrap();
        assert_eq!(roster.cell(2, 2), "Jane");
        assert_eq!(workbook.sheet("Morning").unwrap().cell(2, 1), "2");
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = Workbook::from_xlsx_bytes(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ImportError::Workbook { .. }));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Workbook::open(dir.path().join("absent.xlsx")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
