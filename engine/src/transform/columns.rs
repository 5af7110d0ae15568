//! Column resolution against a sheet's header row.
//!
//! Columns are located by header text rather than position. Two modes:
//!
//! - exact: header equals the requested name (case-sensitive)
//! - pattern: header contains the requested text (case-sensitive), for
//!   headers carrying a year or event prefix that changes between events
//!
//! Each distinct request scans row 1 once; the index is cached for the life
//! of the resolver. Blank cells read as `""`. Only an unresolvable header is
//! an error.

use std::collections::HashMap;

use crate::error::{ImportError, ImportResult, LookupMode};
use crate::schema::ColumnSpec;
use crate::workbook::{Sheet, Workbook};

/// Resolves columns of one sheet.
pub struct ColumnResolver<'a> {
    sheet: &'a Sheet,
    sheet_names: Vec<String>,
    cache: HashMap<(LookupMode, String), u32>,
}

impl<'a> ColumnResolver<'a> {
    /// Resolver for the sheet `sheet_name`, or `MissingSheet` if the workbook lacks it.
    pub fn new(workbook: &'a Workbook, sheet_name: &str) -> ImportResult<Self> {
        let sheet = workbook.require_sheet(sheet_name)?;
        Ok(Self::for_sheet(sheet, workbook.sheet_names()))
    }

    /// `sheet_names` is reported if the sheet turns out to be empty.
    pub fn for_sheet(sheet: &'a Sheet, sheet_names: Vec<String>) -> Self {
        Self {
            sheet,
            sheet_names,
            cache: HashMap::new(),
        }
    }

    pub fn sheet(&self) -> &'a Sheet {
        self.sheet
    }

    /// 1-based index of the first header satisfying `text` under `mode`.
    pub fn column_index(&mut self, text: &str, mode: LookupMode) -> ImportResult<u32> {
        if let Some(&index) = self.cache.get(&(mode, text.to_string())) {
            return Ok(index);
        }

        if self.sheet.dimension().is_none() {
            return Err(ImportError::EmptySheet {
                sheet: self.sheet.name().to_string(),
                available: self.sheet_names.clone(),
            });
        }

        let headers = self.sheet.header_row();
        let position = headers.iter().position(|header| match mode {
            LookupMode::Exact => header == text,
            LookupMode::Pattern => header.contains(text),
        });

        match position {
            Some(i) => {
                let index = i as u32 + 1;
                self.cache.insert((mode, text.to_string()), index);
                Ok(index)
            }
            None => Err(ImportError::MissingColumn {
                sheet: self.sheet.name().to_string(),
                expected: text.to_string(),
                mode,
                available: headers
                    .iter()
                    .filter(|h| !h.trim().is_empty())
                    .cloned()
                    .collect(),
            }),
        }
    }

    pub fn find_column(&mut self, name: &str) -> ImportResult<u32> {
        self.column_index(name, LookupMode::Exact)
    }

    pub fn find_column_by_pattern(&mut self, pattern: &str) -> ImportResult<u32> {
        self.column_index(pattern, LookupMode::Pattern)
    }

    /// Cell text in the column whose header is exactly `name`.
    pub fn cell_value(&mut self, row: u32, name: &str) -> ImportResult<&'a str> {
        let column = self.find_column(name)?;
        Ok(self.sheet.cell(row, column))
    }

    /// Cell text in the first column whose header contains `pattern`.
    pub fn cell_value_by_pattern(&mut self, row: u32, pattern: &str) -> ImportResult<&'a str> {
        let column = self.find_column_by_pattern(pattern)?;
        Ok(self.sheet.cell(row, column))
    }

    /// Cell text for a configured column, honouring its lookup mode.
    pub fn value(&mut self, row: u32, spec: &ColumnSpec) -> ImportResult<&'a str> {
        let column = self.column_index(spec.text(), spec.mode())?;
        Ok(self.sheet.cell(row, column))
    }

    /// Like the lookups above, but an unconfigured (empty) name reads as blank.
    pub fn optional_value(&mut self, row: u32, text: &str, mode: LookupMode) -> ImportResult<&'a str> {
        if text.is_empty() {
            return Ok("");
        }
        let column = self.column_index(text, mode)?;
        Ok(self.sheet.cell(row, column))
    }
}
