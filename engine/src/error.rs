//! Error types for the workshop import engine.
//!
//! Every failure the engine reports is an [`ImportError`]. The variants map
//! one-to-one onto the diagnostic kinds a caller needs to act on:
//!
//! - [`ImportError::MissingSheet`] / [`ImportError::EmptySheet`] - a sheet
//!   named by the schema is absent or has no header row
//! - [`ImportError::MissingColumn`] - a column specification matched no header
//! - [`ImportError::InvalidWorkshopFormat`] - reserved, see [`crate::transform::format`]
//! - [`ImportError::SchemaValidation`] - the schema document is unusable
//! - [`ImportError::MissingResource`] - an embedded asset is not bundled
//!
//! Row-level anomalies (blank names, unparseable numbers) are never errors;
//! they are recovered where they occur.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Lookup mode
// =============================================================================

/// How a column specification is matched against header cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupMode {
    /// Header text equals the requested name.
    Exact,
    /// Header text contains the requested pattern.
    Pattern,
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupMode::Exact => write!(f, "column"),
            LookupMode::Pattern => write!(f, "column matching pattern"),
        }
    }
}

// =============================================================================
// Import Errors
// =============================================================================

/// Errors raised while loading a schema or importing a workbook.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A sheet required by the schema is not in the workbook.
    #[error("Sheet '{expected}' not found. Available sheets: {}", .available.join(", "))]
    MissingSheet {
        expected: String,
        available: Vec<String>,
    },

    /// The sheet exists but has no cells, so no header row to resolve against.
    #[error("Sheet '{sheet}' is empty (no header row). Available sheets: {}", .available.join(", "))]
    EmptySheet {
        sheet: String,
        available: Vec<String>,
    },

    /// No header cell satisfied the column specification.
    #[error("Sheet '{sheet}': no {mode} '{expected}'. Available columns: {}", .available.join(", "))]
    MissingColumn {
        sheet: String,
        expected: String,
        mode: LookupMode,
        available: Vec<String>,
    },

    /// A workshop cell could not be split into name and leader.
    #[error("Sheet '{sheet}', row {row}, column '{column}': invalid workshop format '{value}'")]
    InvalidWorkshopFormat {
        sheet: String,
        row: u32,
        column: String,
        value: String,
    },

    /// The schema document could not be parsed or is missing sections.
    #[error("Invalid schema '{source_name}': {reason}")]
    SchemaValidation { source_name: String, reason: String },

    /// An embedded resource is not bundled with this build.
    #[error("Resource not found: {0}")]
    MissingResource(String),

    /// The workbook bytes could not be read as a spreadsheet.
    #[error("Failed to read workbook: {reason}")]
    Workbook { reason: String },

    /// Failed to read a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// True for both sheet-level variants (absent or empty sheet).
    pub fn is_missing_sheet(&self) -> bool {
        matches!(
            self,
            ImportError::MissingSheet { .. } | ImportError::EmptySheet { .. }
        )
    }

    pub(crate) fn schema(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ImportError::SchemaValidation {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for engine operations.
pub type ImportResult<T> = Result<T, ImportError>;
