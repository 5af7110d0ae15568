//! Event schema: which sheets to read and how to find their columns.
//!
//! The schema is a JSON document, normally the bundled
//! `schemas/event-schema.json`. It is checked against the embedded JSON
//! Schema (see [`validation`]) before being deserialized into [`Schema`].
//!
//! # Column specifications
//!
//! A column is configured either as a plain string (exact header match) or
//! as an object with a `pattern` field (substring match):
//!
//! ```json
//! "columns": {
//!     "firstName": "First Name",
//!     "registrationId": { "pattern": "Registration ID" }
//! }
//! ```
//!
//! Both forms deserialize into [`ColumnSpec`] so the distinction survives
//! until the resolver uses it.

pub mod validation;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::DiagnosticSink;
use crate::error::{ImportError, ImportResult, LookupMode};
use crate::models::{Period, WorkshopDuration};
use crate::resources;

/// Resource name of the bundled schema document.
pub const DEFAULT_SCHEMA_RESOURCE: &str = "event-schema.json";

// =============================================================================
// Column Specification
// =============================================================================

/// How to find one column in a sheet's header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Header equals this text.
    Exact(String),
    /// Header contains this text.
    Pattern { pattern: String },
}

impl ColumnSpec {
    pub fn exact(name: impl Into<String>) -> Self {
        ColumnSpec::Exact(name.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        ColumnSpec::Pattern { pattern: pattern.into() }
    }

    /// The configured header text or pattern.
    pub fn text(&self) -> &str {
        match self {
            ColumnSpec::Exact(name) => name,
            ColumnSpec::Pattern { pattern } => pattern,
        }
    }

    pub fn mode(&self) -> LookupMode {
        match self {
            ColumnSpec::Exact(_) => LookupMode::Exact,
            ColumnSpec::Pattern { .. } => LookupMode::Pattern,
        }
    }
}

/// Logical field name -> column specification, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Columns(IndexMap<String, ColumnSpec>);

impl Columns {
    pub fn spec(&self, key: &str) -> Option<&ColumnSpec> {
        self.0.get(key)
    }

    /// Header text or pattern for `key`, empty when the key is not configured.
    pub fn name(&self, key: &str) -> &str {
        self.spec(key).map(ColumnSpec::text).unwrap_or("")
    }

    pub fn insert(&mut self, key: impl Into<String>, spec: ColumnSpec) {
        self.0.insert(key.into(), spec);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ColumnSpec)> for Columns {
    fn from_iter<I: IntoIterator<Item = (String, ColumnSpec)>>(iter: I) -> Self {
        Columns(iter.into_iter().collect())
    }
}

/// Logical column keys used by the loaders.
pub mod keys {
    pub const SELECTION_ID: &str = "selectionId";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const AGE: &str = "age";
    pub const CHOICE_NUMBER: &str = "choiceNumber";
    pub const REGISTRATION_ID: &str = "registrationId";
}

// =============================================================================
// Sheet Configurations
// =============================================================================

/// The roster sheet listing attendees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSheetConfig {
    pub sheet_name: String,
    pub columns: Columns,
}

impl RosterSheetConfig {
    /// Configured column text for `key`, empty if absent.
    pub fn column_name(&self, key: &str) -> &str {
        self.columns.name(key)
    }
}

/// One day-range slot on a period sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopColumn {
    pub column_name: String,
    pub start_day: u32,
    pub end_day: u32,
}

impl WorkshopColumn {
    pub fn duration(&self) -> WorkshopDuration {
        WorkshopDuration::new(self.start_day, self.end_day)
    }
}

/// A period sheet and the workshop slots it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSheetConfig {
    pub sheet_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub columns: Columns,
    pub workshop_columns: Vec<WorkshopColumn>,
}

impl PeriodSheetConfig {
    /// Configured column text for `key`, empty if absent.
    pub fn column_name(&self, key: &str) -> &str {
        self.columns.name(key)
    }

    pub fn period(&self) -> Period {
        Period::new(self.sheet_name.clone(), Some(self.display_name.as_str()))
    }
}

/// Human description of the workshop cell convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopFormat {
    pub pattern: String,
    #[serde(default)]
    pub description: String,
}

impl Default for WorkshopFormat {
    fn default() -> Self {
        Self {
            pattern: "WorkshopName (LeaderName)".to_string(),
            description: "Workshop name followed by the leader's name in parentheses".to_string(),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// A loaded event schema. Immutable for the duration of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub event_name: String,
    pub total_days: u32,
    #[serde(rename = "classSelectionSheet")]
    pub roster_sheet: RosterSheetConfig,
    pub period_sheets: Vec<PeriodSheetConfig>,
    #[serde(default)]
    pub workshop_format: WorkshopFormat,
}

impl Schema {
    pub fn period_sheet(&self, sheet_name: &str) -> Option<&PeriodSheetConfig> {
        self.period_sheets.iter().find(|p| p.sheet_name == sheet_name)
    }

    /// Checks that JSON Schema cannot express.
    fn check_day_ranges(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for period in &self.period_sheets {
            for column in &period.workshop_columns {
                if column.start_day == 0 || column.end_day < column.start_day {
                    errors.push(format!(
                        "period '{}', workshop column '{}': invalid day range {}-{}",
                        period.sheet_name, column.column_name, column.start_day, column.end_day
                    ));
                } else if self.total_days > 0 && column.end_day > self.total_days {
                    errors.push(format!(
                        "period '{}', workshop column '{}': day {} is past totalDays {}",
                        period.sheet_name, column.column_name, column.end_day, self.total_days
                    ));
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parse and validate a schema document.
///
/// `source_name` names the file or resource in error messages.
pub fn load_schema(bytes: &[u8], source_name: &str, sink: &dyn DiagnosticSink) -> ImportResult<Schema> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| ImportError::schema(source_name, format!("not valid JSON: {}", e)))?;

    validation::validate_schema_document(&document)
        .map_err(|errors| ImportError::schema(source_name, errors.join("; ")))?;

    let schema: Schema = serde_json::from_value(document)
        .map_err(|e| ImportError::schema(source_name, e.to_string()))?;

    schema
        .check_day_ranges()
        .map_err(|errors| ImportError::schema(source_name, errors.join("; ")))?;

    sink.success(format!(
        "Loaded schema '{}' from {} ({} period sheet(s), {} day(s))",
        schema.event_name,
        source_name,
        schema.period_sheets.len(),
        schema.total_days
    ));

    Ok(schema)
}

/// Load a schema document from disk.
pub fn load_schema_file<P: AsRef<Path>>(path: P, sink: &dyn DiagnosticSink) -> ImportResult<Schema> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    load_schema(&bytes, &path.display().to_string(), sink)
}

/// The schema bundled with this build.
pub fn default_schema(sink: &dyn DiagnosticSink) -> ImportResult<Schema> {
    let bytes = resources::resource(DEFAULT_SCHEMA_RESOURCE)?;
    load_schema(bytes, DEFAULT_SCHEMA_RESOURCE, sink)
}
