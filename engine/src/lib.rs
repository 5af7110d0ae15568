//! # Workshop Import - registration spreadsheets to workshop rosters
//!
//! Reads a registration workbook (one roster sheet plus one sheet per
//! schedule period) and produces [`Workshop`] aggregates: every offering,
//! unique by period, name, leader and day range, with the attendees who
//! selected it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Schema JSON │────▶│   Schema    │────▶│  Attendees  │────▶│  Collector  │──▶ Vec<Workshop>
//! │ xlsx bytes  │────▶│  Workbook   │────▶│  (roster)   │     │  (periods)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Sheet layout is never hard-coded: the schema names the sheets and
//! describes each column by exact header text or by a substring pattern.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use workshop_import::{default_schema, import_workbook, ImportOptions, NullSink};
//!
//! let schema = default_schema(&NullSink)?;
//! let bytes = std::fs::read("registrations.xlsx")?;
//! let outcome = import_workbook(&bytes, &schema, &ImportOptions::default(), &NullSink)?;
//! for workshop in &outcome.workshops {
//!     println!("{} ({}) - {}", workshop.name, workshop.leader, workshop.selections.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy
//! - [`diagnostics`] - Log entries and sinks
//! - [`models`] - Domain models (Workshop, WorkshopSelection, Attendee)
//! - [`schema`] - Event schema loading and validation
//! - [`workbook`] - xlsx reading and structural dump
//! - [`transform`] - Column resolution, parsing, attendees, collection
//! - [`resources`] - Embedded assets

// Core modules
pub mod diagnostics;
pub mod error;
pub mod models;

// Configuration
pub mod resources;
pub mod schema;

// Input
pub mod workbook;

// Transformation
pub mod transform;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports - Errors and diagnostics
// =============================================================================

pub use error::{ImportError, ImportResult, LookupMode};

pub use diagnostics::{ConsoleSink, DiagnosticSink, LogEntry, LogLevel, MemorySink, NullSink};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Attendee, Period, Workshop, WorkshopDuration, WorkshopKey, WorkshopSelection};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{
    default_schema,
    load_schema,
    load_schema_file,
    ColumnSpec,
    PeriodSheetConfig,
    RosterSheetConfig,
    Schema,
    WorkshopColumn,
};

// =============================================================================
// Re-exports - Workbook
// =============================================================================

pub use workbook::inspect::{dump_json, inspect_workbook, WorkbookDump};
pub use workbook::{Dimension, Sheet, Workbook};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    collect_workshops,
    import_parsed,
    import_workbook,
    import_workbook_file,
    load_attendees,
    ImportOptions,
    ImportOutcome,
    PeriodSummary,
};
