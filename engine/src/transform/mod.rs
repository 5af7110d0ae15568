//! Transformation module.
//!
//! Workbook + schema -> workshops:
//! - Columns: header lookup by exact name or pattern
//! - Format: "Workshop (Leader)" cell parsing
//! - Attendees: roster sheet loading
//! - Collector: period sheets to workshop aggregates
//! - Pipeline: end-to-end import

pub mod attendees;
pub mod collector;
pub mod columns;
pub mod format;
pub mod pipeline;

pub use attendees::{fallback_selection_id, load_attendees, AttendeeMap};
pub use collector::{collect_workshops, parse_choice_number, parse_registration_id, PeriodSummary, WorkshopCollector};
pub use columns::ColumnResolver;
pub use format::{parse_workshop_cell, ParsedWorkshop};
pub use pipeline::*;
