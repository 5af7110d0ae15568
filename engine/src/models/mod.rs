//! Domain models produced by the import.
//!
//! - [`Attendee`] - one roster entry, keyed by selection id
//! - [`WorkshopDuration`] - inclusive day range of a workshop slot
//! - [`WorkshopSelection`] - one attendee's registration for one workshop
//! - [`Period`] - the schedule segment a period sheet represents
//! - [`Workshop`] - aggregate root, unique per [`WorkshopKey`]

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Attendee
// =============================================================================

/// A person on the roster sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub selection_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    /// Free-form, may be a range such as "8-12".
    pub age: String,
}

impl Attendee {
    /// Build an attendee, trimming names and deriving `full_name`.
    pub fn new(
        selection_id: impl Into<String>,
        first_name: &str,
        last_name: &str,
        email: &str,
        age: &str,
    ) -> Self {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        let full_name = full_name(&first_name, &last_name);
        Self {
            selection_id: selection_id.into(),
            first_name,
            last_name,
            full_name,
            email: email.trim().to_string(),
            age: age.trim().to_string(),
        }
    }
}

fn full_name(first: &str, last: &str) -> String {
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{} {}", first, last),
        (false, true) => first.to_string(),
        (true, false) => last.to_string(),
        (true, true) => String::new(),
    }
}

// =============================================================================
// Workshop Duration
// =============================================================================

/// Inclusive, 1-based day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopDuration {
    pub start_day: u32,
    pub end_day: u32,
}

impl WorkshopDuration {
    pub fn new(start_day: u32, end_day: u32) -> Self {
        Self { start_day, end_day }
    }

    pub fn number_of_days(&self) -> u32 {
        self.end_day.saturating_sub(self.start_day) + 1
    }

    /// "Day 2" for a single day, "Days 1-4" otherwise.
    pub fn description(&self) -> String {
        if self.start_day == self.end_day {
            format!("Day {}", self.start_day)
        } else {
            format!("Days {}-{}", self.start_day, self.end_day)
        }
    }
}

// =============================================================================
// Workshop Selection
// =============================================================================

/// One attendee registered for one workshop occurrence.
///
/// Name fields are copied from the attendee when the selection is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopSelection {
    pub selection_id: String,
    pub workshop_name: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    /// 1 is the first choice, higher values are backups.
    pub choice_number: u32,
    pub duration: WorkshopDuration,
    /// Only used to order selections.
    pub registration_id: i64,
}

impl WorkshopSelection {
    pub fn is_first_choice(&self) -> bool {
        self.choice_number == 1
    }
}

// =============================================================================
// Period
// =============================================================================

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

/// A segment of the event schedule, backed by one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub sheet_name: String,
    pub display_name: String,
}

impl Period {
    /// Uses `display_name` when given, otherwise derives one from the sheet name.
    pub fn new(sheet_name: impl Into<String>, display_name: Option<&str>) -> Self {
        let sheet_name = sheet_name.into();
        let display_name = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => Self::derive_display_name(&sheet_name),
        };
        Self { sheet_name, display_name }
    }

    /// "MorningFirstPeriod" -> "Morning First Period".
    pub fn derive_display_name(sheet_name: &str) -> String {
        CAMEL_BOUNDARY.replace_all(sheet_name, "$1 $2").into_owned()
    }
}

// =============================================================================
// Workshop
// =============================================================================

/// Identity of a workshop offering.
///
/// Two selections land in the same [`Workshop`] exactly when their keys are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkshopKey {
    pub sheet_name: String,
    pub name: String,
    pub leader: String,
    pub start_day: u32,
    pub end_day: u32,
}

impl WorkshopKey {
    pub fn new(period: &Period, name: &str, leader: &str, duration: WorkshopDuration) -> Self {
        Self {
            sheet_name: period.sheet_name.clone(),
            name: name.to_string(),
            leader: leader.to_string(),
            start_day: duration.start_day,
            end_day: duration.end_day,
        }
    }
}

/// A workshop offering with every selection made for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub name: String,
    pub leader: String,
    pub period: Period,
    pub duration: WorkshopDuration,
    /// In the order rows were scanned.
    pub selections: Vec<WorkshopSelection>,
}

impl Workshop {
    pub fn new(name: impl Into<String>, leader: impl Into<String>, period: Period, duration: WorkshopDuration) -> Self {
        Self {
            name: name.into(),
            leader: leader.into(),
            period,
            duration,
            selections: Vec::new(),
        }
    }

    pub fn key(&self) -> WorkshopKey {
        WorkshopKey::new(&self.period, &self.name, &self.leader, self.duration)
    }

    pub fn add_selection(&mut self, selection: WorkshopSelection) {
        self.selections.push(selection);
    }

    /// Selections by choice number, then registration id.
    pub fn sorted_selections(&self) -> Vec<&WorkshopSelection> {
        let mut sorted: Vec<_> = self.selections.iter().collect();
        sorted.sort_by_key(|s| (s.choice_number, s.registration_id));
        sorted
    }

    /// First-choice selections ordered by registration id.
    pub fn enrolled(&self) -> Vec<&WorkshopSelection> {
        let mut enrolled: Vec<_> = self.selections.iter().filter(|s| s.is_first_choice()).collect();
        enrolled.sort_by_key(|s| s.registration_id);
        enrolled
    }

    /// Backup selections ordered by preference, then registration id.
    pub fn backups(&self) -> Vec<&WorkshopSelection> {
        let mut backups: Vec<_> = self.selections.iter().filter(|s| !s.is_first_choice()).collect();
        backups.sort_by_key(|s| (s.choice_number, s.registration_id));
        backups
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(id: &str, choice: u32, registration: i64) -> WorkshopSelection {
        WorkshopSelection {
            selection_id: id.into(),
            workshop_name: "Pottery".into(),
            first_name: id.into(),
            last_name: String::new(),
            full_name: id.into(),
            choice_number: choice,
            duration: WorkshopDuration::new(1, 4),
            registration_id: registration,
        }
    }

    #[test]
    fn test_attendee_full_name() {
        let a = Attendee::new("S1", " Jane ", "Doe", "", "");
        assert_eq!(a.first_name, "Jane");
        assert_eq!(a.full_name, "Jane Doe");

        let only_last = Attendee::new("S2", "", "Smith", "", "");
        assert_eq!(only_last.full_name, "Smith");
    }

    #[test]
    fn test_duration_description() {
        assert_eq!(WorkshopDuration::new(2, 2).description(), "Day 2");
        assert_eq!(WorkshopDuration::new(1, 4).description(), "Days 1-4");
        assert_eq!(WorkshopDuration::new(1, 4).number_of_days(), 4);
        assert_eq!(WorkshopDuration::new(3, 3).number_of_days(), 1);
    }

    #[test]
    fn test_period_display_name() {
        assert_eq!(Period::new("MorningClasses", None).display_name, "Morning Classes");
        assert_eq!(Period::new("AfternoonP2", Some("  ")).display_name, "Afternoon P2");
        assert_eq!(Period::new("Morning", Some("First Period")).display_name, "First Period");
        assert_eq!(Period::derive_display_name("Period1Workshops"), "Period1 Workshops");
    }

    #[test]
    fn test_workshop_key_distinguishes_duration() {
        let period = Period::new("Morning", None);
        let a = WorkshopKey::new(&period, "Pottery", "Maria", WorkshopDuration::new(1, 2));
        let b = WorkshopKey::new(&period, "Pottery", "Maria", WorkshopDuration::new(1, 4));
        assert_ne!(a, b);
        assert_eq!(a, WorkshopKey::new(&period, "Pottery", "Maria", WorkshopDuration::new(1, 2)));
    }

    #[test]
    fn test_enrolled_and_backups_ordering() {
        let mut workshop = Workshop::new("Pottery", "Maria", Period::new("Morning", None), WorkshopDuration::new(1, 4));
        workshop.add_selection(selection("c", 2, 5));
        workshop.add_selection(selection("a", 1, 9));
        workshop.add_selection(selection("b", 1, 3));
        workshop.add_selection(selection("d", 3, 1));

        let enrolled: Vec<_> = workshop.enrolled().iter().map(|s| s.selection_id.as_str()).collect();
        assert_eq!(enrolled, vec!["b", "a"]);

        let backups: Vec<_> = workshop.backups().iter().map(|s| s.selection_id.as_str()).collect();
        assert_eq!(backups, vec!["c", "d"]);

        let sorted: Vec<_> = workshop.sorted_selections().iter().map(|s| s.selection_id.as_str()).collect();
        assert_eq!(sorted, vec!["b", "a", "c", "d"]);

        // collector order is untouched
        assert_eq!(workshop.selections[0].selection_id, "c");
    }

    #[test]
    fn test_workshop_serialization() {
        let workshop = Workshop::new("Pottery", "Maria Lopez", Period::new("Morning", None), WorkshopDuration::new(1, 4));
        let json = serde_json::to_value(&workshop).unwrap();
        assert_eq!(json["name"], "Pottery");
        assert_eq!(json["period"]["sheetName"], "Morning");
        assert_eq!(json["duration"]["startDay"], 1);
    }
}
