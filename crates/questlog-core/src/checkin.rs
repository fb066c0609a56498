//! Recurring check-ins (appointments and similar "last + interval" reminders).

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One tracked appointment type inside a check-in group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInSubcategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_months: Option<u32>,
    /// Next reminder, kept as `last_date + interval_months`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckInSubcategory {
    pub fn new(name: impl Into<String>, interval_months: Option<u32>) -> Self {
        Self {
            name: name.into(),
            last_date: None,
            interval_months,
            next_date: None,
            notes: None,
        }
    }

    /// Record an occurrence and reproject the next due date.
    pub fn record(&mut self, date: NaiveDate) {
        self.last_date = Some(date);
        self.next_date = self
            .interval_months
            .and_then(|months| date.checked_add_months(Months::new(months)));
    }

    pub fn overdue(&self, today: NaiveDate) -> bool {
        matches!(self.next_date, Some(next) if next <= today)
    }
}

/// A named group of check-in subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub subcategories: Vec<CheckInSubcategory>,
}

impl CheckIn {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, subcategories: Vec<CheckInSubcategory>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            subcategories,
        }
    }

    /// Record an occurrence for the named subcategory. Returns false when
    /// the subcategory does not exist.
    pub fn record(&mut self, subcategory: &str, date: NaiveDate) -> bool {
        match self.subcategories.iter_mut().find(|s| s.name == subcategory) {
            Some(sub) => {
                sub.record(date);
                true
            }
            None => false,
        }
    }

    /// Replace the notes on the named subcategory. Empty input clears them.
    pub fn set_notes(&mut self, subcategory: &str, notes: Option<String>) -> bool {
        match self.subcategories.iter_mut().find(|s| s.name == subcategory) {
            Some(sub) => {
                sub.notes = notes
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn recording_projects_next_date() {
        let mut checkin = CheckIn::new(
            "Doctor Appointments",
            "🩺",
            vec![CheckInSubcategory::new("Dentist", Some(6))],
        );

        assert!(checkin.record("Dentist", date("2025-04-10")));
        let sub = &checkin.subcategories[0];
        assert_eq!(sub.last_date, Some(date("2025-04-10")));
        assert_eq!(sub.next_date, Some(date("2025-10-10")));
    }

    #[test]
    fn month_arithmetic_clamps_day() {
        let mut sub = CheckInSubcategory::new("Eye Doctor", Some(1));
        sub.record(date("2025-01-31"));
        assert_eq!(sub.next_date, Some(date("2025-02-28")));
    }

    #[test]
    fn missing_interval_leaves_next_date_empty() {
        let mut sub = CheckInSubcategory::new("GP", None);
        sub.record(date("2025-04-10"));
        assert_eq!(sub.last_date, Some(date("2025-04-10")));
        assert!(sub.next_date.is_none());
    }

    #[test]
    fn unknown_subcategory_is_rejected() {
        let mut checkin = CheckIn::new("Doctor Appointments", "🩺", vec![]);
        assert!(!checkin.record("Dentist", date("2025-04-10")));
        assert!(!checkin.set_notes("Dentist", Some("call first".into())));
    }

    #[test]
    fn notes_are_trimmed_and_cleared() {
        let mut checkin = CheckIn::new(
            "Doctor Appointments",
            "🩺",
            vec![CheckInSubcategory::new("Dermatologist", Some(6))],
        );
        assert!(checkin.set_notes("Dermatologist", Some("  ask about mole  ".into())));
        assert_eq!(
            checkin.subcategories[0].notes.as_deref(),
            Some("ask about mole")
        );
        assert!(checkin.set_notes("Dermatologist", Some("   ".into())));
        assert!(checkin.subcategories[0].notes.is_none());
    }

    #[test]
    fn overdue_compares_against_today() {
        let mut sub = CheckInSubcategory::new("Dentist", Some(6));
        sub.record(date("2024-10-01"));
        assert!(sub.overdue(date("2025-04-10")));
        assert!(!sub.overdue(date("2025-03-01")));
    }
}
