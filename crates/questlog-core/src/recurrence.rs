//! Recurring-task date projection.
//!
//! Given a just-completed task's recurrence rule and base date, compute when
//! the next instance falls due. Projection is pure calendar arithmetic; the
//! caller builds the new task record from the projected date.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a task repeats.
///
/// Unknown kinds found in stored data deserialize as `Unsupported`, which
/// projects to nothing: recurrence silently stops rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Unsupported,
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
            RecurrenceKind::Yearly => "yearly",
            RecurrenceKind::Unsupported => "unsupported",
        }
    }

    /// Lenient parse: anything unrecognized becomes `Unsupported`.
    pub fn parse(s: &str) -> Self {
        match s {
            "daily" => RecurrenceKind::Daily,
            "weekly" => RecurrenceKind::Weekly,
            "monthly" => RecurrenceKind::Monthly,
            "yearly" => RecurrenceKind::Yearly,
            _ => RecurrenceKind::Unsupported,
        }
    }
}

impl Serialize for RecurrenceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecurrenceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RecurrenceKind::parse(&s))
    }
}

/// Recurrence rule attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub kind: RecurrenceKind,
    /// Number of days/weeks/months/years between instances. At least 1.
    pub interval: u32,
    /// Weekday indices 0=Sunday..6=Saturday. Only meaningful for weekly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<u8>>,
    /// Last date on which an instance may fall due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    /// Project the next due date from `base` (the completed instance's due
    /// date, or today when it had none).
    ///
    /// Returns `None` when the rule kind is unsupported or the projected
    /// date falls after `end_date` -- recurrence stops, which is not an
    /// error.
    pub fn project_next(&self, base: NaiveDate) -> Option<NaiveDate> {
        let interval = self.interval.max(1);
        let next = match self.kind {
            RecurrenceKind::Daily => base + Duration::days(i64::from(interval)),
            RecurrenceKind::Weekly => {
                let jumped = base + Duration::weeks(i64::from(interval));
                match &self.days {
                    Some(days) if !days.is_empty() => forward_to_weekday(jumped, days),
                    _ => jumped,
                }
            }
            RecurrenceKind::Monthly => base.checked_add_months(Months::new(interval))?,
            RecurrenceKind::Yearly => base.checked_add_months(Months::new(interval.checked_mul(12)?))?,
            RecurrenceKind::Unsupported => return None,
        };

        match self.end_date {
            Some(end) if next > end => None,
            _ => Some(next),
        }
    }
}

/// Advance day-by-day (never backward) to the nearest date whose weekday is
/// in `days`. A date that already matches is used as-is.
fn forward_to_weekday(start: NaiveDate, days: &[u8]) -> NaiveDate {
    let mut date = start;
    // At most six steps; normalize stored indices so out-of-range values
    // cannot loop forever.
    while !days.iter().any(|&d| d % 7 == date.weekday().num_days_from_sunday() as u8) {
        date += Duration::days(1);
    }
    date
}
