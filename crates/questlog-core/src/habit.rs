//! Habits: daily/weekly/interval check-offs with per-habit streaks.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::gamify::reconciled_streak;

/// Points per habit completion.
pub const HABIT_POINTS: u32 = 5;

/// How often a habit is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    /// Due on specific weekdays, 0=Sunday..6=Saturday.
    Weekly { days: Vec<u8> },
    /// Due every `days` days.
    Interval { days: u32 },
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    /// Display glyph, e.g. "🏃".
    pub icon: String,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Custom (user-created) vs built-in habit.
    #[serde(default)]
    pub custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub frequency: Frequency,
    #[serde(default)]
    pub streak: u32,
    /// Completion dates, unique and chronologically ordered.
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
}

fn default_true() -> bool {
    true
}

/// Outcome of a toggle.
#[derive(Debug, Clone, Serialize)]
pub struct HabitToggle {
    /// Whether the habit is completed for today after the toggle.
    pub now_completed: bool,
    /// Points the completion is worth (0 when un-completing).
    pub points: u32,
}

impl Habit {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            active: true,
            custom: false,
            category: None,
            frequency,
            streak: 0,
            completed_dates: BTreeSet::new(),
        }
    }

    pub fn custom(mut self, category: impl Into<String>) -> Self {
        self.custom = true;
        self.category = Some(category.into());
        self
    }

    pub fn done_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Toggle today's completion.
    ///
    /// Completing adds today's date and bumps the streak by one;
    /// un-completing removes it and decrements, floored at zero. The
    /// increment is best-effort -- calendar contiguity is enforced by the
    /// passive reconciliation pass, not here.
    pub fn toggle(&mut self, today: NaiveDate) -> HabitToggle {
        if self.completed_dates.remove(&today) {
            self.streak = self.streak.saturating_sub(1);
            HabitToggle {
                now_completed: false,
                points: 0,
            }
        } else {
            self.completed_dates.insert(today);
            self.streak += 1;
            HabitToggle {
                now_completed: true,
                points: HABIT_POINTS,
            }
        }
    }

    /// Whether the habit shows up on today's list.
    pub fn due_today(&self, today: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        match &self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly { days } => {
                let weekday = today.weekday().num_days_from_sunday() as u8;
                days.iter().any(|&d| d % 7 == weekday)
            }
            // Interval habits surface until checked off for the day.
            Frequency::Interval { .. } => !self.done_on(today),
        }
    }

    /// Passive reconciliation run when habit lists are read: a streak whose
    /// last completion is strictly before yesterday is forced to zero.
    /// Returns true when a correction was applied and needs persisting.
    pub fn reconcile_streak(&mut self, today: NaiveDate) -> bool {
        if self.streak == 0 {
            return false;
        }
        let last = self.completed_dates.iter().next_back().copied();
        let corrected = reconciled_streak(last, self.streak, today);
        if corrected != self.streak {
            self.streak = corrected;
            true
        } else {
            false
        }
    }
}

/// A habit category with a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCategory {
    pub name: String,
    /// Hex color code, e.g. "#4CAF50".
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn toggle_completes_and_uncompletes_today() {
        let mut habit = Habit::new("Exercise", "🏃", Frequency::Daily);
        let today = date("2025-04-10");

        let done = habit.toggle(today);
        assert!(done.now_completed);
        assert_eq!(done.points, HABIT_POINTS);
        assert!(habit.done_on(today));
        assert_eq!(habit.streak, 1);

        let undone = habit.toggle(today);
        assert!(!undone.now_completed);
        assert_eq!(undone.points, 0);
        assert!(!habit.done_on(today));
        assert_eq!(habit.streak, 0);
    }

    #[test]
    fn uncomplete_floors_streak_at_zero() {
        let mut habit = Habit::new("Reading", "📚", Frequency::Daily);
        let today = date("2025-04-10");
        habit.completed_dates.insert(today);
        // Streak already zero, e.g. after a passive reset.
        habit.toggle(today);
        assert_eq!(habit.streak, 0);
    }

    #[test]
    fn reconcile_zeroes_stale_streak() {
        let mut habit = Habit::new("Meditation", "🧘", Frequency::Daily);
        habit.completed_dates.insert(date("2025-04-07"));
        habit.streak = 5;

        assert!(habit.reconcile_streak(date("2025-04-10")));
        assert_eq!(habit.streak, 0);
        assert!(!habit.reconcile_streak(date("2025-04-10")));
    }

    #[test]
    fn reconcile_keeps_fresh_streak() {
        let mut habit = Habit::new("Meditation", "🧘", Frequency::Daily);
        habit.completed_dates.insert(date("2025-04-09"));
        habit.streak = 5;
        assert!(!habit.reconcile_streak(date("2025-04-10")));
        assert_eq!(habit.streak, 5);
    }

    #[test]
    fn due_today_respects_frequency() {
        // 2025-04-12 is a Saturday.
        let saturday = date("2025-04-12");
        let sunday = date("2025-04-13");

        let daily = Habit::new("Drink water", "💧", Frequency::Daily);
        assert!(daily.due_today(saturday));

        let weekly = Habit::new("Clean", "🧹", Frequency::Weekly { days: vec![6] });
        assert!(weekly.due_today(saturday));
        assert!(!weekly.due_today(sunday));

        let mut interval = Habit::new("Water Plants", "🌱", Frequency::Interval { days: 10 });
        assert!(interval.due_today(saturday));
        interval.toggle(saturday);
        assert!(!interval.due_today(saturday));

        let mut inactive = Habit::new("Early wakeup", "☀️", Frequency::Daily);
        inactive.active = false;
        assert!(!inactive.due_today(saturday));
    }

    #[test]
    fn completion_dates_stay_unique_and_ordered() {
        let mut habit = Habit::new("Reading", "📚", Frequency::Daily);
        habit.toggle(date("2025-04-10"));
        habit.toggle(date("2025-04-08"));
        habit.toggle(date("2025-04-09"));
        let dates: Vec<NaiveDate> = habit.completed_dates.iter().copied().collect();
        assert_eq!(
            dates,
            vec![date("2025-04-08"), date("2025-04-09"), date("2025-04-10")]
        );
    }

    #[test]
    fn frequency_serde_round_trip() {
        let weekly = Frequency::Weekly { days: vec![0, 6] };
        let json = serde_json::to_string(&weekly).unwrap();
        assert!(json.contains("\"type\":\"weekly\""));
        assert_eq!(serde_json::from_str::<Frequency>(&json).unwrap(), weekly);

        let interval: Frequency = serde_json::from_str(r#"{"type":"interval","days":5}"#).unwrap();
        assert_eq!(interval, Frequency::Interval { days: 5 });
    }
}
