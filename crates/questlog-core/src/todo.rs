//! To-do tasks and task groups.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::recurrence::Recurrence;

/// Task priority. Total order for sorting: High sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Anything unrecognized in stored data. Sorts last, worth 1 point.
    Unspecified,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Unspecified => "Unspecified",
        }
    }

    /// Lenient, case-insensitive parse.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Unspecified,
        }
    }

    /// Points awarded for completing a task of this priority.
    pub fn points(&self) -> u32 {
        match self {
            Priority::High => 10,
            Priority::Medium => 5,
            Priority::Low => 2,
            Priority::Unspecified => 1,
        }
    }

    /// Sort rank: lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Unspecified => 4,
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Priority::parse(&s))
    }
}

/// A to-do task, optionally recurring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoTask {
    pub id: String,
    pub name: String,
    /// Group name the task belongs to.
    pub group: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

/// Outcome of completing a task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCompletion {
    /// Points the completion is worth (before any health gating).
    pub points: u32,
    /// Freshly scheduled next instance, when the recurrence rule produced one.
    pub next: Option<TodoTask>,
}

impl TodoTask {
    pub fn new(name: impl Into<String>, group: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            group: group.into(),
            priority,
            due_date: None,
            completed: false,
            completion_date: None,
            notes: None,
            recurrence: None,
        }
    }

    /// Mark the task completed today.
    ///
    /// Returns the points the completion is worth and, for recurring tasks,
    /// the next pending instance. The completed record itself is kept as
    /// history; completing an already-completed task is a no-op.
    pub fn complete(&mut self, today: NaiveDate) -> TaskCompletion {
        if self.completed {
            return TaskCompletion {
                points: 0,
                next: None,
            };
        }
        self.completed = true;
        self.completion_date = Some(today);
        TaskCompletion {
            points: self.priority.points(),
            next: self.next_instance(today),
        }
    }

    /// Clear the completed flag and completion date.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.completion_date = None;
    }

    /// Build the next pending instance from the recurrence rule, based off
    /// the due date when present, else `today`.
    fn next_instance(&self, today: NaiveDate) -> Option<TodoTask> {
        let rule = self.recurrence.as_ref()?;
        let base = self.due_date.unwrap_or(today);
        let next_due = rule.project_next(base)?;
        Some(TodoTask {
            id: Uuid::new_v4().to_string(),
            completed: false,
            completion_date: None,
            due_date: Some(next_due),
            ..self.clone()
        })
    }
}

/// Sort tasks for display: earliest due date first, then by priority.
/// Tasks without a due date sort after dated ones.
pub fn sort_for_display(tasks: &mut [TodoTask]) {
    tasks.sort_by(|a, b| {
        let a_due = a.due_date.unwrap_or(NaiveDate::MAX);
        let b_due = b.due_date.unwrap_or(NaiveDate::MAX);
        a_due
            .cmp(&b_due)
            .then(a.priority.rank().cmp(&b.priority.rank()))
    });
}

/// A named task group with a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoGroup {
    pub name: String,
    /// Hex color code, e.g. "#FFC107".
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::{Recurrence, RecurrenceKind};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn recurring_task(kind: RecurrenceKind, interval: u32) -> TodoTask {
        let mut task = TodoTask::new("Prepare presentation", "Work", Priority::High);
        task.due_date = Some(date("2025-04-10"));
        task.recurrence = Some(Recurrence {
            kind,
            interval,
            days: None,
            end_date: None,
        });
        task
    }

    #[test]
    fn completing_daily_task_schedules_next_instance() {
        let mut task = recurring_task(RecurrenceKind::Daily, 2);
        let outcome = task.complete(date("2025-04-10"));

        assert!(task.completed);
        assert_eq!(task.completion_date, Some(date("2025-04-10")));
        assert_eq!(outcome.points, 10);

        let next = outcome.next.expect("daily rule should produce an instance");
        assert_eq!(next.due_date, Some(date("2025-04-12")));
        assert!(!next.completed);
        assert!(next.completion_date.is_none());
        assert_ne!(next.id, task.id);
        assert_eq!(next.name, task.name);
        assert_eq!(next.group, task.group);
        assert_eq!(next.priority, task.priority);
        assert_eq!(next.recurrence, task.recurrence);
    }

    #[test]
    fn weekly_specific_days_uses_jump_then_scan() {
        let mut task = TodoTask::new("Clean", "Personal", Priority::Medium);
        task.due_date = Some(date("2025-04-07"));
        task.recurrence = Some(Recurrence {
            kind: RecurrenceKind::Weekly,
            interval: 1,
            days: Some(vec![6]),
            end_date: None,
        });

        let outcome = task.complete(date("2025-04-07"));
        let next = outcome.next.unwrap();
        // One-week jump lands on Monday 2025-04-14; forward scan reaches
        // Saturday 2025-04-19.
        assert_eq!(next.due_date, Some(date("2025-04-19")));
    }

    #[test]
    fn recurrence_past_end_date_produces_nothing() {
        let mut task = recurring_task(RecurrenceKind::Daily, 1);
        task.recurrence.as_mut().unwrap().end_date = Some(date("2025-04-10"));

        let outcome = task.complete(date("2025-04-10"));
        assert!(task.completed);
        assert!(outcome.next.is_none());
    }

    #[test]
    fn task_without_due_date_projects_from_today() {
        let mut task = recurring_task(RecurrenceKind::Daily, 3);
        task.due_date = None;
        let outcome = task.complete(date("2025-04-10"));
        assert_eq!(outcome.next.unwrap().due_date, Some(date("2025-04-13")));
    }

    #[test]
    fn completing_twice_is_a_no_op() {
        let mut task = recurring_task(RecurrenceKind::Daily, 1);
        let first = task.complete(date("2025-04-10"));
        assert_eq!(first.points, 10);
        let second = task.complete(date("2025-04-11"));
        assert_eq!(second.points, 0);
        assert!(second.next.is_none());
        assert_eq!(task.completion_date, Some(date("2025-04-10")));
    }

    #[test]
    fn reopen_clears_completion() {
        let mut task = TodoTask::new("Call Mom", "Personal", Priority::Low);
        task.complete(date("2025-04-10"));
        task.reopen();
        assert!(!task.completed);
        assert!(task.completion_date.is_none());
    }

    #[test]
    fn priority_points_and_parse() {
        assert_eq!(Priority::High.points(), 10);
        assert_eq!(Priority::Medium.points(), 5);
        assert_eq!(Priority::Low.points(), 2);
        assert_eq!(Priority::parse("HIGH"), Priority::High);
        assert_eq!(Priority::parse("whenever"), Priority::Unspecified);
        assert_eq!(Priority::parse("whenever").points(), 1);
    }

    #[test]
    fn display_sort_orders_by_due_date_then_priority() {
        let mut a = TodoTask::new("a", "Work", Priority::Low);
        a.due_date = Some(date("2025-04-06"));
        let mut b = TodoTask::new("b", "Work", Priority::High);
        b.due_date = Some(date("2025-04-10"));
        let mut c = TodoTask::new("c", "Work", Priority::High);
        c.due_date = Some(date("2025-04-06"));
        let d = TodoTask::new("d", "Work", Priority::High); // no due date

        let mut tasks = vec![a.clone(), b.clone(), c.clone(), d.clone()];
        sort_for_display(&mut tasks);
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }
}
