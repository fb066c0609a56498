//! Statistics: a pure projection over a snapshot of the store.
//!
//! The overview is recomputed from entity lists rather than maintained
//! incrementally, so it can never drift from the persisted state.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dissertation::Dissertation;
use crate::habit::Habit;
use crate::skill::Skill;
use crate::todo::TodoTask;

/// Per-skill summary row.
#[derive(Debug, Clone, Serialize)]
pub struct SkillStat {
    pub name: String,
    pub points: u32,
    pub level: u32,
    pub streak: u32,
    pub fundamentals_completed: u32,
    pub immersion_hours: f64,
    pub application_sessions: u32,
    pub sketchbook_pages: u32,
    pub accountability_posts: u32,
}

/// Aggregated statistics across the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    /// Sum of points across skills and the dissertation.
    pub unit_points: u32,
    /// Global running total from settings.
    pub general_points: u64,
    pub skills: Vec<SkillStat>,
    pub dissertation_points: u32,
    /// Share of today's due habits already completed, 0..=100.
    pub habit_completion_pct: f64,
    pub tasks_completed: usize,
    pub tasks_pending: usize,
}

/// Compute the overview from an immutable snapshot.
pub fn overview(
    skills: &[Skill],
    dissertation: Option<&Dissertation>,
    habits: &[Habit],
    tasks: &[TodoTask],
    general_points: u64,
    today: NaiveDate,
) -> Overview {
    let mut unit_points = 0;
    let skill_stats = skills
        .iter()
        .map(|skill| {
            unit_points += skill.progress.points;
            SkillStat {
                name: skill.name.clone(),
                points: skill.progress.points,
                level: skill.progress.level,
                streak: skill.progress.streak,
                fundamentals_completed: skill.fundamentals_completed,
                immersion_hours: skill.immersion_hours,
                application_sessions: skill.application_sessions,
                sketchbook_pages: skill.sketchbook_pages,
                accountability_posts: skill.accountability_posts,
            }
        })
        .collect();

    let dissertation_points = dissertation.map(|d| d.progress.points).unwrap_or(0);
    unit_points += dissertation_points;

    let due_today: Vec<&Habit> = habits.iter().filter(|h| h.due_today(today)).collect();
    let done_today = due_today.iter().filter(|h| h.done_on(today)).count();
    let habit_completion_pct = if due_today.is_empty() {
        0.0
    } else {
        done_today as f64 / due_today.len() as f64 * 100.0
    };

    Overview {
        unit_points,
        general_points,
        skills: skill_stats,
        dissertation_points,
        habit_completion_pct,
        tasks_completed: tasks.iter().filter(|t| t.completed).count(),
        tasks_pending: tasks.iter().filter(|t| !t.completed).count(),
    }
}
