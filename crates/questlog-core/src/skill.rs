//! Skills: trackable units with exercise catalogs and practice logs.
//!
//! A skill accumulates points, level, and streak through logged practice.
//! Point values are fixed per action kind; the daily health check can
//! suppress an award to zero (the action itself is still recorded).

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::gamify::{PracticeOutcome, Progress, RewardPools};

/// Points per completed fundamental exercise.
pub const FUNDAMENTAL_POINTS: u32 = 2;
/// Points per hour of immersion.
pub const IMMERSION_POINTS_PER_HOUR: u32 = 10;
/// Points per application session.
pub const APPLICATION_POINTS: u32 = 10;
/// Points per logged drawing.
pub const DRAWING_POINTS: u32 = 5;
/// Points per accountability post.
pub const ACCOUNTABILITY_POINTS: u32 = 15;

/// Kind of practice event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeKind {
    Fundamental,
    Immersion,
    Application,
    Drawing,
    Accountability,
}

/// One logged practice event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeEntry {
    pub kind: PracticeKind,
    /// Exercise name, immersion activity, or drawing type.
    pub label: String,
    /// Media title for immersion entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Hours spent, for immersion entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    pub points: u32,
    pub at: DateTime<Utc>,
}

/// Suggested exercises per practice kind. Seeded with defaults; empty
/// lists simply mean "no suggestions".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalog {
    #[serde(default)]
    pub fundamentals: Vec<String>,
    #[serde(default)]
    pub sketchbook: Vec<String>,
    #[serde(default)]
    pub accountability: Vec<String>,
    #[serde(default)]
    pub immersion: Vec<String>,
    #[serde(default)]
    pub application: Vec<String>,
}

/// A trackable skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(flatten)]
    pub progress: Progress,
    #[serde(default)]
    pub fundamentals_completed: u32,
    #[serde(default)]
    pub immersion_hours: f64,
    #[serde(default)]
    pub application_sessions: u32,
    #[serde(default)]
    pub sketchbook_pages: u32,
    #[serde(default)]
    pub accountability_posts: u32,
    #[serde(default)]
    pub catalog: SkillCatalog,
    #[serde(default)]
    pub practice_log: Vec<PracticeEntry>,
}

/// Clock, health-gate, and randomness inputs for one logging call.
/// Passing them in keeps every operation deterministic under test.
pub struct PracticeContext<'a, R: Rng + ?Sized> {
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
    /// Outcome of the most recent daily health check. When false, point
    /// awards are suppressed to zero.
    pub healthy: bool,
    pub pools: &'a RewardPools,
    pub rng: &'a mut R,
}

impl Skill {
    pub fn new(name: impl Into<String>, catalog: SkillCatalog) -> Self {
        Self {
            name: name.into(),
            progress: Progress::default(),
            fundamentals_completed: 0,
            immersion_hours: 0.0,
            application_sessions: 0,
            sketchbook_pages: 0,
            accountability_posts: 0,
            catalog,
            practice_log: Vec::new(),
        }
    }

    /// Log a completed fundamental exercise.
    pub fn log_fundamental<R: Rng + ?Sized>(
        &mut self,
        exercise: &str,
        ctx: &mut PracticeContext<'_, R>,
    ) -> PracticeOutcome {
        self.fundamentals_completed += 1;
        self.log(PracticeKind::Fundamental, exercise, None, None, None, FUNDAMENTAL_POINTS, ctx)
    }

    /// Log an immersion session (language skills). Points scale with hours.
    pub fn log_immersion<R: Rng + ?Sized>(
        &mut self,
        activity: &str,
        hours: f64,
        title: Option<String>,
        ctx: &mut PracticeContext<'_, R>,
    ) -> PracticeOutcome {
        let hours = hours.max(0.0);
        self.immersion_hours += hours;
        let base = (hours * f64::from(IMMERSION_POINTS_PER_HOUR)) as u32;
        self.log(PracticeKind::Immersion, activity, title, None, Some(hours), base, ctx)
    }

    /// Log an application session (language skills).
    pub fn log_application<R: Rng + ?Sized>(
        &mut self,
        activity: &str,
        notes: Option<String>,
        ctx: &mut PracticeContext<'_, R>,
    ) -> PracticeOutcome {
        self.application_sessions += 1;
        self.log(PracticeKind::Application, activity, None, notes, None, APPLICATION_POINTS, ctx)
    }

    /// Log a drawing (art skill). One drawing counts as one sketchbook page.
    pub fn log_drawing<R: Rng + ?Sized>(
        &mut self,
        subject: &str,
        notes: Option<String>,
        ctx: &mut PracticeContext<'_, R>,
    ) -> PracticeOutcome {
        self.sketchbook_pages += 1;
        self.log(PracticeKind::Drawing, subject, None, notes, None, DRAWING_POINTS, ctx)
    }

    /// Log an accountability post (art skill).
    pub fn log_accountability<R: Rng + ?Sized>(
        &mut self,
        activity: &str,
        ctx: &mut PracticeContext<'_, R>,
    ) -> PracticeOutcome {
        self.accountability_posts += 1;
        self.log(PracticeKind::Accountability, activity, None, None, None, ACCOUNTABILITY_POINTS, ctx)
    }

    /// Passive streak reconciliation; returns true when a correction was
    /// applied and the skill needs persisting.
    pub fn reconcile_streak(&mut self, today: NaiveDate) -> bool {
        self.progress.reconcile(today)
    }

    #[allow(clippy::too_many_arguments)]
    fn log<R: Rng + ?Sized>(
        &mut self,
        kind: PracticeKind,
        label: &str,
        title: Option<String>,
        notes: Option<String>,
        hours: Option<f64>,
        base_points: u32,
        ctx: &mut PracticeContext<'_, R>,
    ) -> PracticeOutcome {
        let earned = if ctx.healthy { base_points } else { 0 };
        self.practice_log.push(PracticeEntry {
            kind,
            label: label.to_string(),
            title,
            notes,
            hours,
            points: earned,
            at: ctx.now,
        });
        self.progress.record(earned, ctx.today, ctx.pools, ctx.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn ctx<'a>(
        today: &str,
        healthy: bool,
        pools: &'a RewardPools,
        rng: &'a mut Pcg64,
    ) -> PracticeContext<'a, Pcg64> {
        PracticeContext {
            today: date(today),
            now: Utc::now(),
            healthy,
            pools,
            rng,
        }
    }

    #[test]
    fn fundamental_awards_two_points_and_starts_streak() {
        let pools = RewardPools::default();
        let mut rng = Pcg64::seed_from_u64(3);
        let mut skill = Skill::new("korean", SkillCatalog::default());

        let outcome =
            skill.log_fundamental("Hangul basics - Vowels", &mut ctx("2025-04-10", true, &pools, &mut rng));

        assert_eq!(outcome.points_awarded, 2);
        assert_eq!(skill.progress.points, 2);
        assert_eq!(skill.progress.streak, 1);
        assert_eq!(skill.progress.last_practice, Some(date("2025-04-10")));
        assert_eq!(skill.fundamentals_completed, 1);
        assert_eq!(skill.practice_log.len(), 1);
        assert_eq!(skill.practice_log[0].kind, PracticeKind::Fundamental);
    }

    #[test]
    fn immersion_points_scale_with_hours() {
        let pools = RewardPools::default();
        let mut rng = Pcg64::seed_from_u64(3);
        let mut skill = Skill::new("french", SkillCatalog::default());

        let outcome = skill.log_immersion(
            "Watch French film (30 min)",
            0.5,
            Some("Amélie".to_string()),
            &mut ctx("2025-04-10", true, &pools, &mut rng),
        );

        assert_eq!(outcome.points_awarded, 5);
        assert_eq!(skill.immersion_hours, 0.5);
        assert_eq!(skill.practice_log[0].hours, Some(0.5));
        assert_eq!(skill.practice_log[0].title.as_deref(), Some("Amélie"));
    }

    #[test]
    fn failed_health_check_suppresses_points_but_records_action() {
        let pools = RewardPools::default();
        let mut rng = Pcg64::seed_from_u64(3);
        let mut skill = Skill::new("art", SkillCatalog::default());

        let outcome =
            skill.log_drawing("Still life", None, &mut ctx("2025-04-10", false, &pools, &mut rng));

        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(skill.progress.points, 0);
        // The action still counts: page logged, streak started.
        assert_eq!(skill.sketchbook_pages, 1);
        assert_eq!(skill.progress.streak, 1);
        assert_eq!(skill.practice_log.len(), 1);
        assert_eq!(skill.practice_log[0].points, 0);
    }

    #[test]
    fn level_up_unlocks_reward_once() {
        let pools = RewardPools::default();
        let mut rng = Pcg64::seed_from_u64(9);
        let mut skill = Skill::new("art", SkillCatalog::default());
        skill.progress.points = 240;
        skill.progress.level = 2;

        // 240 + 15 crosses the 250 threshold: level 3, one small reward.
        let outcome =
            skill.log_accountability("Post progress", &mut ctx("2025-04-10", true, &pools, &mut rng));
        assert!(outcome.leveled_up);
        assert_eq!(outcome.level, 3);
        assert_eq!(outcome.rewards_unlocked.len(), 1);
        assert!(pools.small.contains(&outcome.rewards_unlocked[0]));

        // Another action at level 3 unlocks nothing further.
        let outcome =
            skill.log_accountability("Create process video", &mut ctx("2025-04-10", true, &pools, &mut rng));
        assert!(!outcome.leveled_up);
        assert!(outcome.rewards_unlocked.is_empty());
        assert_eq!(skill.progress.rewards_unlocked.len(), 1);
    }

    #[test]
    fn skill_json_round_trip() {
        let mut skill = Skill::new("korean", SkillCatalog::default());
        let pools = RewardPools::default();
        let mut rng = Pcg64::seed_from_u64(3);
        skill.log_application("Write journal entry in Hangul", None, &mut ctx("2025-04-10", true, &pools, &mut rng));

        let json = serde_json::to_string(&skill).unwrap();
        let decoded: Skill = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, skill);
        // Progress fields serialize flat, matching the backup document shape.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("points").is_some());
        assert!(value.get("streak").is_some());
    }
}
