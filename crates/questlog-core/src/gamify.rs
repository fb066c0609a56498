//! Points, levels, streaks, and reward unlocking.
//!
//! Everything in this module is pure arithmetic over small values. The
//! calendar ("today") and the randomness source are always passed in by the
//! caller so the rules stay deterministic under test.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Points needed to reach level index + 1. Ascending.
pub const LEVEL_THRESHOLDS: [u32; 7] = [0, 100, 250, 500, 1000, 2000, 5000];

/// Level for a point total: 1 + count of thresholds at or below `points`.
///
/// Monotonic and idempotent; `level_for_points(0) == 1`.
pub fn level_for_points(points: u32) -> u32 {
    LEVEL_THRESHOLDS.iter().filter(|&&t| points >= t).count() as u32
}

/// New streak value after an action that counts as today's practice.
///
/// - no prior date: 1
/// - prior date is today: unchanged (already counted)
/// - prior date is yesterday: +1
/// - anything older: back to 1
pub fn next_streak(last_practice: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    let last = match last_practice {
        Some(d) => d,
        None => return 1,
    };
    if last == today {
        current
    } else if last == today - Duration::days(1) {
        current + 1
    } else {
        1
    }
}

/// Passive streak reconciliation: no new practice is being logged, we are
/// only checking whether an existing streak has gone stale.
///
/// Returns 0 when the last activity was strictly before yesterday,
/// otherwise the streak is left as-is.
pub fn reconciled_streak(last_activity: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    match last_activity {
        Some(last) if last < today - Duration::days(1) => 0,
        Some(_) => current,
        None => 0,
    }
}

/// Reward tier, gated by a level threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Small,
    Medium,
    Large,
}

impl RewardTier {
    /// Level at which this tier starts unlocking.
    pub fn level_gate(&self) -> u32 {
        match self {
            RewardTier::Small => 3,
            RewardTier::Medium => 5,
            RewardTier::Large => 10,
        }
    }

    pub const ALL: [RewardTier; 3] = [RewardTier::Small, RewardTier::Medium, RewardTier::Large];
}

/// The three fixed reward pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardPools {
    pub small: Vec<String>,
    pub medium: Vec<String>,
    pub large: Vec<String>,
}

impl RewardPools {
    pub fn tier(&self, tier: RewardTier) -> &[String] {
        match tier {
            RewardTier::Small => &self.small,
            RewardTier::Medium => &self.medium,
            RewardTier::Large => &self.large,
        }
    }
}

impl Default for RewardPools {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            small: strings(&[
                "New art supplies (pencils, pens)",
                "Korean snacks package",
                "French pastry treat",
                "Download a new playlist",
                "Movie night",
                "Special coffee or tea",
                "New stickers for journal",
                "Bath bomb or relaxation item",
                "Small plant or succulent",
                "Art print or bookmark",
            ]),
            medium: strings(&[
                "Art instruction book",
                "Korean webtoon collection",
                "French film collection",
                "Nice sketchbook or journal",
                "Language learning app subscription (1 month)",
                "Art supply set (markers, paints)",
                "Korean or French cuisine cookbook",
                "Online class or workshop",
                "Streaming service subscription (1 month)",
                "Museum or gallery admission",
            ]),
            large: strings(&[
                "Premium art course",
                "TOPIK prep materials full set",
                "Trip to a French cafe or restaurant",
                "Art software or digital tools",
                "Language tutoring session",
                "Premium art supplies kit",
                "Cultural experience or event ticket",
                "Annual subscription to learning platform",
                "Weekend creative retreat",
                "Professional drawing tablet",
            ]),
        }
    }
}

/// Points/level/streak bookkeeping shared by every trackable unit
/// (skills and the dissertation). Embedded flat into the owning entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub points: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_practice: Option<NaiveDate>,
    #[serde(default)]
    pub rewards_unlocked: Vec<String>,
}

fn default_level() -> u32 {
    1
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            streak: 0,
            last_practice: None,
            rewards_unlocked: Vec::new(),
        }
    }
}

/// Result of recording one practice event against a trackable unit.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeOutcome {
    /// Points actually awarded (0 when the health gate suppressed them).
    pub points_awarded: u32,
    pub level: u32,
    pub leveled_up: bool,
    /// Rewards unlocked by this event, one per crossed tier.
    pub rewards_unlocked: Vec<String>,
}

impl Progress {
    /// Record a practice event worth `earned` points as today's practice:
    /// update the streak, add the points, recompute the level, and roll
    /// reward unlocks for any crossed tier.
    pub fn record<R: Rng + ?Sized>(
        &mut self,
        earned: u32,
        today: NaiveDate,
        pools: &RewardPools,
        rng: &mut R,
    ) -> PracticeOutcome {
        let old_level = self.level;
        self.streak = next_streak(self.last_practice, self.streak, today);
        self.last_practice = Some(today);
        self.points += earned;
        self.level = level_for_points(self.points);
        let rewards = unlock_on_level_up(old_level, self.level, &self.rewards_unlocked, pools, rng);
        self.rewards_unlocked.extend(rewards.iter().cloned());
        PracticeOutcome {
            points_awarded: earned,
            level: self.level,
            leveled_up: self.level > old_level,
            rewards_unlocked: rewards,
        }
    }

    /// Passive check run when lists are read: zero a streak whose last
    /// practice is older than yesterday. Returns true when a correction
    /// was applied and needs persisting.
    pub fn reconcile(&mut self, today: NaiveDate) -> bool {
        if self.streak > 0 {
            let corrected = reconciled_streak(self.last_practice, self.streak, today);
            if corrected != self.streak {
                self.streak = corrected;
                return true;
            }
        }
        false
    }
}

/// Rewards unlocked by a level increase.
///
/// A tier fires only when the old level was below its gate and the new level
/// is at or above it, so each crossing grants at most once. One random
/// not-yet-unlocked reward is drawn per crossed tier; an exhausted pool
/// grants nothing.
pub fn unlock_on_level_up<R: Rng + ?Sized>(
    old_level: u32,
    new_level: u32,
    already_unlocked: &[String],
    pools: &RewardPools,
    rng: &mut R,
) -> Vec<String> {
    if new_level <= old_level {
        return Vec::new();
    }
    let mut unlocked = Vec::new();
    for tier in RewardTier::ALL {
        let gate = tier.level_gate();
        if new_level >= gate && old_level < gate {
            let remaining: Vec<&String> = pools
                .tier(tier)
                .iter()
                .filter(|r| !already_unlocked.contains(r) && !unlocked.contains(*r))
                .collect();
            if let Some(reward) = remaining.choose(rng) {
                unlocked.push((*reward).clone());
            }
        }
    }
    unlocked
}
