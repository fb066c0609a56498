//! Dissertation progress: a single trackable unit with a phased work plan.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::gamify::{PracticeOutcome, Progress};
use crate::skill::PracticeContext;

/// Points per hour worked on the dissertation.
pub const DISSERTATION_POINTS_PER_HOUR: u32 = 5;

/// One planned work item inside a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTask {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Budgeted hours for the item.
    pub total_hours: u32,
    #[serde(default)]
    pub hours_worked: f64,
}

impl PlanTask {
    pub fn new(name: &str, start_date: &str, end_date: &str, total_hours: u32) -> Self {
        Self {
            name: name.to_string(),
            start_date: start_date.parse().expect("valid plan start date"),
            end_date: end_date.parse().expect("valid plan end date"),
            total_hours,
            hours_worked: 0.0,
        }
    }
}

/// The four phases of the dissertation plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPhases {
    #[serde(default)]
    pub preparation: Vec<PlanTask>,
    #[serde(default)]
    pub empirical: Vec<PlanTask>,
    #[serde(default)]
    pub integration: Vec<PlanTask>,
    #[serde(default)]
    pub finalization: Vec<PlanTask>,
}

impl PlanPhases {
    pub fn iter(&self) -> impl Iterator<Item = &PlanTask> {
        self.preparation
            .iter()
            .chain(&self.empirical)
            .chain(&self.integration)
            .chain(&self.finalization)
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlanTask> {
        self.preparation
            .iter_mut()
            .chain(self.empirical.iter_mut())
            .chain(self.integration.iter_mut())
            .chain(self.finalization.iter_mut())
    }
}

/// The dissertation record. A single row in storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dissertation {
    #[serde(flatten)]
    pub progress: Progress,
    #[serde(default)]
    pub phases: PlanPhases,
}

impl Dissertation {
    pub fn new(phases: PlanPhases) -> Self {
        Self {
            progress: Progress::default(),
            phases,
        }
    }

    /// Log hours worked against the named plan task.
    ///
    /// Returns `None` when no task matches or `hours` is not positive;
    /// nothing is mutated in that case. Points are 5 per hour, subject to
    /// the health gate like every other trackable unit.
    pub fn log_hours<R: Rng + ?Sized>(
        &mut self,
        task_name: &str,
        hours: f64,
        ctx: &mut PracticeContext<'_, R>,
    ) -> Option<PracticeOutcome> {
        if hours <= 0.0 {
            return None;
        }
        let task = self.phases.iter_mut().find(|t| t.name == task_name)?;
        task.hours_worked += hours;

        let base = (hours * f64::from(DISSERTATION_POINTS_PER_HOUR)) as u32;
        let earned = if ctx.healthy { base } else { 0 };
        Some(self.progress.record(earned, ctx.today, ctx.pools, ctx.rng))
    }

    /// Passive streak reconciliation; returns true when a correction needs
    /// persisting.
    pub fn reconcile_streak(&mut self, today: NaiveDate) -> bool {
        self.progress.reconcile(today)
    }

    pub fn total_hours_planned(&self) -> u32 {
        self.phases.iter().map(|t| t.total_hours).sum()
    }

    pub fn total_hours_worked(&self) -> f64 {
        self.phases.iter().map(|t| t.hours_worked).sum()
    }
}
