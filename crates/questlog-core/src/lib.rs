//! # Questlog Core Library
//!
//! This library provides the core logic for Questlog, a personal
//! self-improvement tracker: skills, habits, to-dos, dissertation progress,
//! a pomodoro timer, and a lightweight gamification layer. It implements a
//! CLI-first philosophy where all operations are available via a standalone
//! binary; any GUI host would be a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Gamification**: pure arithmetic rules for points, levels, streaks,
//!   and reward unlocking, applied on data mutation
//! - **Recurrence**: calendar projection of the next instance of a
//!   repeating task
//! - **Timer Engine**: a wall-clock-based pomodoro state machine that
//!   requires the caller to periodically invoke `tick()`
//! - **Storage**: SQLite-based entity storage and TOML-based settings
//!
//! ## Key Components
//!
//! - [`gamify::Progress`]: points/level/streak bookkeeping shared by
//!   trackable units
//! - [`recurrence::Recurrence`]: recurrence rules and projection
//! - [`PomodoroEngine`]: core timer state machine
//! - [`Database`]: entity persistence
//! - [`Settings`]: application settings management

pub mod checkin;
pub mod dissertation;
pub mod error;
pub mod events;
pub mod gamify;
pub mod habit;
pub mod recurrence;
pub mod seed;
pub mod skill;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod todo;

pub use checkin::{CheckIn, CheckInSubcategory};
pub use dissertation::{Dissertation, PlanPhases, PlanTask};
pub use error::{BackupError, ConfigError, CoreError, DatabaseError, Result};
pub use events::Event;
pub use gamify::{level_for_points, Progress, RewardPools, RewardTier};
pub use habit::{Frequency, Habit, HabitCategory};
pub use recurrence::{Recurrence, RecurrenceKind};
pub use skill::{PracticeContext, Skill, SkillCatalog};
pub use stats::Overview;
pub use storage::{Database, Settings};
pub use timer::{Phase, PomodoroEngine, TimerConfig, TimerState};
pub use todo::{Priority, TodoGroup, TodoTask};
