use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerState};

/// Every timer state change produces an Event.
/// The CLI prints them; a GUI host would poll or subscribe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The current phase's countdown reached zero (or was skipped).
    TimerCompleted {
        phase: Phase,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from_phase: Phase,
        to_phase: Phase,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase: Phase,
        remaining_ms: u64,
        total_ms: u64,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
}
