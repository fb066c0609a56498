//! Pomodoro timer engine.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically.
//! Because elapsed time is computed from wall-clock deltas, ceasing to tick
//! (process exit, pause, reset) cancels cleanly: the only side effect ever
//! applied is the time decrement itself.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running(Focus) -> ShortBreak | LongBreak (every Nth completed session)
//! Running(Break) -> Focus
//! ```
//!
//! Whether the next phase starts counting immediately or waits in Idle is
//! governed by the two auto-start settings. `skip` forces the current phase
//! to complete immediately; `reset` returns to Idle with the configured
//! focus duration loaded. The machine is cyclic - there is no terminal
//! state.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Pomodoro timer parameters, sourced from Settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub focus_min: u32,
    pub short_break_min: u32,
    pub long_break_min: u32,
    /// A long break replaces every Nth short break.
    pub sessions_before_long_break: u32,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_min: 25,
            short_break_min: 5,
            long_break_min: 15,
            sessions_before_long_break: 4,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

/// What the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Core pomodoro engine.
///
/// Operates on wall-clock deltas -- no internal thread. Serializable so a
/// short-lived process (the CLI) can persist it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    config: TimerConfig,
    state: TimerState,
    phase: Phase,
    /// Remaining time in milliseconds for the current phase.
    remaining_ms: u64,
    /// Focus sessions completed since the engine was created.
    completed_sessions: u32,
    /// Timestamp (ms since epoch) of the last tick while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl PomodoroEngine {
    /// Create a new engine in `Idle` with the focus duration loaded.
    pub fn new(config: TimerConfig) -> Self {
        let remaining_ms = minutes_to_ms(config.focus_min);
        Self {
            config,
            state: TimerState::Idle,
            phase: Phase::Focus,
            remaining_ms,
            completed_sessions: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    fn phase_duration_ms(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Focus => self.config.focus_min,
            Phase::ShortBreak => self.config.short_break_min,
            Phase::LongBreak => self.config.long_break_min,
        };
        minutes_to_ms(minutes)
    }

    pub fn total_ms(&self) -> u64 {
        self.phase_duration_ms(self.phase)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms(),
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(Event::TimerStarted {
                    phase: self.phase,
                    duration_secs: self.remaining_ms / 1000,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.flush_elapsed();
                self.state = TimerState::Paused;
                self.last_tick_epoch_ms = None;
                Some(Event::TimerPaused {
                    phase: self.phase,
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(Event::TimerResumed {
                    phase: self.phase,
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Force the current phase to complete and move to the next one.
    pub fn skip(&mut self) -> Option<Event> {
        let from = self.phase;
        self.advance();
        Some(Event::TimerSkipped {
            from_phase: from,
            to_phase: self.phase,
            at: Utc::now(),
        })
    }

    /// Back to Idle with the configured focus duration loaded. The
    /// completed-session count survives a reset.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.phase = Phase::Focus;
        self.last_tick_epoch_ms = None;
        self.remaining_ms = self.phase_duration_ms(Phase::Focus);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call periodically. Returns `Some(Event::TimerCompleted)` when the
    /// current phase's countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed();
        if self.remaining_ms > 0 {
            return None;
        }
        let finished = self.phase;
        self.advance();
        Some(Event::TimerCompleted {
            phase: finished,
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        })
    }

    /// Adopt new settings. While idle the timer reloads to the new focus
    /// duration; mid-phase the running countdown is left untouched.
    pub fn apply_config(&mut self, config: TimerConfig) {
        let changed = self.config != config;
        self.config = config;
        if changed && self.state == TimerState::Idle {
            self.reset();
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self) {
        if let Some(last) = self.last_tick_epoch_ms {
            let now = now_ms();
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }

    /// Move to the next phase as if the current one completed.
    fn advance(&mut self) {
        let (next_phase, auto_start) = match self.phase {
            Phase::Focus => {
                self.completed_sessions += 1;
                let cadence = self.config.sessions_before_long_break.max(1);
                let next = if self.completed_sessions % cadence == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                (next, self.config.auto_start_breaks)
            }
            Phase::ShortBreak | Phase::LongBreak => (Phase::Focus, self.config.auto_start_pomodoros),
        };
        self.phase = next_phase;
        self.remaining_ms = self.phase_duration_ms(next_phase);
        if auto_start {
            self.state = TimerState::Running;
            self.last_tick_epoch_ms = Some(now_ms());
        } else {
            self.state = TimerState::Idle;
            self.last_tick_epoch_ms = None;
        }
    }
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

fn minutes_to_ms(minutes: u32) -> u64 {
    u64::from(minutes).saturating_mul(60).saturating_mul(1000)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PomodoroEngine {
        PomodoroEngine::new(TimerConfig::default())
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = engine();
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.start().is_none());

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);
        assert!(engine.pause().is_none());

        assert!(engine.resume().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn skip_moves_focus_to_short_break() {
        let mut engine = engine();
        engine.skip();
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.completed_sessions(), 1);
        // Auto-start is off by default: the break waits in Idle.
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn long_break_every_nth_session() {
        let mut engine = engine();
        for session in 1..=4 {
            assert_eq!(engine.phase(), Phase::Focus);
            engine.skip(); // finish focus
            if session == 4 {
                assert_eq!(engine.phase(), Phase::LongBreak);
            } else {
                assert_eq!(engine.phase(), Phase::ShortBreak);
            }
            engine.skip(); // finish break
        }
        assert_eq!(engine.completed_sessions(), 4);
        assert_eq!(engine.phase(), Phase::Focus);
    }

    #[test]
    fn auto_start_breaks_keeps_running() {
        let mut engine = PomodoroEngine::new(TimerConfig {
            auto_start_breaks: true,
            ..TimerConfig::default()
        });
        engine.start();
        engine.skip();
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.state(), TimerState::Running);
        // Break completion without auto_start_pomodoros parks in Idle.
        engine.skip();
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn reset_reloads_focus_duration_and_keeps_sessions() {
        let mut engine = engine();
        engine.skip();
        engine.skip();
        engine.start();
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000);
        assert_eq!(engine.completed_sessions(), 1);
    }

    #[test]
    fn tick_without_elapsed_time_does_not_complete() {
        let mut engine = engine();
        engine.start();
        assert!(engine.tick().is_none());
        assert!(engine.remaining_ms() > 0);
    }

    #[test]
    fn apply_config_reloads_while_idle_only() {
        let mut engine = engine();
        let new_config = TimerConfig {
            focus_min: 50,
            ..TimerConfig::default()
        };
        engine.apply_config(new_config.clone());
        assert_eq!(engine.remaining_ms(), 50 * 60 * 1000);

        engine.start();
        engine.apply_config(TimerConfig::default());
        // Running countdown untouched.
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.remaining_ms() > 25 * 60 * 1000);
    }

    #[test]
    fn engine_survives_serialization() {
        let mut engine = engine();
        engine.skip();
        let json = serde_json::to_string(&engine).unwrap();
        let restored: PomodoroEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase(), Phase::ShortBreak);
        assert_eq!(restored.completed_sessions(), 1);
        assert_eq!(restored.remaining_ms(), engine.remaining_ms());
    }

    #[test]
    fn zero_cadence_does_not_panic() {
        let mut engine = PomodoroEngine::new(TimerConfig {
            sessions_before_long_break: 0,
            ..TimerConfig::default()
        });
        engine.skip();
        assert_eq!(engine.phase(), Phase::LongBreak);
    }
}
