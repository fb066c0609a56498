mod engine;

pub use engine::{Phase, PomodoroEngine, TimerConfig, TimerState};
