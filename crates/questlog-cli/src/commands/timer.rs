use clap::Subcommand;
use questlog_core::storage::Database;
use questlog_core::PomodoroEngine;

use super::{load_settings, open_store, CliResult};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the current phase
    Start,
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Force the current phase to complete
    Skip,
    /// Back to idle with the focus duration loaded
    Reset,
    /// Tick the engine and print the current state as JSON
    Status,
}

fn load_engine(db: &Database, settings: &questlog_core::storage::Settings) -> PomodoroEngine {
    let mut engine = match db.kv_get(ENGINE_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json)
            .unwrap_or_else(|_| PomodoroEngine::new(settings.timer_config())),
        _ => PomodoroEngine::new(settings.timer_config()),
    };
    engine.apply_config(settings.timer_config());
    engine
}

fn save_engine(db: &Database, engine: &PomodoroEngine) -> CliResult {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let db = open_store()?;
    let settings = load_settings()?;
    let mut engine = load_engine(&db, &settings);

    match action {
        TimerAction::Start => {
            if let Some(event) = engine.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        TimerAction::Pause => {
            if let Some(event) = engine.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        TimerAction::Resume => {
            if let Some(event) = engine.resume() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        TimerAction::Skip => {
            if let Some(event) = engine.skip() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Reset => {
            if let Some(event) = engine.reset() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Status => {
            // Tick applies wall-clock elapsed time; a phase may complete.
            let completed = engine.tick();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if let Some(event) = completed {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
