pub mod checkin;
pub mod config;
pub mod data;
pub mod diss;
pub mod habit;
pub mod health;
pub mod rewards;
pub mod skill;
pub mod stats;
pub mod timer;
pub mod todo;

use chrono::NaiveDate;
use questlog_core::seed;
use questlog_core::storage::{Database, Settings};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store, seeding default data on first use.
pub fn open_store() -> Result<Database, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    seed::initialize_default_data(&db)?;
    Ok(db)
}

pub fn load_settings() -> Result<Settings, Box<dyn std::error::Error>> {
    Ok(Settings::load()?)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Add points to the global running total, applying the health gate.
/// Returns the points actually awarded.
pub fn award_points(
    settings: &mut Settings,
    points: u32,
) -> Result<u32, Box<dyn std::error::Error>> {
    let awarded = if settings.healthy() { points } else { 0 };
    settings.add_total_points(awarded)?;
    Ok(awarded)
}
