use questlog_core::stats;

use super::{load_settings, open_store, today, CliResult};

pub fn run() -> CliResult {
    let db = open_store()?;
    let settings = load_settings()?;

    let skills = db.list_skills()?;
    let dissertation = db.get_dissertation()?;
    let habits = db.list_habits()?;
    let tasks = db.list_tasks()?;

    let overview = stats::overview(
        &skills,
        dissertation.as_ref(),
        &habits,
        &tasks,
        settings.total_points,
        today(),
    );
    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}
