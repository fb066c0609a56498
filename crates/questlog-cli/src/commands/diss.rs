use chrono::Utc;
use clap::Subcommand;
use questlog_core::gamify::RewardPools;
use questlog_core::skill::PracticeContext;

use super::{load_settings, open_store, today, CliResult};

#[derive(Subcommand)]
pub enum DissAction {
    /// Print the dissertation record as JSON
    Show,
    /// List plan tasks with budgeted and worked hours
    Plan,
    /// Log hours worked on a plan task
    LogHours {
        task: String,
        #[arg(long)]
        hours: f64,
    },
}

pub fn run(action: DissAction) -> CliResult {
    let db = open_store()?;
    let mut settings = load_settings()?;
    let mut diss = db
        .get_dissertation()?
        .ok_or("dissertation record missing; run `questlog data reset`")?;

    match action {
        DissAction::Show => {
            if diss.reconcile_streak(today()) {
                db.upsert_dissertation(&diss)?;
            }
            println!("{}", serde_json::to_string_pretty(&diss)?);
        }
        DissAction::Plan => {
            for task in diss.phases.iter() {
                println!(
                    "{:<40} {} .. {}  {:>6.1}/{} h",
                    task.name, task.start_date, task.end_date, task.hours_worked, task.total_hours
                );
            }
            println!(
                "total: {:.1}/{} h",
                diss.total_hours_worked(),
                diss.total_hours_planned()
            );
        }
        DissAction::LogHours { task, hours } => {
            let pools = RewardPools::default();
            let mut rng = rand::thread_rng();
            let mut ctx = PracticeContext {
                today: today(),
                now: Utc::now(),
                healthy: settings.healthy(),
                pools: &pools,
                rng: &mut rng,
            };
            let outcome = diss
                .log_hours(&task, hours, &mut ctx)
                .ok_or_else(|| format!("unknown plan task or non-positive hours: {task}"))?;
            db.upsert_dissertation(&diss)?;
            settings.add_total_points(outcome.points_awarded)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
