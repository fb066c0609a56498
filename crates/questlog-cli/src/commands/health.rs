use clap::Subcommand;

use super::{load_settings, today, CliResult};

#[derive(Subcommand)]
pub enum HealthAction {
    /// Print the current health-check state
    Status,
    /// Submit today's health check
    Submit {
        #[arg(long)]
        eating_well: bool,
        #[arg(long)]
        exercised: bool,
        #[arg(long)]
        mental_health: bool,
    },
}

pub fn run(action: HealthAction) -> CliResult {
    let mut settings = load_settings()?;

    match action {
        HealthAction::Status => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "status": settings.health.status,
                    "last_check": settings.health.last_check,
                    "check_due_today": settings.health_check_due(today()),
                }))?
            );
        }
        HealthAction::Submit {
            eating_well,
            exercised,
            mental_health,
        } => {
            // A day passes only when all three are true.
            let overall = eating_well && exercised && mental_health;
            settings.record_health_check(overall, today())?;
            if overall {
                println!("Health check passed. Points flow normally today.");
            } else {
                println!("Health check not passed. Point awards are paused for today.");
            }
        }
    }
    Ok(())
}
