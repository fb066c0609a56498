use chrono::Utc;
use clap::Subcommand;
use questlog_core::gamify::RewardPools;
use questlog_core::skill::{PracticeContext, Skill};

use super::{load_settings, open_store, today, CliResult};

#[derive(Subcommand)]
pub enum SkillAction {
    /// List all skills with points, level, and streak
    List,
    /// Print a skill as JSON
    Show { name: String },
    /// Log a completed fundamental exercise
    LogFundamental { name: String, exercise: String },
    /// Log an immersion session
    LogImmersion {
        name: String,
        activity: String,
        /// Hours spent
        #[arg(long)]
        hours: f64,
        /// Media title
        #[arg(long)]
        title: Option<String>,
    },
    /// Log an application session
    LogApplication {
        name: String,
        activity: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Log a drawing
    LogDrawing {
        name: String,
        subject: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Log an accountability post
    LogAccountability { name: String, activity: String },
}

fn fetch_skill(
    db: &questlog_core::storage::Database,
    name: &str,
) -> Result<Skill, Box<dyn std::error::Error>> {
    db.get_skill(name)?
        .ok_or_else(|| format!("unknown skill: {name}").into())
}

pub fn run(action: SkillAction) -> CliResult {
    let db = open_store()?;
    let mut settings = load_settings()?;

    match action {
        SkillAction::List => {
            let mut skills = db.list_skills()?;
            for skill in &mut skills {
                // Passive streak pass: stale streaks are zeroed on read.
                if skill.reconcile_streak(today()) {
                    db.upsert_skill(skill)?;
                }
                println!(
                    "{:<10} level {:<2} {:>5} pts  streak {}",
                    skill.name, skill.progress.level, skill.progress.points, skill.progress.streak
                );
            }
        }
        SkillAction::Show { name } => {
            let mut skill = fetch_skill(&db, &name)?;
            if skill.reconcile_streak(today()) {
                db.upsert_skill(&skill)?;
            }
            println!("{}", serde_json::to_string_pretty(&skill)?);
        }
        SkillAction::LogFundamental { name, exercise } => {
            log(&db, &mut settings, &name, |skill, ctx| {
                skill.log_fundamental(&exercise, ctx)
            })?;
        }
        SkillAction::LogImmersion {
            name,
            activity,
            hours,
            title,
        } => {
            log(&db, &mut settings, &name, |skill, ctx| {
                skill.log_immersion(&activity, hours, title.clone(), ctx)
            })?;
        }
        SkillAction::LogApplication {
            name,
            activity,
            notes,
        } => {
            log(&db, &mut settings, &name, |skill, ctx| {
                skill.log_application(&activity, notes.clone(), ctx)
            })?;
        }
        SkillAction::LogDrawing {
            name,
            subject,
            notes,
        } => {
            log(&db, &mut settings, &name, |skill, ctx| {
                skill.log_drawing(&subject, notes.clone(), ctx)
            })?;
        }
        SkillAction::LogAccountability { name, activity } => {
            log(&db, &mut settings, &name, |skill, ctx| {
                skill.log_accountability(&activity, ctx)
            })?;
        }
    }
    Ok(())
}

fn log(
    db: &questlog_core::storage::Database,
    settings: &mut questlog_core::storage::Settings,
    name: &str,
    f: impl FnOnce(
        &mut Skill,
        &mut PracticeContext<'_, rand::rngs::ThreadRng>,
    ) -> questlog_core::gamify::PracticeOutcome,
) -> CliResult {
    let mut skill = fetch_skill(db, name)?;
    let pools = RewardPools::default();
    let mut rng = rand::thread_rng();
    let mut ctx = PracticeContext {
        today: today(),
        now: Utc::now(),
        healthy: settings.healthy(),
        pools: &pools,
        rng: &mut rng,
    };
    let outcome = f(&mut skill, &mut ctx);
    db.upsert_skill(&skill)?;
    settings.add_total_points(outcome.points_awarded)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
