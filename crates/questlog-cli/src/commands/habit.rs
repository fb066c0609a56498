use clap::Subcommand;
use questlog_core::habit::{Frequency, Habit};

use super::{award_points, load_settings, open_store, today, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits; stale streaks are corrected on read
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Only habits due today
        #[arg(long)]
        due: bool,
    },
    /// Add a custom habit
    Add {
        name: String,
        #[arg(long, default_value = "✨")]
        icon: String,
        #[arg(long)]
        category: Option<String>,
        /// "daily", "weekly", or "interval"
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Weekday indices 0=Sun..6=Sat, for weekly habits
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
        /// Day gap, for interval habits
        #[arg(long, default_value_t = 1)]
        every: u32,
    },
    /// Toggle today's completion
    Toggle { name: String },
    /// Remove a habit
    Remove { name: String },
}

pub fn run(action: HabitAction) -> CliResult {
    let db = open_store()?;
    let mut settings = load_settings()?;
    let today = today();

    match action {
        HabitAction::List { category, due } => {
            let mut habits = db.list_habits()?;
            for habit in &mut habits {
                if habit.reconcile_streak(today) {
                    db.upsert_habit(habit)?;
                }
            }
            habits.retain(|h| match &category {
                Some(c) => h.category.as_deref() == Some(c.as_str()),
                None => true,
            });
            if due {
                habits.retain(|h| h.due_today(today));
            }
            for habit in &habits {
                let mark = if habit.done_on(today) { "x" } else { " " };
                println!(
                    "[{mark}] {} {:<16} streak {:<3} {}",
                    habit.icon,
                    habit.name,
                    habit.streak,
                    habit.category.as_deref().unwrap_or("-")
                );
            }
        }
        HabitAction::Add {
            name,
            icon,
            category,
            frequency,
            days,
            every,
        } => {
            let frequency = match frequency.as_str() {
                "daily" => Frequency::Daily,
                "weekly" => Frequency::Weekly { days },
                "interval" => Frequency::Interval { days: every },
                other => return Err(format!("unknown frequency: {other}").into()),
            };
            let mut habit = Habit::new(name, icon, frequency);
            habit.custom = true;
            habit.category = category;
            db.upsert_habit(&habit)?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Toggle { name } => {
            let mut habit = db
                .get_habit(&name)?
                .ok_or_else(|| format!("unknown habit: {name}"))?;
            let toggle = habit.toggle(today);
            db.upsert_habit(&habit)?;
            let awarded = award_points(&mut settings, toggle.points)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "habit": habit.name,
                    "now_completed": toggle.now_completed,
                    "streak": habit.streak,
                    "points_awarded": awarded,
                }))?
            );
        }
        HabitAction::Remove { name } => {
            if db.get_habit(&name)?.is_none() {
                return Err(format!("unknown habit: {name}").into());
            }
            db.delete_habit(&name)?;
            println!("Removed habit: {name}");
        }
    }
    Ok(())
}
