use chrono::NaiveDate;
use clap::Subcommand;
use questlog_core::recurrence::{Recurrence, RecurrenceKind};
use questlog_core::todo::{sort_for_display, Priority, TodoTask};

use super::{award_points, load_settings, open_store, today, CliResult};

#[derive(Subcommand)]
pub enum TodoAction {
    /// List tasks, pending first
    List {
        /// Filter by group
        #[arg(long)]
        group: Option<String>,
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task
    Add {
        name: String,
        #[arg(long, default_value = "Personal")]
        group: String,
        /// "high", "medium", or "low"
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
        /// Recurrence: "daily", "weekly", "monthly", or "yearly"
        #[arg(long)]
        recur: Option<String>,
        #[arg(long, default_value_t = 1)]
        interval: u32,
        /// Weekday indices 0=Sun..6=Sat, for weekly recurrence
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
        /// Date after which recurrence stops
        #[arg(long)]
        until: Option<NaiveDate>,
    },
    /// Complete a task; recurring tasks schedule their next instance
    Complete { id: String },
    /// Clear a task's completed flag
    Reopen { id: String },
    /// Delete a task
    Delete { id: String },
    /// List task groups
    Groups,
}

fn fetch_task(
    db: &questlog_core::storage::Database,
    id: &str,
) -> Result<TodoTask, Box<dyn std::error::Error>> {
    db.get_task(id)?
        .ok_or_else(|| format!("unknown task: {id}").into())
}

pub fn run(action: TodoAction) -> CliResult {
    let db = open_store()?;
    let mut settings = load_settings()?;

    match action {
        TodoAction::List { group, all, json } => {
            let mut tasks = db.list_tasks()?;
            if let Some(group) = &group {
                tasks.retain(|t| &t.group == group);
            }
            if !all {
                tasks.retain(|t| !t.completed);
            }
            sort_for_display(&mut tasks);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in &tasks {
                    let mark = if task.completed { "x" } else { " " };
                    let due = task
                        .due_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "[{mark}] {:<36} {:<8} {:<10} due {due}  {}",
                        task.id,
                        task.priority.as_str(),
                        task.group,
                        task.name
                    );
                }
            }
        }
        TodoAction::Add {
            name,
            group,
            priority,
            due,
            notes,
            recur,
            interval,
            days,
            until,
        } => {
            let mut task = TodoTask::new(name, group, Priority::parse(&priority));
            task.due_date = due;
            task.notes = notes;
            if let Some(kind) = recur {
                task.recurrence = Some(Recurrence {
                    kind: RecurrenceKind::parse(&kind),
                    interval,
                    days: if days.is_empty() { None } else { Some(days) },
                    end_date: until,
                });
            }
            db.upsert_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TodoAction::Complete { id } => {
            let mut task = fetch_task(&db, &id)?;
            let outcome = task.complete(today());
            db.upsert_task(&task)?;
            if let Some(next) = &outcome.next {
                db.upsert_task(next)?;
            }
            let awarded = award_points(&mut settings, outcome.points)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "task": task,
                    "points_awarded": awarded,
                    "next": outcome.next,
                }))?
            );
        }
        TodoAction::Reopen { id } => {
            let mut task = fetch_task(&db, &id)?;
            task.reopen();
            db.upsert_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TodoAction::Delete { id } => {
            fetch_task(&db, &id)?;
            db.delete_task(&id)?;
            println!("Deleted task: {id}");
        }
        TodoAction::Groups => {
            for group in db.list_todo_groups()? {
                println!("{:<12} {}", group.name, group.color);
            }
        }
    }
    Ok(())
}
