use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_store, today, CliResult};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// List check-ins and their next due dates
    List,
    /// Record an occurrence for a subcategory
    Record {
        checkin: String,
        subcategory: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Set or clear the notes on a subcategory
    Note {
        checkin: String,
        subcategory: String,
        #[arg(long)]
        notes: Option<String>,
    },
}

pub fn run(action: CheckinAction) -> CliResult {
    let db = open_store()?;

    match action {
        CheckinAction::List => {
            for check_in in db.list_check_ins()? {
                println!("{} {}", check_in.icon, check_in.name);
                for sub in &check_in.subcategories {
                    let last = sub
                        .last_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "never".to_string());
                    let next = sub
                        .next_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let flag = if sub.overdue(today()) { "  DUE" } else { "" };
                    println!("  {:<16} last {last:<10} next {next}{flag}", sub.name);
                }
            }
        }
        CheckinAction::Record {
            checkin,
            subcategory,
            date,
        } => {
            let mut record = db
                .get_check_in(&checkin)?
                .ok_or_else(|| format!("unknown check-in: {checkin}"))?;
            if !record.record(&subcategory, date.unwrap_or_else(today)) {
                return Err(format!("unknown subcategory: {subcategory}").into());
            }
            db.upsert_check_in(&record)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        CheckinAction::Note {
            checkin,
            subcategory,
            notes,
        } => {
            let mut record = db
                .get_check_in(&checkin)?
                .ok_or_else(|| format!("unknown check-in: {checkin}"))?;
            if !record.set_notes(&subcategory, notes) {
                return Err(format!("unknown subcategory: {subcategory}").into());
            }
            db.upsert_check_in(&record)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
