//! Backup and restore: one JSON document holding every entity collection.
//!
//! The document has no schema version; a restore validates by strict
//! deserialization against the current entity shapes and replaces all
//! collections in one transaction, so a failed restore leaves prior state
//! intact.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Database;
use crate::checkin::CheckIn;
use crate::dissertation::Dissertation;
use crate::error::{BackupError, Result};
use crate::habit::{Habit, HabitCategory};
use crate::skill::Skill;
use crate::todo::{TodoGroup, TodoTask};

/// The full backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub dissertation: Option<Dissertation>,
    pub habits: Vec<Habit>,
    pub habit_categories: Vec<HabitCategory>,
    pub check_ins: Vec<CheckIn>,
    pub todo_tasks: Vec<TodoTask>,
    pub todo_groups: Vec<TodoGroup>,
}

/// Collect every collection into a backup document.
pub fn export_document(db: &Database) -> Result<BackupDocument> {
    Ok(BackupDocument {
        skills: db.list_skills()?,
        dissertation: db.get_dissertation()?,
        habits: db.list_habits()?,
        habit_categories: db.list_habit_categories()?,
        check_ins: db.list_check_ins()?,
        todo_tasks: db.list_tasks()?,
        todo_groups: db.list_todo_groups()?,
    })
}

/// Write a timestamped backup file into `dir`. Returns the file path.
pub fn write_backup(db: &Database, dir: &Path) -> Result<PathBuf> {
    let document = export_document(db)?;
    let json = serde_json::to_string_pretty(&document)?;
    let filename = format!("questlog_backup_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);
    std::fs::write(&path, json).map_err(|e| BackupError::FileAccess {
        path: path.clone(),
        message: e.to_string(),
    })?;
    Ok(path)
}

/// Replace all collections with the contents of `json`.
///
/// The document is validated up front; nothing is mutated when it does not
/// match the current entity shapes. The replacement itself runs in one
/// transaction.
pub fn restore_json(db: &Database, json: &str) -> Result<()> {
    let document: BackupDocument = serde_json::from_str(json)
        .map_err(|e| BackupError::InvalidDocument(e.to_string()))?;
    restore_document(db, &document)
}

/// Restore from a backup file.
pub fn restore_file(db: &Database, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path).map_err(|e| BackupError::FileAccess {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    restore_json(db, &json)
}

fn restore_document(db: &Database, document: &BackupDocument) -> Result<()> {
    db.in_transaction(|db| {
        db.delete_all_data()?;
        db.insert_all_skills(&document.skills)?;
        if let Some(diss) = &document.dissertation {
            db.upsert_dissertation(diss)?;
        }
        db.insert_all_habits(&document.habits)?;
        db.insert_all_habit_categories(&document.habit_categories)?;
        db.insert_all_check_ins(&document.check_ins)?;
        db.insert_all_tasks(&document.todo_tasks)?;
        db.insert_all_todo_groups(&document.todo_groups)?;
        Ok(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn backup_restore_round_trip() {
        let db = Database::open_memory().unwrap();
        seed::initialize_default_data(&db).unwrap();

        // Touch some state so the round trip carries more than defaults.
        let mut skill = db.get_skill("art").unwrap().unwrap();
        skill.progress.points = 120;
        skill.progress.rewards_unlocked = vec!["Movie night".to_string()];
        db.upsert_skill(&skill).unwrap();

        let before = export_document(&db).unwrap();
        let json = serde_json::to_string(&before).unwrap();

        // Fresh, reset store.
        let restored_db = Database::open_memory().unwrap();
        restore_json(&restored_db, &json).unwrap();

        let after = export_document(&restored_db).unwrap();
        assert_eq!(after.skills, before.skills);
        assert_eq!(after.dissertation, before.dissertation);
        assert_eq!(after.habits, before.habits);
        assert_eq!(after.habit_categories, before.habit_categories);
        assert_eq!(after.check_ins, before.check_ins);
        assert_eq!(after.todo_tasks, before.todo_tasks);
        assert_eq!(after.todo_groups, before.todo_groups);
    }

    #[test]
    fn invalid_document_leaves_state_intact() {
        let db = Database::open_memory().unwrap();
        seed::initialize_default_data(&db).unwrap();
        let before = db.list_skills().unwrap();

        let err = restore_json(&db, "{\"skills\": 7}").unwrap_err();
        assert!(err.to_string().contains("Invalid backup document"));
        assert_eq!(db.list_skills().unwrap(), before);
    }

    #[test]
    fn unknown_fields_are_ignored_missing_required_fields_fail() {
        let db = Database::open_memory().unwrap();

        // Unknown top-level fields pass validation.
        let json = r#"{
            "skills": [], "dissertation": null, "habits": [],
            "habit_categories": [], "check_ins": [], "todo_tasks": [],
            "todo_groups": [], "future_field": true
        }"#;
        restore_json(&db, json).unwrap();

        // A required collection missing fails before any mutation.
        seed::initialize_default_data(&db).unwrap();
        let result = restore_json(&db, r#"{"skills": []}"#);
        assert!(result.is_err());
        assert!(!db.list_habits().unwrap().is_empty());
    }

    #[test]
    fn backup_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_memory().unwrap();
        seed::initialize_default_data(&db).unwrap();

        let path = write_backup(&db, dir.path()).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("questlog_backup_"));

        let restored_db = Database::open_memory().unwrap();
        restore_file(&restored_db, &path).unwrap();
        assert_eq!(restored_db.list_skills().unwrap().len(), 3);
    }
}
