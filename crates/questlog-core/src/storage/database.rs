//! SQLite-based storage for every entity collection.
//!
//! Scalar fields map to columns; nested value lists (practice logs, exercise
//! catalogs, completion dates, plan phases) are stored as JSON text columns.
//! Multi-collection operations (reset, restore) run inside a single
//! transaction so consumers see all-or-nothing.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::data_dir;
use crate::checkin::{CheckIn, CheckInSubcategory};
use crate::dissertation::{Dissertation, PlanPhases};
use crate::error::{DatabaseError, Result};
use crate::gamify::Progress;
use crate::habit::{Frequency, Habit, HabitCategory};
use crate::skill::{PracticeEntry, Skill, SkillCatalog};
use crate::todo::{Priority, TodoGroup, TodoTask};

/// The dissertation is a single row with a fixed key.
const DISSERTATION_ROW_ID: &str = "main";

/// Parse an optional ISO date column. Unparseable stored values load as
/// `None` rather than erroring.
fn parse_date_opt(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| s.parse().ok())
}

/// SQLite database for the tracker.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/questlog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("questlog.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests and tooling).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS skills (
                name                   TEXT PRIMARY KEY,
                points                 INTEGER NOT NULL DEFAULT 0,
                level                  INTEGER NOT NULL DEFAULT 1,
                streak                 INTEGER NOT NULL DEFAULT 0,
                last_practice          TEXT,
                fundamentals_completed INTEGER NOT NULL DEFAULT 0,
                immersion_hours        REAL NOT NULL DEFAULT 0,
                application_sessions   INTEGER NOT NULL DEFAULT 0,
                sketchbook_pages       INTEGER NOT NULL DEFAULT 0,
                accountability_posts   INTEGER NOT NULL DEFAULT 0,
                rewards_unlocked       TEXT NOT NULL DEFAULT '[]',
                catalog                TEXT NOT NULL DEFAULT '{}',
                practice_log           TEXT NOT NULL DEFAULT '[]'
            );

            CREATE TABLE IF NOT EXISTS dissertation (
                id               TEXT PRIMARY KEY,
                points           INTEGER NOT NULL DEFAULT 0,
                level            INTEGER NOT NULL DEFAULT 1,
                streak           INTEGER NOT NULL DEFAULT 0,
                last_practice    TEXT,
                rewards_unlocked TEXT NOT NULL DEFAULT '[]',
                phases           TEXT NOT NULL DEFAULT '{}'
            );

            CREATE TABLE IF NOT EXISTS habits (
                name            TEXT PRIMARY KEY,
                icon            TEXT NOT NULL,
                active          INTEGER NOT NULL DEFAULT 1,
                custom          INTEGER NOT NULL DEFAULT 0,
                category        TEXT,
                frequency       TEXT NOT NULL,
                streak          INTEGER NOT NULL DEFAULT 0,
                completed_dates TEXT NOT NULL DEFAULT '[]'
            );

            CREATE TABLE IF NOT EXISTS habit_categories (
                name  TEXT PRIMARY KEY,
                color TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS check_ins (
                name          TEXT PRIMARY KEY,
                icon          TEXT NOT NULL,
                subcategories TEXT NOT NULL DEFAULT '[]'
            );

            CREATE TABLE IF NOT EXISTS todo_tasks (
                id              TEXT PRIMARY KEY,
                name            TEXT NOT NULL,
                group_name      TEXT NOT NULL,
                priority        TEXT NOT NULL,
                due_date        TEXT,
                completed       INTEGER NOT NULL DEFAULT 0,
                completion_date TEXT,
                notes           TEXT,
                recurrence      TEXT
            );

            CREATE TABLE IF NOT EXISTS todo_groups (
                name  TEXT PRIMARY KEY,
                color TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_todo_tasks_completed ON todo_tasks(completed);
            CREATE INDEX IF NOT EXISTS idx_todo_tasks_group ON todo_tasks(group_name);",
        )?;
        Ok(())
    }

    /// Run `f` inside a single immediate transaction, rolling back on error.
    pub fn in_transaction<T>(
        &self,
        f: impl FnOnce(&Self) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT;")?;
                Ok(value)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err)
            }
        }
    }

    /// True when no skills exist; used to decide whether to seed defaults.
    pub fn is_empty(&self) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM skills", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    // === Skills ===

    pub fn upsert_skill(&self, skill: &Skill) -> Result<(), DatabaseError> {
        let rewards = serde_json::to_string(&skill.progress.rewards_unlocked)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let catalog = serde_json::to_string(&skill.catalog)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let log = serde_json::to_string(&skill.practice_log)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO skills (
                name, points, level, streak, last_practice,
                fundamentals_completed, immersion_hours, application_sessions,
                sketchbook_pages, accountability_posts, rewards_unlocked,
                catalog, practice_log
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                skill.name,
                skill.progress.points,
                skill.progress.level,
                skill.progress.streak,
                skill.progress.last_practice.map(|d| d.to_string()),
                skill.fundamentals_completed,
                skill.immersion_hours,
                skill.application_sessions,
                skill.sketchbook_pages,
                skill.accountability_posts,
                rewards,
                catalog,
                log,
            ],
        )?;
        Ok(())
    }

    fn row_to_skill(row: &rusqlite::Row) -> Result<Skill, rusqlite::Error> {
        let rewards_json: String = row.get(10)?;
        let catalog_json: String = row.get(11)?;
        let log_json: String = row.get(12)?;
        Ok(Skill {
            name: row.get(0)?,
            progress: Progress {
                points: row.get(1)?,
                level: row.get(2)?,
                streak: row.get(3)?,
                last_practice: parse_date_opt(row.get(4)?),
                rewards_unlocked: serde_json::from_str(&rewards_json).unwrap_or_default(),
            },
            fundamentals_completed: row.get(5)?,
            immersion_hours: row.get(6)?,
            application_sessions: row.get(7)?,
            sketchbook_pages: row.get(8)?,
            accountability_posts: row.get(9)?,
            catalog: serde_json::from_str::<SkillCatalog>(&catalog_json).unwrap_or_default(),
            practice_log: serde_json::from_str::<Vec<PracticeEntry>>(&log_json)
                .unwrap_or_default(),
        })
    }

    pub fn get_skill(&self, name: &str) -> Result<Option<Skill>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, points, level, streak, last_practice,
                    fundamentals_completed, immersion_hours, application_sessions,
                    sketchbook_pages, accountability_posts, rewards_unlocked,
                    catalog, practice_log
             FROM skills WHERE name = ?1",
        )?;
        match stmt.query_row(params![name], Self::row_to_skill) {
            Ok(skill) => Ok(Some(skill)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_skills(&self) -> Result<Vec<Skill>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, points, level, streak, last_practice,
                    fundamentals_completed, immersion_hours, application_sessions,
                    sketchbook_pages, accountability_posts, rewards_unlocked,
                    catalog, practice_log
             FROM skills ORDER BY name",
        )?;
        let skills = stmt.query_map([], Self::row_to_skill)?;
        Ok(skills.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_all_skills(&self, skills: &[Skill]) -> Result<(), DatabaseError> {
        for skill in skills {
            self.upsert_skill(skill)?;
        }
        Ok(())
    }

    pub fn delete_all_skills(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM skills", [])?;
        Ok(())
    }

    // === Dissertation ===

    pub fn upsert_dissertation(&self, diss: &Dissertation) -> Result<(), DatabaseError> {
        let rewards = serde_json::to_string(&diss.progress.rewards_unlocked)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let phases = serde_json::to_string(&diss.phases)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO dissertation (
                id, points, level, streak, last_practice, rewards_unlocked, phases
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                DISSERTATION_ROW_ID,
                diss.progress.points,
                diss.progress.level,
                diss.progress.streak,
                diss.progress.last_practice.map(|d| d.to_string()),
                rewards,
                phases,
            ],
        )?;
        Ok(())
    }

    pub fn get_dissertation(&self) -> Result<Option<Dissertation>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT points, level, streak, last_practice, rewards_unlocked, phases
             FROM dissertation WHERE id = ?1",
        )?;
        let result = stmt.query_row(params![DISSERTATION_ROW_ID], |row| {
            let rewards_json: String = row.get(4)?;
            let phases_json: String = row.get(5)?;
            Ok(Dissertation {
                progress: Progress {
                    points: row.get(0)?,
                    level: row.get(1)?,
                    streak: row.get(2)?,
                    last_practice: parse_date_opt(row.get(3)?),
                    rewards_unlocked: serde_json::from_str(&rewards_json).unwrap_or_default(),
                },
                phases: serde_json::from_str::<PlanPhases>(&phases_json).unwrap_or_default(),
            })
        });
        match result {
            Ok(diss) => Ok(Some(diss)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete_dissertation(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM dissertation", [])?;
        Ok(())
    }

    // === Habits ===

    pub fn upsert_habit(&self, habit: &Habit) -> Result<(), DatabaseError> {
        let frequency = serde_json::to_string(&habit.frequency)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let dates = serde_json::to_string(&habit.completed_dates)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO habits (
                name, icon, active, custom, category, frequency, streak, completed_dates
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                habit.name,
                habit.icon,
                habit.active,
                habit.custom,
                habit.category,
                frequency,
                habit.streak,
                dates,
            ],
        )?;
        Ok(())
    }

    fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
        let frequency_json: String = row.get(5)?;
        let dates_json: String = row.get(7)?;
        Ok(Habit {
            name: row.get(0)?,
            icon: row.get(1)?,
            active: row.get(2)?,
            custom: row.get(3)?,
            category: row.get(4)?,
            frequency: serde_json::from_str(&frequency_json).unwrap_or(Frequency::Daily),
            streak: row.get(6)?,
            completed_dates: serde_json::from_str(&dates_json).unwrap_or_default(),
        })
    }

    pub fn get_habit(&self, name: &str) -> Result<Option<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, icon, active, custom, category, frequency, streak, completed_dates
             FROM habits WHERE name = ?1",
        )?;
        match stmt.query_row(params![name], Self::row_to_habit) {
            Ok(habit) => Ok(Some(habit)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_habits(&self) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, icon, active, custom, category, frequency, streak, completed_dates
             FROM habits ORDER BY name",
        )?;
        let habits = stmt.query_map([], Self::row_to_habit)?;
        Ok(habits.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_habit(&self, name: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM habits WHERE name = ?1", params![name])?;
        Ok(())
    }

    pub fn insert_all_habits(&self, habits: &[Habit]) -> Result<(), DatabaseError> {
        for habit in habits {
            self.upsert_habit(habit)?;
        }
        Ok(())
    }

    pub fn delete_all_habits(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM habits", [])?;
        Ok(())
    }

    // === Habit categories ===

    pub fn upsert_habit_category(&self, category: &HabitCategory) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO habit_categories (name, color) VALUES (?1, ?2)",
            params![category.name, category.color],
        )?;
        Ok(())
    }

    pub fn list_habit_categories(&self) -> Result<Vec<HabitCategory>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, color FROM habit_categories ORDER BY name")?;
        let categories = stmt.query_map([], |row| {
            Ok(HabitCategory {
                name: row.get(0)?,
                color: row.get(1)?,
            })
        })?;
        Ok(categories.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_all_habit_categories(
        &self,
        categories: &[HabitCategory],
    ) -> Result<(), DatabaseError> {
        for category in categories {
            self.upsert_habit_category(category)?;
        }
        Ok(())
    }

    pub fn delete_all_habit_categories(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM habit_categories", [])?;
        Ok(())
    }

    // === Check-ins ===

    pub fn upsert_check_in(&self, check_in: &CheckIn) -> Result<(), DatabaseError> {
        let subs = serde_json::to_string(&check_in.subcategories)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO check_ins (name, icon, subcategories) VALUES (?1, ?2, ?3)",
            params![check_in.name, check_in.icon, subs],
        )?;
        Ok(())
    }

    fn row_to_check_in(row: &rusqlite::Row) -> Result<CheckIn, rusqlite::Error> {
        let subs_json: String = row.get(2)?;
        Ok(CheckIn {
            name: row.get(0)?,
            icon: row.get(1)?,
            subcategories: serde_json::from_str::<Vec<CheckInSubcategory>>(&subs_json)
                .unwrap_or_default(),
        })
    }

    pub fn get_check_in(&self, name: &str) -> Result<Option<CheckIn>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, icon, subcategories FROM check_ins WHERE name = ?1")?;
        match stmt.query_row(params![name], Self::row_to_check_in) {
            Ok(check_in) => Ok(Some(check_in)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_check_ins(&self) -> Result<Vec<CheckIn>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, icon, subcategories FROM check_ins ORDER BY name")?;
        let check_ins = stmt.query_map([], Self::row_to_check_in)?;
        Ok(check_ins.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_all_check_ins(&self, check_ins: &[CheckIn]) -> Result<(), DatabaseError> {
        for check_in in check_ins {
            self.upsert_check_in(check_in)?;
        }
        Ok(())
    }

    pub fn delete_all_check_ins(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM check_ins", [])?;
        Ok(())
    }

    // === Todo tasks ===

    pub fn upsert_task(&self, task: &TodoTask) -> Result<(), DatabaseError> {
        let recurrence = task
            .recurrence
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO todo_tasks (
                id, name, group_name, priority, due_date, completed,
                completion_date, notes, recurrence
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.name,
                task.group,
                task.priority.as_str(),
                task.due_date.map(|d| d.to_string()),
                task.completed,
                task.completion_date.map(|d| d.to_string()),
                task.notes,
                recurrence,
            ],
        )?;
        Ok(())
    }

    fn row_to_task(row: &rusqlite::Row) -> Result<TodoTask, rusqlite::Error> {
        let priority_str: String = row.get(3)?;
        let recurrence_json: Option<String> = row.get(8)?;
        Ok(TodoTask {
            id: row.get(0)?,
            name: row.get(1)?,
            group: row.get(2)?,
            priority: Priority::parse(&priority_str),
            due_date: parse_date_opt(row.get(4)?),
            completed: row.get(5)?,
            completion_date: parse_date_opt(row.get(6)?),
            notes: row.get(7)?,
            recurrence: recurrence_json.and_then(|json| serde_json::from_str(&json).ok()),
        })
    }

    pub fn get_task(&self, id: &str) -> Result<Option<TodoTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, group_name, priority, due_date, completed,
                    completion_date, notes, recurrence
             FROM todo_tasks WHERE id = ?1",
        )?;
        match stmt.query_row(params![id], Self::row_to_task) {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_tasks(&self) -> Result<Vec<TodoTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, group_name, priority, due_date, completed,
                    completion_date, notes, recurrence
             FROM todo_tasks",
        )?;
        let tasks = stmt.query_map([], Self::row_to_task)?;
        Ok(tasks.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM todo_tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn insert_all_tasks(&self, tasks: &[TodoTask]) -> Result<(), DatabaseError> {
        for task in tasks {
            self.upsert_task(task)?;
        }
        Ok(())
    }

    pub fn delete_all_tasks(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM todo_tasks", [])?;
        Ok(())
    }

    // === Todo groups ===

    pub fn upsert_todo_group(&self, group: &TodoGroup) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO todo_groups (name, color) VALUES (?1, ?2)",
            params![group.name, group.color],
        )?;
        Ok(())
    }

    pub fn list_todo_groups(&self) -> Result<Vec<TodoGroup>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, color FROM todo_groups ORDER BY name")?;
        let groups = stmt.query_map([], |row| {
            Ok(TodoGroup {
                name: row.get(0)?,
                color: row.get(1)?,
            })
        })?;
        Ok(groups.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_all_todo_groups(&self, groups: &[TodoGroup]) -> Result<(), DatabaseError> {
        for group in groups {
            self.upsert_todo_group(group)?;
        }
        Ok(())
    }

    pub fn delete_all_todo_groups(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM todo_groups", [])?;
        Ok(())
    }

    // === Bulk operations ===

    /// Delete every entity collection. Callers wrap this in a transaction
    /// together with whatever repopulates the store.
    pub fn delete_all_data(&self) -> Result<(), DatabaseError> {
        self.delete_all_skills()?;
        self.delete_dissertation()?;
        self.delete_all_habits()?;
        self.delete_all_habit_categories()?;
        self.delete_all_check_ins()?;
        self.delete_all_tasks()?;
        self.delete_all_todo_groups()?;
        Ok(())
    }

    // === Key-value store ===

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
