//! End-to-end flows over an in-memory store: log practice, complete a
//! recurring task, toggle habits, then round-trip the whole data set
//! through a backup.

use chrono::{NaiveDate, Utc};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use questlog_core::gamify::RewardPools;
use questlog_core::recurrence::{Recurrence, RecurrenceKind};
use questlog_core::seed;
use questlog_core::skill::PracticeContext;
use questlog_core::storage::backup;
use questlog_core::storage::Database;
use questlog_core::todo::{Priority, TodoTask};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn practice_ctx<'a>(
    today: NaiveDate,
    healthy: bool,
    pools: &'a RewardPools,
    rng: &'a mut Pcg64,
) -> PracticeContext<'a, Pcg64> {
    PracticeContext {
        today,
        now: Utc::now(),
        healthy,
        pools,
        rng,
    }
}

#[test]
fn practice_logging_persists_through_store() {
    let db = Database::open_memory().unwrap();
    seed::initialize_default_data(&db).unwrap();

    let pools = RewardPools::default();
    let mut rng = Pcg64::seed_from_u64(11);
    let today = date("2025-04-10");

    let mut skill = db.get_skill("korean").unwrap().unwrap();
    let outcome = skill.log_fundamental(
        "Hangul basics - Vowels",
        &mut practice_ctx(today, true, &pools, &mut rng),
    );
    db.upsert_skill(&skill).unwrap();

    assert_eq!(outcome.points_awarded, 2);
    let loaded = db.get_skill("korean").unwrap().unwrap();
    assert_eq!(loaded.progress.points, 2);
    assert_eq!(loaded.progress.streak, 1);
    assert_eq!(loaded.fundamentals_completed, 1);
    assert_eq!(loaded.practice_log.len(), 1);
}

#[test]
fn completing_recurring_task_inserts_next_instance() {
    let db = Database::open_memory().unwrap();
    seed::initialize_default_data(&db).unwrap();

    let mut task = TodoTask::new("Water plants", "Personal", Priority::Medium);
    task.due_date = Some(date("2025-04-10"));
    task.recurrence = Some(Recurrence {
        kind: RecurrenceKind::Daily,
        interval: 2,
        days: None,
        end_date: None,
    });
    db.upsert_task(&task).unwrap();

    let mut stored = db.get_task(&task.id).unwrap().unwrap();
    let outcome = stored.complete(date("2025-04-10"));
    db.upsert_task(&stored).unwrap();
    let next = outcome.next.expect("recurrence should produce an instance");
    db.upsert_task(&next).unwrap();

    // The completed instance is retained as history alongside the new one.
    let tasks = db.list_tasks().unwrap();
    let instances: Vec<&TodoTask> = tasks.iter().filter(|t| t.name == "Water plants").collect();
    assert_eq!(instances.len(), 2);
    let pending = instances.iter().find(|t| !t.completed).unwrap();
    assert_eq!(pending.due_date, Some(date("2025-04-12")));
    assert_eq!(outcome.points, 5);
}

#[test]
fn habit_reconciliation_is_persisted_on_read() {
    let db = Database::open_memory().unwrap();
    seed::initialize_default_data(&db).unwrap();
    let today = date("2025-04-10");

    let mut habit = db.get_habit("Reading").unwrap().unwrap();
    habit.completed_dates.insert(date("2025-04-07"));
    habit.streak = 4;
    db.upsert_habit(&habit).unwrap();

    // The read path runs the passive pass and persists corrections.
    let mut habits = db.list_habits().unwrap();
    for habit in &mut habits {
        if habit.reconcile_streak(today) {
            db.upsert_habit(habit).unwrap();
        }
    }

    let reloaded = db.get_habit("Reading").unwrap().unwrap();
    assert_eq!(reloaded.streak, 0);
}

#[test]
fn backup_round_trip_after_mutations() {
    let db = Database::open_memory().unwrap();
    seed::initialize_default_data(&db).unwrap();

    let pools = RewardPools::default();
    let mut rng = Pcg64::seed_from_u64(23);
    let today = date("2025-04-10");

    // Mutate a bit of everything, including a non-deterministic reward
    // unlock embedded in the data being round-tripped.
    let mut skill = db.get_skill("art").unwrap().unwrap();
    skill.progress.points = 245;
    db.upsert_skill(&skill).unwrap();
    let mut skill = db.get_skill("art").unwrap().unwrap();
    let outcome = skill.log_drawing("Still life", None, &mut practice_ctx(today, true, &pools, &mut rng));
    assert!(outcome.leveled_up);
    assert_eq!(outcome.rewards_unlocked.len(), 1);
    db.upsert_skill(&skill).unwrap();

    let mut habit = db.get_habit("Exercise").unwrap().unwrap();
    habit.toggle(today);
    db.upsert_habit(&habit).unwrap();

    let before = backup::export_document(&db).unwrap();
    let json = serde_json::to_string_pretty(&before).unwrap();

    // Reset wipes everything back to defaults, restore brings the data back.
    seed::reset_all_data(&db).unwrap();
    assert_eq!(db.get_skill("art").unwrap().unwrap().progress.points, 0);

    backup::restore_json(&db, &json).unwrap();
    let after = backup::export_document(&db).unwrap();
    assert_eq!(after.skills, before.skills);
    assert_eq!(after.habits, before.habits);
    assert_eq!(after.todo_tasks, before.todo_tasks);
    assert_eq!(
        db.get_skill("art").unwrap().unwrap().progress.rewards_unlocked.len(),
        1
    );
}
