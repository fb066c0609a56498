//! Default data seeded into an empty store.

use crate::checkin::{CheckIn, CheckInSubcategory};
use crate::dissertation::{Dissertation, PlanPhases, PlanTask};
use crate::error::DatabaseError;
use crate::habit::{Frequency, Habit, HabitCategory};
use crate::skill::{Skill, SkillCatalog};
use crate::storage::Database;
use crate::todo::{Priority, TodoGroup, TodoTask};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new(
            "art",
            SkillCatalog {
                fundamentals: strings(&[
                    "Basic Mark Making - Line control exercises",
                    "Shape Accuracy - Drawing basic geometric forms",
                    "Proportion & Measurement techniques",
                    "Contour Drawing - Blind contour exercises",
                    "Texture Development - Various drawing techniques",
                    "Basic Volumes - Drawing 3D forms",
                    "Linear Perspective - One-point perspective",
                    "Linear Perspective - Two-point perspective",
                    "Foreshortening - Drawing objects in space",
                    "Value Scales - Creating value ranges",
                    "Basic Lighting - Core shadow, cast shadow",
                    "Rendering Techniques - Hatching methods",
                    "Rendering Techniques - Blending methods",
                    "Color Wheel - Primary and secondary colors",
                    "Color Mixing - Creating specific colors",
                    "Compositional Structures - Rule of thirds",
                    "Visual Flow - Leading the eye through artwork",
                    "Gesture Drawing - Capturing essence of pose",
                    "Structural Anatomy - Basic figure proportions",
                    "Master Studies - Copying works by artists",
                ]),
                sketchbook: strings(&[
                    "Free drawing",
                    "Still life",
                    "Landscape sketch",
                    "Character design",
                    "Animal sketches",
                    "Object studies",
                    "Urban sketching",
                    "Nature elements",
                    "Fantasy creatures",
                    "Portrait practice",
                ]),
                accountability: strings(&[
                    "Progress photo documentation",
                    "Create process video",
                    "Write about learning experience",
                    "Post progress on social media",
                    "Share before/after comparison",
                ]),
                ..SkillCatalog::default()
            },
        ),
        Skill::new(
            "korean",
            SkillCatalog {
                fundamentals: strings(&[
                    "Hangul basics - Consonants",
                    "Hangul basics - Vowels",
                    "Hangul basics - Final consonants",
                    "Hangul syllable structure practice",
                    "Basic greetings and introduction",
                    "Numbers and counting system",
                    "Basic verbs and conjugation",
                    "Basic nouns and particles",
                    "Question formation",
                    "Simple present tense",
                    "Simple past tense",
                    "Simple future tense",
                    "Basic adjectives and descriptors",
                    "Basic sentence structure",
                    "Pronouns and demonstratives",
                    "Time expressions",
                    "Location and direction words",
                    "Basic honorifics",
                    "Family terms vocabulary",
                    "Food and dining vocabulary",
                ]),
                immersion: strings(&[
                    "Watch K-drama (30 min)",
                    "Listen to K-pop songs",
                    "Watch Korean YouTube videos",
                    "Read Korean webtoons",
                    "Listen to Korean podcast",
                    "Watch Korean news",
                    "Watch Korean variety show",
                    "Listen to Korean audiobook",
                    "Follow Korean social media",
                    "Korean children's books",
                ]),
                application: strings(&[
                    "Write journal entry in Hangul",
                    "Practice conversation with language partner",
                    "Record yourself speaking Korean",
                    "Translate simple text to Korean",
                    "Label items in your home in Korean",
                    "Order at Korean restaurant in Korean",
                    "Describe your day in Korean",
                    "Write short story in Korean",
                    "Text chat with Korean speaker",
                    "Teach someone basic Korean phrases",
                ]),
                ..SkillCatalog::default()
            },
        ),
        Skill::new(
            "french",
            SkillCatalog {
                fundamentals: strings(&[
                    "Basic pronunciation - vowels",
                    "Basic pronunciation - consonants",
                    "Nasal sounds practice",
                    "Greetings and introductions",
                    "Numbers and counting",
                    "Present tense - regular verbs",
                    "Present tense - irregular verbs",
                    "Articles - definite and indefinite",
                    "Gender and agreement",
                    "Basic adjectives and placement",
                    "Question formation",
                    "Past tense - passé composé",
                    "Past tense - imparfait",
                    "Future tense - simple",
                    "Prepositions of place",
                    "Time expressions",
                    "Daily routine vocabulary",
                    "Food and dining vocabulary",
                    "Travel and directions",
                    "Body parts and health",
                ]),
                immersion: strings(&[
                    "Watch French film (30 min)",
                    "Listen to French music",
                    "Watch French YouTube videos",
                    "Read French news articles",
                    "Listen to French podcast",
                    "Watch French TV series",
                    "Listen to French radio",
                    "Read French comics/graphic novels",
                    "Follow French social media",
                    "French children's books",
                ]),
                application: strings(&[
                    "Write journal entry in French",
                    "Practice conversation with language partner",
                    "Record yourself speaking French",
                    "Translate simple text to French",
                    "Describe photos in French",
                    "Order at restaurant in French",
                    "Write shopping list in French",
                    "Text chat with French speaker",
                    "Teach someone basic French phrases",
                ]),
                ..SkillCatalog::default()
            },
        ),
    ]
}

pub fn default_dissertation() -> Dissertation {
    Dissertation::new(PlanPhases {
        preparation: vec![
            PlanTask::new("Literature review", "2025-03-27", "2025-08-31", 100),
            PlanTask::new("Methodology development", "2025-04-15", "2025-07-31", 80),
            PlanTask::new("Data collection and processing", "2025-05-01", "2025-07-31", 120),
            PlanTask::new("Writing theoretical chapter", "2025-06-01", "2025-10-15", 150),
        ],
        empirical: vec![
            PlanTask::new("Qualitative discourse analysis", "2025-08-01", "2026-01-15", 200),
            PlanTask::new("Writing qualitative results", "2026-01-16", "2026-03-31", 100),
            PlanTask::new("Topic modeling", "2026-01-16", "2026-05-31", 150),
            PlanTask::new("Writing quantitative results", "2026-06-01", "2026-08-31", 100),
        ],
        integration: vec![
            PlanTask::new("Finalizing methodology chapter", "2026-06-01", "2026-09-15", 80),
            PlanTask::new("Writing discussion and conclusion", "2026-09-01", "2027-01-15", 120),
            PlanTask::new("Revising introduction", "2027-01-16", "2027-02-28", 60),
        ],
        finalization: vec![
            PlanTask::new("Proofreading and revision", "2027-03-01", "2027-06-15", 100),
            PlanTask::new("Layout and formatting", "2027-06-16", "2027-08-15", 60),
            PlanTask::new("Corrections and printing", "2027-08-16", "2027-10-31", 40),
        ],
    })
}

pub fn default_habits() -> Vec<Habit> {
    vec![
        Habit::new("Early wakeup", "☀️", Frequency::Daily),
        Habit::new("Exercise", "🏃", Frequency::Daily),
        Habit::new("Reading", "📚", Frequency::Daily),
        Habit::new("Meditation", "🧘", Frequency::Daily),
        Habit::new("Drink water", "💧", Frequency::Daily),
        Habit::new("Learn Korean", "🇰🇷", Frequency::Interval { days: 2 }).custom("Learning"),
        Habit::new("Learn French", "🇫🇷", Frequency::Interval { days: 2 }).custom("Learning"),
        Habit::new("Clean", "🧹", Frequency::Weekly { days: vec![6] }).custom("Personal"),
        Habit::new("Do Laundry", "🧺", Frequency::Interval { days: 5 }).custom("Personal"),
        Habit::new("Water Plants", "🌱", Frequency::Interval { days: 10 }).custom("Personal"),
        Habit::new("Be Creative", "🎨", Frequency::Interval { days: 2 }).custom("Personal"),
    ]
}

pub fn default_habit_categories() -> Vec<HabitCategory> {
    let category = |name: &str, color: &str| HabitCategory {
        name: name.to_string(),
        color: color.to_string(),
    };
    vec![
        category("Health", "#4CAF50"),
        category("Learning", "#2196F3"),
        category("Personal", "#FF9800"),
        category("Work", "#9C27B0"),
    ]
}

pub fn default_check_ins() -> Vec<CheckIn> {
    vec![
        CheckIn::new(
            "Doctor Appointments",
            "🩺",
            vec![
                CheckInSubcategory::new("Dermatologist", Some(6)),
                CheckInSubcategory::new("Dentist", Some(6)),
                CheckInSubcategory::new("Gynecologist", Some(6)),
                CheckInSubcategory::new("GP", Some(6)),
            ],
        ),
        CheckIn::new(
            "Other Check-ins",
            "🗓️",
            vec![CheckInSubcategory::new("Eye Doctor", Some(12))],
        ),
    ]
}

pub fn default_todo_groups() -> Vec<TodoGroup> {
    let group = |name: &str, color: &str| TodoGroup {
        name: name.to_string(),
        color: color.to_string(),
    };
    vec![
        group("Work", "#9C27B0"),
        group("Personal", "#FF9800"),
        group("Shopping", "#795548"),
        group("Urgent", "#F44336"),
    ]
}

pub fn default_tasks() -> Vec<TodoTask> {
    vec![
        TodoTask::new("Prepare presentation", "Work", Priority::High),
        TodoTask::new("Grocery shopping", "Shopping", Priority::Medium),
        TodoTask::new("Call Mom", "Personal", Priority::Low),
    ]
}

/// Populate an empty store with the default data set. A store that already
/// has skills is left untouched.
pub fn initialize_default_data(db: &Database) -> Result<(), DatabaseError> {
    if !db.is_empty()? {
        return Ok(());
    }
    seed_defaults(db)
}

/// Unconditionally write the default data set (used after a reset).
pub fn seed_defaults(db: &Database) -> Result<(), DatabaseError> {
    db.insert_all_skills(&default_skills())?;
    db.upsert_dissertation(&default_dissertation())?;
    db.insert_all_habits(&default_habits())?;
    db.insert_all_habit_categories(&default_habit_categories())?;
    db.insert_all_check_ins(&default_check_ins())?;
    db.insert_all_todo_groups(&default_todo_groups())?;
    db.insert_all_tasks(&default_tasks())?;
    Ok(())
}

/// Delete everything and reseed, atomically.
pub fn reset_all_data(db: &Database) -> Result<(), DatabaseError> {
    db.in_transaction(|db| {
        db.delete_all_data()?;
        seed_defaults(db)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_is_seeded_once() {
        let db = Database::open_memory().unwrap();
        initialize_default_data(&db).unwrap();

        let skills = db.list_skills().unwrap();
        assert_eq!(skills.len(), 3);
        assert!(db.get_dissertation().unwrap().is_some());
        assert_eq!(db.list_habits().unwrap().len(), 11);
        assert_eq!(db.list_habit_categories().unwrap().len(), 4);
        assert_eq!(db.list_check_ins().unwrap().len(), 2);
        assert_eq!(db.list_todo_groups().unwrap().len(), 4);
        assert_eq!(db.list_tasks().unwrap().len(), 3);

        // Second call is a no-op: no duplicated tasks.
        let task_count = db.list_tasks().unwrap().len();
        initialize_default_data(&db).unwrap();
        assert_eq!(db.list_tasks().unwrap().len(), task_count);
    }

    #[test]
    fn seeded_skills_carry_catalogs() {
        let skills = default_skills();
        let art = skills.iter().find(|s| s.name == "art").unwrap();
        assert_eq!(art.catalog.fundamentals.len(), 20);
        assert_eq!(art.catalog.sketchbook.len(), 10);
        assert!(art.catalog.immersion.is_empty());

        let korean = skills.iter().find(|s| s.name == "korean").unwrap();
        assert_eq!(korean.catalog.immersion.len(), 10);
        assert!(korean.catalog.sketchbook.is_empty());
    }

    #[test]
    fn reset_reseeds_defaults() {
        let db = Database::open_memory().unwrap();
        initialize_default_data(&db).unwrap();

        // Mutate, then reset.
        let mut skill = db.get_skill("art").unwrap().unwrap();
        skill.progress.points = 999;
        db.upsert_skill(&skill).unwrap();

        reset_all_data(&db).unwrap();
        let art = db.get_skill("art").unwrap().unwrap();
        assert_eq!(art.progress.points, 0);
        assert_eq!(db.list_habits().unwrap().len(), 11);
    }
}
