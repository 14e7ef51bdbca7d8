#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use serde_json::{json, Value};
use timetable_api::db::repositories::LocalRepository;
use timetable_api::models::{NewLesson, Weekday};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to the process
/// environment, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Every repository-selection variable unset.
pub const CLEAN_REPOSITORY_ENV: &[(&str, Option<&str>)] = &[
    ("REPOSITORY_TYPE", None),
    ("REPOSITORY_CONFIG", None),
    ("DATABASE_URL", None),
    ("PG_DATABASE_URL", None),
];

pub fn new_lesson(group: &str, day: Weekday, even_week: bool, subject: &str) -> NewLesson {
    NewLesson {
        group: group.to_string(),
        day,
        even_week,
        subject: subject.to_string(),
        lesson_type: "lecture".to_string(),
        time_start: "09:00".to_string(),
        time_end: "10:30".to_string(),
        teacher_name: "Ivanova A.A.".to_string(),
        room: "A-101".to_string(),
        address: "Main st. 1".to_string(),
        zoom_url: "https://zoom.us/j/1".to_string(),
    }
}

/// Repository with two groups of lessons and one registered empty group.
///
/// | id | group | day       | even_week | subject    |
/// |----|-------|-----------|-----------|------------|
/// | 1  | IT-01 | monday    | true      | Algebra    |
/// | 2  | IT-01 | monday    | true      | Physics    |
/// | 3  | IT-01 | wednesday | false     | History    |
/// | 4  | IT-01 | friday    | true      | Networks   |
/// | 5  | IT-02 | tuesday   | false     | Databases  |
///
/// `EMPTY` is registered but has no lessons.
pub fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.insert_lesson_impl(new_lesson("IT-01", Weekday::Monday, true, "Algebra"));
    repo.insert_lesson_impl(new_lesson("IT-01", Weekday::Monday, true, "Physics"));
    repo.insert_lesson_impl(new_lesson("IT-01", Weekday::Wednesday, false, "History"));
    repo.insert_lesson_impl(new_lesson("IT-01", Weekday::Friday, true, "Networks"));
    repo.insert_lesson_impl(new_lesson("IT-02", Weekday::Tuesday, false, "Databases"));
    repo.register_group_impl("EMPTY");
    repo
}

pub fn lesson_payload() -> Value {
    json!({
        "group": "IT-01",
        "day": "Thursday",
        "even_week": 0,
        "subject": "Compilers",
        "type": "seminar",
        "time_start": "13:00",
        "time_end": "14:30",
        "teacher_name": "Petrov P.P.",
        "room": "B-204",
        "address": "Main st. 1",
        "zoom_url": ""
    })
}

pub fn person_payload(email: &str) -> Value {
    json!({
        "fio": "Smirnova Olga Petrovna",
        "gender": "female",
        "phone": "+7 900 000-00-00",
        "email": email,
        "work": "Department of Mathematics",
        "education": "PhD"
    })
}
