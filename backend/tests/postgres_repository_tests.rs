//! Postgres backend against a live database.
//!
//! Runs only with `--features postgres-repo` and `DATABASE_URL` set; the
//! database is migrated and then used with fresh rows per test.

#![cfg(feature = "postgres-repo")]

use timetable_api::db::repository::{LessonRepository, PersonRepository};
use timetable_api::db::{PostgresConfig, PostgresRepository};
use timetable_api::models::{NewPerson, PersonKey};

fn repository() -> Option<PostgresRepository> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(PostgresRepository::new(PostgresConfig::with_url(url)).expect("connect and migrate"))
}

fn person(email: &str) -> NewPerson {
    NewPerson {
        fio: "Integration Test".to_string(),
        gender: "male".to_string(),
        phone: "000".to_string(),
        email: email.to_string(),
        work: "QA".to_string(),
        education: "none".to_string(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let Some(repo) = repository() else { return };
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_person_insert_lookup_replace() {
    let Some(repo) = repository() else { return };
    let email = format!("pg-{}@example.org", std::process::id());

    let stored = repo.insert_person(&person(&email)).await.unwrap();
    let found = repo
        .get_person_by(PersonKey::Email, &email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, stored.id);

    let mut changed = person(&email);
    changed.work = "Ops".to_string();
    let replaced = repo.replace_person(stored.id, &changed).await.unwrap();
    assert_eq!(replaced.work, "Ops");

    assert!(repo
        .get_person_by(PersonKey::Id, "not-a-number")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_replace_missing_rows_is_not_found() {
    let Some(repo) = repository() else { return };
    let err = repo
        .replace_person(i64::MAX, &person("nobody@example.org"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_register_group_twice() {
    let Some(repo) = repository() else { return };
    repo.register_group("PG-01").await.unwrap();
    repo.register_group("PG-01").await.unwrap();
    let groups = repo.list_groups().await.unwrap();
    assert_eq!(groups.iter().filter(|g| g.name == "PG-01").count(), 1);
}
