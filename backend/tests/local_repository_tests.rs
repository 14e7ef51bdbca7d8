//! In-memory repository behaviour shared with the Postgres backend.

mod support;

use timetable_api::db::repositories::LocalRepository;
use timetable_api::db::repository::{LessonRepository, PersonRepository};
use timetable_api::models::{PersonKey, Weekday};

#[tokio::test]
async fn test_lists_are_in_ascending_id_order() {
    let repo = support::seeded_repo();
    let ids: Vec<i64> = repo
        .list_lessons()
        .await
        .unwrap()
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let it01: Vec<i64> = repo
        .list_lessons_by_group("IT-01")
        .await
        .unwrap()
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(it01, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_register_group_is_idempotent() {
    let repo = LocalRepository::new();
    repo.register_group("IT-03").await.unwrap();
    repo.register_group("IT-03").await.unwrap();
    repo.register_group("AB-01").await.unwrap();

    let names: Vec<String> = repo
        .list_groups()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["AB-01", "IT-03"]);
}

#[tokio::test]
async fn test_replace_lesson_keeps_id() {
    let repo = support::seeded_repo();
    let replacement = support::new_lesson("IT-02", Weekday::Sunday, false, "Ethics");
    let stored = repo.replace_lesson(1, &replacement).await.unwrap();

    assert_eq!(stored.id, 1);
    assert_eq!(stored.to_new(), replacement);
    assert_eq!(repo.get_lesson(1).await.unwrap(), Some(stored));
    assert_eq!(repo.lesson_count(), 5);
}

#[tokio::test]
async fn test_first_matching_person_wins() {
    let repo = LocalRepository::new();
    let payload = timetable_api::services::validate_person(&support::person_payload("same@uni.edu"))
        .unwrap();
    let first = repo.insert_person(&payload).await.unwrap();
    repo.insert_person(&payload).await.unwrap();

    let found = repo
        .get_person_by(PersonKey::Email, "same@uni.edu")
        .await
        .unwrap();
    assert_eq!(found, Some(first));
}

#[tokio::test]
async fn test_clones_share_storage() {
    let repo = LocalRepository::new();
    let clone = repo.clone();
    clone.insert_lesson_impl(support::new_lesson("IT-01", Weekday::Monday, true, "Logic"));
    assert_eq!(repo.lesson_count(), 1);
}
