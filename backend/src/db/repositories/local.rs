//! In-memory local repository implementation.
//!
//! All data lives behind a single `RwLock`, so every write is applied as a
//! whole or not at all. Records are kept in ordered maps keyed by id, which
//! gives list operations the same ascending-id storage order as Postgres.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{
    Group, Lesson, LessonId, NewLesson, NewPerson, Person, PersonId, PersonKey,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use timetable_api::db::repositories::LocalRepository;
/// use timetable_api::db::repository::LessonRepository;
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = LocalRepository::new();
/// repo.register_group("IT-01").await.unwrap();
/// assert_eq!(repo.list_groups().await.unwrap().len(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    lessons: BTreeMap<LessonId, Lesson>,
    groups: BTreeSet<String>,
    persons: BTreeMap<PersonId, Person>,

    // ID counters
    next_lesson_id: LessonId,
    next_person_id: PersonId,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            lessons: BTreeMap::new(),
            groups: BTreeSet::new(),
            persons: BTreeMap::new(),
            next_lesson_id: 1,
            next_person_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Add a lesson to the repository.
    ///
    /// Lessons are loaded by external tooling in production; this helper seeds
    /// the in-memory store. The lesson's group is not registered implicitly.
    ///
    /// # Returns
    /// The stored lesson with its assigned id
    pub fn insert_lesson_impl(&self, lesson: NewLesson) -> Lesson {
        let mut data = self.data.write();
        let id = data.next_lesson_id;
        data.next_lesson_id += 1;
        let stored = lesson.with_id(id);
        data.lessons.insert(id, stored.clone());
        stored
    }

    /// Register a group without going through the async trait.
    pub fn register_group_impl(&self, name: &str) {
        self.data.write().groups.insert(name.to_string());
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of lessons stored.
    pub fn lesson_count(&self) -> usize {
        self.data.read().lessons.len()
    }

    /// Get the number of persons stored.
    pub fn person_count(&self) -> usize {
        self.data.read().persons.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LessonRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>> {
        self.check_health("list_lessons")?;
        Ok(self.data.read().lessons.values().cloned().collect())
    }

    async fn list_lessons_by_group(&self, group: &str) -> RepositoryResult<Vec<Lesson>> {
        self.check_health("list_lessons_by_group")?;
        Ok(self
            .data
            .read()
            .lessons
            .values()
            .filter(|l| l.group == group)
            .cloned()
            .collect())
    }

    async fn get_lesson(&self, id: LessonId) -> RepositoryResult<Option<Lesson>> {
        self.check_health("get_lesson")?;
        Ok(self.data.read().lessons.get(&id).cloned())
    }

    async fn replace_lesson(&self, id: LessonId, lesson: &NewLesson) -> RepositoryResult<Lesson> {
        self.check_health("replace_lesson")?;
        let mut data = self.data.write();
        let slot = data.lessons.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Lesson {} not found", id),
                ErrorContext::new("replace_lesson")
                    .with_entity("lesson")
                    .with_entity_id(id),
            )
        })?;
        *slot = lesson.clone().with_id(id);
        Ok(slot.clone())
    }

    async fn list_groups(&self) -> RepositoryResult<Vec<Group>> {
        self.check_health("list_groups")?;
        Ok(self.data.read().groups.iter().map(Group::new).collect())
    }

    async fn register_group(&self, name: &str) -> RepositoryResult<Group> {
        self.check_health("register_group")?;
        self.register_group_impl(name);
        Ok(Group::new(name))
    }
}

#[async_trait]
impl PersonRepository for LocalRepository {
    async fn list_persons(&self) -> RepositoryResult<Vec<Person>> {
        self.check_health("list_persons")?;
        Ok(self.data.read().persons.values().cloned().collect())
    }

    async fn get_person_by(&self, key: PersonKey, value: &str) -> RepositoryResult<Option<Person>> {
        self.check_health("get_person_by")?;
        let data = self.data.read();
        let found = match key {
            PersonKey::Id => value
                .parse::<PersonId>()
                .ok()
                .and_then(|id| data.persons.get(&id)),
            PersonKey::Email => data.persons.values().find(|p| p.email == value),
            PersonKey::Phone => data.persons.values().find(|p| p.phone == value),
        };
        Ok(found.cloned())
    }

    async fn insert_person(&self, person: &NewPerson) -> RepositoryResult<Person> {
        self.check_health("insert_person")?;
        let mut data = self.data.write();
        let id = data.next_person_id;
        data.next_person_id += 1;
        let stored = person.clone().with_id(id);
        data.persons.insert(id, stored.clone());
        Ok(stored)
    }

    async fn replace_person(&self, id: PersonId, person: &NewPerson) -> RepositoryResult<Person> {
        self.check_health("replace_person")?;
        let mut data = self.data.write();
        let slot = data.persons.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Person {} not found", id),
                ErrorContext::new("replace_person")
                    .with_entity("person")
                    .with_entity_id(id),
            )
        })?;
        *slot = person.clone().with_id(id);
        Ok(slot.clone())
    }
}
