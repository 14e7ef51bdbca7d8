//! Lesson and group storage operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Group, Lesson, LessonId, NewLesson};

/// Repository trait for lessons and groups.
///
/// List operations return records in storage order (ascending id).
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Check if the storage backend is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All lessons of all groups.
    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>>;

    /// Lessons whose group equals `group` exactly.
    async fn list_lessons_by_group(&self, group: &str) -> RepositoryResult<Vec<Lesson>>;

    /// A single lesson, `Ok(None)` if the id does not exist.
    async fn get_lesson(&self, id: LessonId) -> RepositoryResult<Option<Lesson>>;

    /// Replace every field of an existing lesson.
    ///
    /// # Returns
    /// * `Ok(Lesson)` - The stored record
    /// * `Err(RepositoryError::NotFound)` - If no lesson has this id
    ///
    /// On any error the previous record is left unchanged.
    async fn replace_lesson(&self, id: LessonId, lesson: &NewLesson) -> RepositoryResult<Lesson>;

    /// Explicitly registered groups, ordered by name.
    async fn list_groups(&self) -> RepositoryResult<Vec<Group>>;

    /// Register a group. Registering an existing name is a no-op.
    async fn register_group(&self, name: &str) -> RepositoryResult<Group>;
}
