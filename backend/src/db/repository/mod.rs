//! Repository trait definitions for the storage collaborator.
//!
//! - [`error`]: Error types for repository operations
//! - [`lesson`]: Lessons and the groups they belong to
//! - [`person`]: Contact-directory records
//!
//! Services take a `&dyn FullRepository` per request; nothing in the service
//! layer holds a session or caches records between calls.

pub mod error;
pub mod lesson;
pub mod person;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use lesson::LessonRepository;
pub use person::PersonRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both repository traits.
pub trait FullRepository: LessonRepository + PersonRepository {}

impl<T> FullRepository for T where T: LessonRepository + PersonRepository {}
