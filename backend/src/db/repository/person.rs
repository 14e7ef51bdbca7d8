//! Contact-directory storage operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewPerson, Person, PersonId, PersonKey};

/// Repository trait for person records.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All persons in storage order (ascending id).
    async fn list_persons(&self) -> RepositoryResult<Vec<Person>>;

    /// First person whose `key` attribute equals `value`.
    ///
    /// For [`PersonKey::Id`] a value that is not an integer never matches.
    async fn get_person_by(&self, key: PersonKey, value: &str) -> RepositoryResult<Option<Person>>;

    /// Insert a new person; storage assigns the id.
    async fn insert_person(&self, person: &NewPerson) -> RepositoryResult<Person>;

    /// Replace every field of an existing person.
    ///
    /// # Returns
    /// * `Ok(Person)` - The stored record
    /// * `Err(RepositoryError::NotFound)` - If no person has this id
    async fn replace_person(&self, id: PersonId, person: &NewPerson) -> RepositoryResult<Person>;
}
