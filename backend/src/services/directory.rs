//! Contact-directory ("personalities") operations.

use log::warn;
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::{ServiceError, ServiceResult};
use super::validation::validate_person;
use crate::db::repository::FullRepository;
use crate::models::{Person, PersonId, PersonKey};

/// Persons keyed by id, as presented to clients.
pub type PersonIndex = BTreeMap<PersonId, Person>;

fn index(persons: impl IntoIterator<Item = Person>) -> PersonIndex {
    persons.into_iter().map(|p| (p.id, p)).collect()
}

pub async fn list_persons(repo: &dyn FullRepository) -> ServiceResult<PersonIndex> {
    Ok(index(repo.list_persons().await?))
}

/// Look a person up by one of the attributes `id`, `email` or `phone`.
///
/// An unknown attribute is NotFound; a non-numeric id is Malformed.
pub async fn find_person(
    repo: &dyn FullRepository,
    key: &str,
    value: &str,
) -> ServiceResult<PersonIndex> {
    let key: PersonKey = key.parse().map_err(ServiceError::NotFound)?;

    if key == PersonKey::Id && value.parse::<PersonId>().is_err() {
        return Err(ServiceError::Malformed(format!(
            "Person id must be an integer, got '{}'",
            value
        )));
    }

    match repo.get_person_by(key, value).await? {
        Some(person) => Ok(index([person])),
        None => Err(ServiceError::not_found("Person not found")),
    }
}

/// Validate `payload` and store it as a new person.
pub async fn create_person(repo: &dyn FullRepository, payload: &Value) -> ServiceResult<Person> {
    let person = validate_person(payload).map_err(|e| {
        warn!("Rejected person payload: {}", e);
        e
    })?;
    Ok(repo.insert_person(&person).await?)
}

/// Validate `payload` and replace every field of person `id` with it.
pub async fn replace_person(
    repo: &dyn FullRepository,
    id: PersonId,
    payload: &Value,
) -> ServiceResult<Person> {
    let person = validate_person(payload).map_err(|e| {
        warn!("Rejected person payload for id {}: {}", id, e);
        e
    })?;

    repo.replace_person(id, &person).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::not_found(format!("Person with id = {} not found", id))
        } else {
            ServiceError::from(e)
        }
    })
}
