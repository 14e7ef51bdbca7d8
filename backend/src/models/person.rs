use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Person identifier (storage primary key).
pub type PersonId = i64;

/// A contact-directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub fio: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub work: String,
    pub education: String,
}

/// A validated person payload without identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub fio: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub work: String,
    pub education: String,
}

impl NewPerson {
    pub fn with_id(self, id: PersonId) -> Person {
        Person {
            id,
            fio: self.fio,
            gender: self.gender,
            phone: self.phone,
            email: self.email,
            work: self.work,
            education: self.education,
        }
    }
}

/// Attribute a person can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonKey {
    Id,
    Email,
    Phone,
}

impl PersonKey {
    pub const ALL: [PersonKey; 3] = [PersonKey::Id, PersonKey::Email, PersonKey::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKey::Id => "id",
            PersonKey::Email => "email",
            PersonKey::Phone => "phone",
        }
    }

    /// Comma separated list of accepted attribute names, for error messages.
    pub fn accepted() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for PersonKey {
    type Err = String;

    /// Attribute names are matched exactly (`id`, `email`, `phone`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(format!(
                "Attribute {} not found. Use one of [{}]",
                s,
                Self::accepted()
            )),
        }
    }
}

impl fmt::Display for PersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
