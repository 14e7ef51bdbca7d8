//! Write-side payload validation.
//!
//! Lesson and person payloads arrive as untyped JSON objects. Each is checked
//! against a static field table (required key set and maximum length per
//! field) and only then converted into a typed record. Every write carries the
//! full key set; there are no partial updates.
//!
//! Lengths are counted in characters of the actual payload value. Keys that
//! are not in the table (such as a client-sent `id`) are ignored.

use serde_json::{Map, Value};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::models::{NewLesson, NewPerson, Weekday};

/// A field of a write payload with a declared maximum length.
pub trait PayloadField: Copy + 'static {
    /// Every field of the payload, in the order they are checked.
    const ALL: &'static [Self];

    /// Key of the field in the JSON payload.
    fn name(&self) -> &'static str;

    /// Maximum length in characters.
    fn max_len(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonField {
    Group,
    Day,
    EvenWeek,
    Subject,
    Type,
    TimeStart,
    TimeEnd,
    TeacherName,
    Room,
    Address,
    ZoomUrl,
}

impl PayloadField for LessonField {
    const ALL: &'static [Self] = &[
        LessonField::Group,
        LessonField::Day,
        LessonField::EvenWeek,
        LessonField::Subject,
        LessonField::Type,
        LessonField::TimeStart,
        LessonField::TimeEnd,
        LessonField::TeacherName,
        LessonField::Room,
        LessonField::Address,
        LessonField::ZoomUrl,
    ];

    fn name(&self) -> &'static str {
        match self {
            LessonField::Group => "group",
            LessonField::Day => "day",
            LessonField::EvenWeek => "even_week",
            LessonField::Subject => "subject",
            LessonField::Type => "type",
            LessonField::TimeStart => "time_start",
            LessonField::TimeEnd => "time_end",
            LessonField::TeacherName => "teacher_name",
            LessonField::Room => "room",
            LessonField::Address => "address",
            LessonField::ZoomUrl => "zoom_url",
        }
    }

    fn max_len(&self) -> usize {
        match self {
            LessonField::Group => 6,
            LessonField::Day => 16,
            LessonField::EvenWeek => 1,
            LessonField::Subject => 64,
            LessonField::Type => 32,
            LessonField::TimeStart => 5,
            LessonField::TimeEnd => 5,
            LessonField::TeacherName => 128,
            LessonField::Room => 32,
            LessonField::Address => 512,
            LessonField::ZoomUrl => 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Fio,
    Gender,
    Phone,
    Email,
    Work,
    Education,
}

impl PayloadField for PersonField {
    const ALL: &'static [Self] = &[
        PersonField::Fio,
        PersonField::Gender,
        PersonField::Phone,
        PersonField::Email,
        PersonField::Work,
        PersonField::Education,
    ];

    fn name(&self) -> &'static str {
        match self {
            PersonField::Fio => "fio",
            PersonField::Gender => "gender",
            PersonField::Phone => "phone",
            PersonField::Email => "email",
            PersonField::Work => "work",
            PersonField::Education => "education",
        }
    }

    fn max_len(&self) -> usize {
        match self {
            PersonField::Fio => 256,
            PersonField::Gender => 6,
            PersonField::Phone => 32,
            PersonField::Email => 256,
            PersonField::Work => 512,
            PersonField::Education => 512,
        }
    }
}

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Payload must be a JSON object")]
    NotAnObject,

    #[error("Field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("Field '{field}' exceeds the maximum length of {max} characters ({actual} given)")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Field 'day' must be a weekday name, got '{value}'")]
    InvalidDay { value: String },

    #[error("Email '{email}' is not valid: {reason}")]
    InvalidEmail { email: String, reason: &'static str },
}

impl ValidationError {
    /// Whether the payload was structurally malformed rather than semantically invalid.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ValidationError::NotAnObject | ValidationError::InvalidType { .. }
        )
    }
}

/// A payload whose key set and field lengths have been checked.
struct CheckedPayload<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> CheckedPayload<'a> {
    fn check<F: PayloadField>(payload: &'a Value) -> Result<Self, ValidationError> {
        let fields = payload.as_object().ok_or(ValidationError::NotAnObject)?;

        if let Some(missing) = F::ALL.iter().find(|f| !fields.contains_key(f.name())) {
            return Err(ValidationError::MissingField {
                field: missing.name(),
            });
        }

        for field in F::ALL {
            let actual = value_len(&fields[field.name()]);
            if actual > field.max_len() {
                return Err(ValidationError::FieldTooLong {
                    field: field.name(),
                    max: field.max_len(),
                    actual,
                });
            }
        }

        Ok(Self { fields })
    }

    fn string<F: PayloadField>(&self, field: F) -> Result<String, ValidationError> {
        match &self.fields[field.name()] {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ValidationError::InvalidType {
                field: field.name(),
                expected: "a string",
            }),
        }
    }

    fn flag<F: PayloadField>(&self, field: F) -> Result<bool, ValidationError> {
        let invalid = || ValidationError::InvalidType {
            field: field.name(),
            expected: "a boolean, 0 or 1",
        };
        match &self.fields[field.name()] {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(invalid()),
            },
            Value::String(s) => match s.as_str() {
                "0" => Ok(false),
                "1" => Ok(true),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}

/// Length of a payload value as it would be stored.
fn value_len(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        // Flags are stored as a single digit.
        Value::Bool(_) => 1,
        Value::Null => 0,
        other => other.to_string().chars().count(),
    }
}

/// Validate a lesson payload and build the record to store.
///
/// `day` is lower-cased and must name a canonical weekday; every other field
/// is kept verbatim.
pub fn validate_lesson(payload: &Value) -> Result<NewLesson, ValidationError> {
    let checked = CheckedPayload::check::<LessonField>(payload)?;

    let raw_day = checked.string(LessonField::Day)?;
    let day = Weekday::from_name(&raw_day.to_lowercase())
        .ok_or(ValidationError::InvalidDay { value: raw_day })?;

    Ok(NewLesson {
        group: checked.string(LessonField::Group)?,
        day,
        even_week: checked.flag(LessonField::EvenWeek)?,
        subject: checked.string(LessonField::Subject)?,
        lesson_type: checked.string(LessonField::Type)?,
        time_start: checked.string(LessonField::TimeStart)?,
        time_end: checked.string(LessonField::TimeEnd)?,
        teacher_name: checked.string(LessonField::TeacherName)?,
        room: checked.string(LessonField::Room)?,
        address: checked.string(LessonField::Address)?,
        zoom_url: checked.string(LessonField::ZoomUrl)?,
    })
}

/// Validate a person payload and build the record to store.
pub fn validate_person(payload: &Value) -> Result<NewPerson, ValidationError> {
    let checked = CheckedPayload::check::<PersonField>(payload)?;

    let email = checked.string(PersonField::Email)?;
    validate_email(&email)?;

    Ok(NewPerson {
        fio: checked.string(PersonField::Fio)?,
        gender: checked.string(PersonField::Gender)?,
        phone: checked.string(PersonField::Phone)?,
        email,
        work: checked.string(PersonField::Work)?,
        education: checked.string(PersonField::Education)?,
    })
}

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Syntactic address check following the RFC 5321 mailbox rules.
///
/// The local part is a dot-string or a quoted string. The domain is a
/// hostname of one or more labels, or an address literal such as
/// `[192.0.2.1]` or `[IPv6:2001:db8::1]`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &'static str| ValidationError::InvalidEmail {
        email: email.to_string(),
        reason,
    };

    if email.len() > MAX_EMAIL_LEN {
        return Err(invalid("address is too long"));
    }

    // A quoted local part may itself contain '@'.
    let (local, domain) = email
        .rsplit_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() {
        return Err(invalid("empty local part"));
    }
    if local.len() > MAX_LOCAL_PART_LEN {
        return Err(invalid("local part is too long"));
    }
    if !is_dot_string(local) && !is_quoted_string(local) {
        return Err(invalid("malformed local part"));
    }

    if domain.is_empty() {
        return Err(invalid("empty domain"));
    }
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        return if is_address_literal(literal) {
            Ok(())
        } else {
            Err(invalid("malformed address literal"))
        };
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(invalid("domain is too long"));
    }
    if !domain.split('.').all(is_hostname_label) {
        return Err(invalid("malformed domain"));
    }

    Ok(())
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_dot_string(s: &str) -> bool {
    s.split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_quoted_string(s: &str) -> bool {
    let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return false;
    };
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(' '..='~') => {}
                _ => return false,
            },
            '"' => return false,
            ' '..='~' => {}
            _ => return false,
        }
    }
    true
}

fn is_address_literal(literal: &str) -> bool {
    match literal.strip_prefix("IPv6:") {
        Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
        None => literal.parse::<Ipv4Addr>().is_ok(),
    }
}

fn is_hostname_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
