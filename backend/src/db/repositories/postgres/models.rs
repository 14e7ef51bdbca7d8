use diesel::prelude::*;

use super::schema::{lessons, personalities};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Lesson, NewLesson, NewPerson, Person, Weekday};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LessonRow {
    pub id: i64,
    pub group_name: String,
    pub day: String,
    pub even_week: bool,
    pub subject: String,
    pub lesson_type: String,
    pub time_start: String,
    pub time_end: String,
    pub teacher_name: String,
    pub room: String,
    pub address: String,
    pub zoom_url: String,
}

impl TryFrom<LessonRow> for Lesson {
    type Error = RepositoryError;

    fn try_from(row: LessonRow) -> RepositoryResult<Self> {
        let day = Weekday::from_name(&row.day).ok_or_else(|| {
            RepositoryError::internal_with_context(
                format!("Stored day '{}' is not a weekday", row.day),
                ErrorContext::new("decode_lesson")
                    .with_entity("lesson")
                    .with_entity_id(row.id),
            )
        })?;

        Ok(Lesson {
            id: row.id,
            group: row.group_name,
            day,
            even_week: row.even_week,
            subject: row.subject,
            lesson_type: row.lesson_type,
            time_start: row.time_start,
            time_end: row.time_end,
            teacher_name: row.teacher_name,
            room: row.room,
            address: row.address,
            zoom_url: row.zoom_url,
        })
    }
}

/// Full replacement of a lesson row's columns.
#[derive(Debug, Clone, AsChangeset, Insertable)]
#[diesel(table_name = lessons)]
pub struct LessonChangeset<'a> {
    pub group_name: &'a str,
    pub day: &'a str,
    pub even_week: bool,
    pub subject: &'a str,
    pub lesson_type: &'a str,
    pub time_start: &'a str,
    pub time_end: &'a str,
    pub teacher_name: &'a str,
    pub room: &'a str,
    pub address: &'a str,
    pub zoom_url: &'a str,
}

impl<'a> From<&'a NewLesson> for LessonChangeset<'a> {
    fn from(lesson: &'a NewLesson) -> Self {
        Self {
            group_name: &lesson.group,
            day: lesson.day.as_str(),
            even_week: lesson.even_week,
            subject: &lesson.subject,
            lesson_type: &lesson.lesson_type,
            time_start: &lesson.time_start,
            time_end: &lesson.time_end,
            teacher_name: &lesson.teacher_name,
            room: &lesson.room,
            address: &lesson.address,
            zoom_url: &lesson.zoom_url,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = personalities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PersonRow {
    pub id: i64,
    pub fio: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub work: String,
    pub education: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: row.id,
            fio: row.fio,
            gender: row.gender,
            phone: row.phone,
            email: row.email,
            work: row.work,
            education: row.education,
        }
    }
}

/// Insert or full replacement of a person row's columns.
#[derive(Debug, Clone, AsChangeset, Insertable)]
#[diesel(table_name = personalities)]
pub struct PersonChangeset<'a> {
    pub fio: &'a str,
    pub gender: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub work: &'a str,
    pub education: &'a str,
}

impl<'a> From<&'a NewPerson> for PersonChangeset<'a> {
    fn from(person: &'a NewPerson) -> Self {
        Self {
            fio: &person.fio,
            gender: &person.gender,
            phone: &person.phone,
            email: &person.email,
            work: &person.work,
            education: &person.education,
        }
    }
}
