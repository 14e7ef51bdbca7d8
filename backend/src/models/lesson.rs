use serde::{Deserialize, Serialize};

use super::calendar::{WeekParity, Weekday};

/// Lesson identifier (storage primary key).
pub type LessonId = i64;

/// A stored lesson, also the per-lesson view inside schedule responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub group: String,
    pub day: Weekday,
    pub even_week: bool,
    pub subject: String,
    #[serde(rename = "type")]
    pub lesson_type: String,
    pub time_start: String,
    pub time_end: String,
    pub teacher_name: String,
    pub room: String,
    pub address: String,
    pub zoom_url: String,
}

impl Lesson {
    pub fn parity(&self) -> WeekParity {
        WeekParity::from_even_week(self.even_week)
    }

    /// The replaceable part of this lesson.
    pub fn to_new(&self) -> NewLesson {
        NewLesson {
            group: self.group.clone(),
            day: self.day,
            even_week: self.even_week,
            subject: self.subject.clone(),
            lesson_type: self.lesson_type.clone(),
            time_start: self.time_start.clone(),
            time_end: self.time_end.clone(),
            teacher_name: self.teacher_name.clone(),
            room: self.room.clone(),
            address: self.address.clone(),
            zoom_url: self.zoom_url.clone(),
        }
    }
}

/// A validated lesson payload without identity. Writes always carry the full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLesson {
    pub group: String,
    pub day: Weekday,
    pub even_week: bool,
    pub subject: String,
    #[serde(rename = "type")]
    pub lesson_type: String,
    pub time_start: String,
    pub time_end: String,
    pub teacher_name: String,
    pub room: String,
    pub address: String,
    pub zoom_url: String,
}

impl NewLesson {
    pub fn with_id(self, id: LessonId) -> Lesson {
        Lesson {
            id,
            group: self.group,
            day: self.day,
            even_week: self.even_week,
            subject: self.subject,
            lesson_type: self.lesson_type,
            time_start: self.time_start,
            time_end: self.time_end,
            teacher_name: self.teacher_name,
            room: self.room,
            address: self.address,
            zoom_url: self.zoom_url,
        }
    }
}
