//! Schedule queries and lesson replacement.
//!
//! Every operation takes the storage handle for the current request and reads
//! the collection afresh; nothing is cached between calls. Selector tokens are
//! parsed before storage is touched, so an invalid token never costs a query.

use log::{debug, warn};
use serde_json::Value;

use super::error::{ServiceError, ServiceResult};
use super::partition::{
    partition_all, partition_group, single_lesson, ScheduleFilter, ScheduleView,
};
use super::selector::{parse_day, parse_week};
use super::validation::validate_lesson;
use crate::db::repository::FullRepository;
use crate::models::{Lesson, LessonId};

/// Group codes are stored upper-case; lookups are case-insensitive.
pub fn normalize_group(group: &str) -> String {
    group.to_uppercase()
}

/// Every known group with its full two-parity, seven-day skeleton.
pub async fn all_schedules(repo: &dyn FullRepository) -> ServiceResult<ScheduleView> {
    let groups = repo.list_groups().await?;
    let lessons = repo.list_lessons().await?;
    debug!(
        "all_schedules: {} registered groups, {} lessons",
        groups.len(),
        lessons.len()
    );
    Ok(partition_all(groups.iter().map(|g| g.name.as_str()), lessons))
}

/// A single lesson placed in its own group/parity/day bucket.
pub async fn schedule_by_lesson_id(
    repo: &dyn FullRepository,
    id: LessonId,
) -> ServiceResult<ScheduleView> {
    match repo.get_lesson(id).await? {
        Some(lesson) => Ok(single_lesson(lesson)),
        None => Err(ServiceError::not_found(format!(
            "Lesson with id = {} not found",
            id
        ))),
    }
}

/// One group's full schedule. NotFound when the group has no lessons.
pub async fn schedule_for_group(
    repo: &dyn FullRepository,
    group: &str,
) -> ServiceResult<ScheduleView> {
    let group = normalize_group(group);
    let lessons = repo.list_lessons_by_group(&group).await?;
    debug!("schedule_for_group({}): {} lessons", group, lessons.len());

    if lessons.is_empty() {
        return Err(ServiceError::not_found(format!(
            "No lessons found for group {}",
            group
        )));
    }
    Ok(partition_group(&group, lessons, &ScheduleFilter::all()))
}

/// One group's schedule for one week parity.
///
/// All seven weekdays are present even when the parity has no lessons.
pub async fn schedule_for_week(
    repo: &dyn FullRepository,
    group: &str,
    week: &str,
) -> ServiceResult<ScheduleView> {
    let parity = parse_week(week)?;
    let group = normalize_group(group);
    let lessons = repo.list_lessons_by_group(&group).await?;
    debug!(
        "schedule_for_week({}, {}): {} candidate lessons",
        group,
        parity,
        lessons.len()
    );
    Ok(partition_group(&group, lessons, &ScheduleFilter::week(parity)))
}

/// One group's lessons on a single day of one week parity.
///
/// NotFound when no lesson falls on that day, even if the parity has lessons
/// on other days.
pub async fn schedule_for_day(
    repo: &dyn FullRepository,
    group: &str,
    week: &str,
    day: &str,
) -> ServiceResult<ScheduleView> {
    let parity = parse_week(week)?;
    let day = parse_day(day)?;
    let group = normalize_group(group);

    let lessons = repo.list_lessons_by_group(&group).await?;
    let view = partition_group(&group, lessons, &ScheduleFilter::week_day(parity, day));
    debug!(
        "schedule_for_day({}, {}, {}): {} lessons",
        group,
        parity,
        day,
        view.lesson_count()
    );

    if view.lesson_count() == 0 {
        return Err(ServiceError::not_found(format!(
            "No lessons found for group {} on {} ({})",
            group, day, parity
        )));
    }
    Ok(view)
}

/// Validate `payload` and replace every field of lesson `id` with it.
///
/// Nothing is written when validation fails or the lesson does not exist.
pub async fn replace_lesson(
    repo: &dyn FullRepository,
    id: LessonId,
    payload: &Value,
) -> ServiceResult<Lesson> {
    let lesson = validate_lesson(payload).map_err(|e| {
        warn!("Rejected lesson payload for id {}: {}", id, e);
        e
    })?;

    repo.replace_lesson(id, &lesson).await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::not_found(format!("Lesson with id = {} not found", id))
        } else {
            ServiceError::from(e)
        }
    })
}
