//! Schedule partitioning.
//!
//! Lessons are grouped into the nested response shape
//! `group -> week parity -> weekday -> [lesson]`. Aggregate views start from a
//! fully populated skeleton so every selected parity and weekday is present as
//! a key even when its list is empty. Within a bucket lessons keep the order in
//! which they were supplied (storage order); nothing is re-sorted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Lesson, WeekParity, Weekday};

/// Lessons of one parity, by weekday.
pub type DaySchedule = BTreeMap<Weekday, Vec<Lesson>>;

/// Lessons of one group, by parity then weekday.
pub type GroupSchedule = BTreeMap<WeekParity, DaySchedule>;

/// Narrowing applied to a group's schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub week: Option<WeekParity>,
    pub day: Option<Weekday>,
}

impl ScheduleFilter {
    /// No narrowing: both parities, all weekdays.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn week(week: WeekParity) -> Self {
        Self {
            week: Some(week),
            day: None,
        }
    }

    pub fn week_day(week: WeekParity, day: Weekday) -> Self {
        Self {
            week: Some(week),
            day: Some(day),
        }
    }

    pub fn matches(&self, lesson: &Lesson) -> bool {
        self.week.map_or(true, |w| w == lesson.parity())
            && self.day.map_or(true, |d| d == lesson.day)
    }

    fn parities(&self) -> Vec<WeekParity> {
        match self.week {
            Some(week) => vec![week],
            None => WeekParity::ALL.to_vec(),
        }
    }

    fn days(&self) -> Vec<Weekday> {
        match self.day {
            Some(day) => vec![day],
            None => Weekday::ALL.to_vec(),
        }
    }

    /// Empty buckets for every parity and weekday this filter selects.
    pub fn skeleton(&self) -> GroupSchedule {
        let days = self.days();
        self.parities()
            .into_iter()
            .map(|parity| {
                let buckets = days.iter().map(|day| (*day, Vec::new())).collect();
                (parity, buckets)
            })
            .collect()
    }
}

/// A partitioned schedule keyed by group name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleView(BTreeMap<String, GroupSchedule>);

impl ScheduleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn group(&self, name: &str) -> Option<&GroupSchedule> {
        self.0.get(name)
    }

    /// Lessons in one bucket, if the bucket exists.
    pub fn bucket(&self, group: &str, parity: WeekParity, day: Weekday) -> Option<&[Lesson]> {
        self.0
            .get(group)
            .and_then(|g| g.get(&parity))
            .and_then(|d| d.get(&day))
            .map(Vec::as_slice)
    }

    /// Total number of lessons across all buckets.
    pub fn lesson_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|g| g.values())
            .flat_map(|d| d.values())
            .map(Vec::len)
            .sum()
    }

    pub fn into_inner(self) -> BTreeMap<String, GroupSchedule> {
        self.0
    }

    fn insert_skeleton(&mut self, group: &str, filter: &ScheduleFilter) {
        self.0
            .entry(group.to_string())
            .or_insert_with(|| filter.skeleton());
    }

    /// Append a lesson to its bucket, creating missing keys along the way.
    fn place(&mut self, lesson: Lesson) {
        self.0
            .entry(lesson.group.clone())
            .or_default()
            .entry(lesson.parity())
            .or_default()
            .entry(lesson.day)
            .or_default()
            .push(lesson);
    }
}

/// Every known group with both parities and all weekdays.
///
/// `groups` are the registered group names; groups referenced only by lessons
/// are added as well. Groups without lessons keep their empty skeleton.
pub fn partition_all<I, S>(groups: I, lessons: Vec<Lesson>) -> ScheduleView
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let filter = ScheduleFilter::all();
    let mut view = ScheduleView::new();
    for group in groups {
        view.insert_skeleton(group.as_ref(), &filter);
    }
    for lesson in lessons {
        view.insert_skeleton(&lesson.group, &filter);
        view.place(lesson);
    }
    view
}

/// One group's schedule narrowed by `filter`.
///
/// Lessons of other groups and lessons outside the filter are dropped.
pub fn partition_group(group: &str, lessons: Vec<Lesson>, filter: &ScheduleFilter) -> ScheduleView {
    let mut view = ScheduleView::new();
    view.insert_skeleton(group, filter);
    for lesson in lessons
        .into_iter()
        .filter(|l| l.group == group && filter.matches(l))
    {
        view.place(lesson);
    }
    view
}

/// A single lesson in its own group/parity/day bucket, without a skeleton.
pub fn single_lesson(lesson: Lesson) -> ScheduleView {
    let mut view = ScheduleView::new();
    view.place(lesson);
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: i64, group: &str, day: Weekday, even_week: bool) -> Lesson {
        Lesson {
            id,
            group: group.to_string(),
            day,
            even_week,
            subject: format!("subject-{id}"),
            lesson_type: "lecture".to_string(),
            time_start: "09:00".to_string(),
            time_end: "10:30".to_string(),
            teacher_name: "Teacher".to_string(),
            room: "101".to_string(),
            address: "Main st. 1".to_string(),
            zoom_url: String::new(),
        }
    }

    #[test]
    fn test_skeleton_shapes() {
        let full = ScheduleFilter::all().skeleton();
        assert_eq!(full.len(), 2);
        assert!(full.values().all(|days| days.len() == 7));

        let narrow = ScheduleFilter::week_day(WeekParity::Odd, Weekday::Friday).skeleton();
        assert_eq!(narrow.len(), 1);
        assert_eq!(narrow[&WeekParity::Odd].len(), 1);
        assert!(narrow[&WeekParity::Odd].contains_key(&Weekday::Friday));
    }

    #[test]
    fn test_partition_all_keeps_empty_groups() {
        let view = partition_all(["IT-01", "IT-02"], vec![lesson(1, "IT-01", Weekday::Monday, true)]);
        let empty = view.group("IT-02").unwrap();
        assert_eq!(empty.len(), 2);
        assert!(empty.values().flat_map(|d| d.values()).all(Vec::is_empty));
        assert_eq!(view.lesson_count(), 1);
    }

    #[test]
    fn test_partition_all_adds_unregistered_lesson_groups() {
        let view = partition_all(Vec::<String>::new(), vec![lesson(1, "XX-09", Weekday::Sunday, false)]);
        assert_eq!(view.groups().collect::<Vec<_>>(), vec!["XX-09"]);
        assert_eq!(view.group("XX-09").unwrap()[&WeekParity::Even].len(), 7);
        assert_eq!(
            view.bucket("XX-09", WeekParity::Odd, Weekday::Sunday).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_bucket_preserves_input_order() {
        let lessons = vec![
            lesson(5, "IT-01", Weekday::Tuesday, false),
            lesson(2, "IT-01", Weekday::Tuesday, false),
            lesson(9, "IT-01", Weekday::Tuesday, false),
        ];
        let view = partition_group("IT-01", lessons, &ScheduleFilter::all());
        let ids: Vec<i64> = view
            .bucket("IT-01", WeekParity::Odd, Weekday::Tuesday)
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_partition_group_applies_filter() {
        let lessons = vec![
            lesson(1, "IT-01", Weekday::Monday, true),
            lesson(2, "IT-01", Weekday::Monday, false),
            lesson(3, "IT-01", Weekday::Friday, true),
            lesson(4, "IT-02", Weekday::Monday, true),
        ];
        let view = partition_group("IT-01", lessons, &ScheduleFilter::week(WeekParity::Even));
        let group = view.group("IT-01").unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group[&WeekParity::Even].len(), 7);
        assert_eq!(view.lesson_count(), 2);
        assert!(view.group("IT-02").is_none());
    }

    #[test]
    fn test_single_lesson_has_one_bucket() {
        let view = single_lesson(lesson(7, "IT-03", Weekday::Saturday, true));
        let group = view.group("IT-03").unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group[&WeekParity::Even].len(), 1);
        assert_eq!(view.lesson_count(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let view = single_lesson(lesson(7, "IT-03", Weekday::Saturday, false));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["IT-03"]["odd_week"]["saturday"][0]["id"], 7);
        assert_eq!(json["IT-03"]["odd_week"]["saturday"][0]["type"], "lecture");
        assert_eq!(json["IT-03"]["odd_week"]["saturday"][0]["even_week"], false);
    }

    #[test]
    fn test_weekday_keys_serialize_in_canonical_order() {
        let view = partition_all(["IT-01"], Vec::new());
        let json = serde_json::to_string(&view).unwrap();
        let monday = json.find("\"monday\"").unwrap();
        let tuesday = json.find("\"tuesday\"").unwrap();
        let sunday = json.find("\"sunday\"").unwrap();
        assert!(monday < tuesday && tuesday < sunday);
        assert!(json.find("even_week").unwrap() < json.find("odd_week").unwrap());
    }
}
