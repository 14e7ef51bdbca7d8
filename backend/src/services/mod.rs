//! Service layer.
//!
//! - `selector`: week and day token parsing
//! - `partition`: the nested `group -> parity -> weekday` response shape
//! - `validation`: lesson and person payload checks
//! - `schedule` / `directory`: the query façade over the storage collaborator

pub mod directory;
pub mod error;
pub mod partition;
pub mod schedule;
pub mod selector;
pub mod validation;

pub use error::{ServiceError, ServiceResult};
pub use partition::{DaySchedule, GroupSchedule, ScheduleFilter, ScheduleView};
pub use selector::{parse_day, parse_week, SelectorError, SelectorField};
pub use validation::{validate_email, validate_lesson, validate_person, ValidationError};
