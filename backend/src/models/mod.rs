//! Domain records of the timetable service.
//!
//! - [`calendar`]: weekday and week-parity value types shared by every layer
//! - [`lesson`]: lesson records and their write-side counterpart
//! - [`person`]: contact-directory ("personalities") records
//! - [`group`]: study groups referenced by lessons

pub mod calendar;
pub mod group;
pub mod lesson;
pub mod person;

pub use calendar::*;
pub use group::*;
pub use lesson::*;
pub use person::*;
