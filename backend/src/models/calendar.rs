use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week a lesson takes place on.
///
/// The declaration order is the canonical order (monday first), so ordered
/// maps keyed by `Weekday` iterate and serialize monday..sunday.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Case-insensitive lookup by full canonical name. Abbreviations are not accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(name))
    }

    /// Lookup by 1-based position in the canonical list (1 = monday).
    pub fn from_position(position: u32) -> Option<Self> {
        match position {
            1..=7 => Some(Self::ALL[(position - 1) as usize]),
            _ => None,
        }
    }

    /// 1-based position in the canonical list.
    pub fn position(&self) -> u32 {
        *self as u32 + 1
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which calendar weeks a lesson recurs on.
///
/// Serialized as the response bucket key (`"even_week"` / `"odd_week"`).
/// `Even` is declared first so ordered maps list the even bucket first.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WeekParity {
    #[serde(rename = "even_week")]
    Even,
    #[serde(rename = "odd_week")]
    Odd,
}

impl WeekParity {
    pub const ALL: [WeekParity; 2] = [WeekParity::Even, WeekParity::Odd];

    /// Parity of a stored `even_week` flag.
    pub fn from_even_week(even_week: bool) -> Self {
        if even_week {
            WeekParity::Even
        } else {
            WeekParity::Odd
        }
    }

    /// Parity of an absolute week index: 2 -> even, 1 and 7 -> odd.
    pub fn of_week_number(week: u32) -> Self {
        Self::from_even_week(week % 2 == 0)
    }

    pub fn is_even(&self) -> bool {
        matches!(self, WeekParity::Even)
    }

    /// Response bucket key.
    pub fn key(&self) -> &'static str {
        match self {
            WeekParity::Even => "even_week",
            WeekParity::Odd => "odd_week",
        }
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_positions_are_one_based() {
        assert_eq!(Weekday::from_position(1), Some(Weekday::Monday));
        assert_eq!(Weekday::from_position(7), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_position(0), None);
        assert_eq!(Weekday::from_position(8), None);
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_position(day.position()), Some(day));
        }
    }

    #[test]
    fn test_weekday_from_name_ignores_case_only() {
        assert_eq!(Weekday::from_name("FRIDAY"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_name("fri"), None);
        assert_eq!(Weekday::from_name(""), None);
    }

    #[test]
    fn test_weekday_serializes_lowercase() {
        let json = serde_json::to_string(&Weekday::Thursday).unwrap();
        assert_eq!(json, "\"thursday\"");
    }

    #[test]
    fn test_week_parity_keys() {
        assert_eq!(
            serde_json::to_string(&WeekParity::Even).unwrap(),
            "\"even_week\""
        );
        assert_eq!(WeekParity::Odd.key(), "odd_week");
        assert!(WeekParity::Even < WeekParity::Odd);
    }

    #[test]
    fn test_parity_of_week_number() {
        assert_eq!(WeekParity::of_week_number(1), WeekParity::Odd);
        assert_eq!(WeekParity::of_week_number(2), WeekParity::Even);
        assert_eq!(WeekParity::of_week_number(7), WeekParity::Odd);
    }
}
