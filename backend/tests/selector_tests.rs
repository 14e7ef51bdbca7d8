//! Week and day selector parsing.

use proptest::prelude::*;
use timetable_api::models::{WeekParity, Weekday};
use timetable_api::services::selector::{parse_day, parse_week, SelectorError, SelectorField};

#[test]
fn test_week_tokens_from_reference_table() {
    assert_eq!(parse_week("EVEN"), Ok(WeekParity::Even));
    assert_eq!(parse_week("odd"), Ok(WeekParity::Odd));
    assert_eq!(parse_week("3"), Ok(WeekParity::Odd));
    assert_eq!(parse_week("4"), Ok(WeekParity::Even));
    assert!(matches!(
        parse_week("8"),
        Err(SelectorError::OutOfRange {
            field: SelectorField::Week,
            ..
        })
    ));
    assert!(matches!(
        parse_week("abc"),
        Err(SelectorError::Unrecognized {
            field: SelectorField::Week,
            ..
        })
    ));
}

#[test]
fn test_day_tokens_from_reference_table() {
    assert_eq!(parse_day("Monday"), Ok(Weekday::Monday));
    assert_eq!(parse_day("3"), Ok(Weekday::Wednesday));
    assert!(parse_day("8").is_err());
    assert!(parse_day("sun").is_err());
}

#[test]
fn test_leading_zero_is_still_numeric() {
    assert_eq!(parse_week("04"), Ok(WeekParity::Even));
    assert_eq!(parse_day("01"), Ok(Weekday::Monday));
}

#[test]
fn test_every_weekday_name_round_trips() {
    for (position, day) in Weekday::ALL.iter().enumerate() {
        assert_eq!(parse_day(day.as_str()), Ok(*day));
        assert_eq!(parse_day(&day.as_str().to_uppercase()), Ok(*day));
        assert_eq!(parse_day(&(position + 1).to_string()), Ok(*day));
    }
}

proptest! {
    #[test]
    fn prop_week_number_parity_selects_bucket(week in 1u32..=7) {
        let expected = if week % 2 == 0 { WeekParity::Even } else { WeekParity::Odd };
        prop_assert_eq!(parse_week(&week.to_string()), Ok(expected));
    }

    #[test]
    fn prop_numbers_above_seven_are_rejected(n in 8u64..) {
        prop_assert!(parse_week(&n.to_string()).is_err());
        prop_assert!(parse_day(&n.to_string()).is_err());
    }

    #[test]
    fn prop_week_symbols_ignore_case(mask in proptest::collection::vec(any::<bool>(), 4)) {
        let even: String = "even"
            .chars()
            .zip(&mask)
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(parse_week(&even), Ok(WeekParity::Even));
    }

    #[test]
    fn prop_alphabetic_noise_is_rejected(token in "[a-z]{1,12}") {
        prop_assume!(token != "even" && token != "odd");
        prop_assert!(parse_week(&token).is_err());
        if Weekday::from_name(&token).is_none() {
            prop_assert!(parse_day(&token).is_err());
        }
    }

    #[test]
    fn prop_errors_keep_the_raw_token(token in "[0-9a-z]{1,10}") {
        if let Err(err) = parse_day(&token) {
            prop_assert_eq!(err.token(), token.as_str());
            prop_assert_eq!(err.field(), SelectorField::Day);
        }
    }
}
