//! Rule parsing and evaluation behavior across the public API

use chrono::NaiveDate;
use whip::error::WhipError;
use whip::recur;
use whip::rule::RecurrenceRule;

/// Parse a rule string and evaluate it against a date, like the schedule
/// materializer does for every task
fn actual(when: &str, date: NaiveDate) -> Result<bool, WhipError> {
    let rule: RecurrenceRule = when.parse()?;
    recur::fires(&rule, date)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn daily_is_true_for_every_date() {
    for day in [
        date(1970, 1, 1),
        date(1999, 12, 31),
        date(2024, 2, 29),
        date(2031, 6, 9),
    ] {
        assert!(actual("daily", day).unwrap(), "{day}");
    }
}

#[test]
fn weekly_follows_the_weekday_set() {
    // 2024-01-01 through 2024-01-07 is Monday through Sunday
    let expected = [true, false, true, false, false, false, false];
    for (offset, fires) in expected.into_iter().enumerate() {
        let day = date(2024, 1, 1 + offset as u32);
        assert_eq!(actual("weekly mon,wed", day).unwrap(), fires, "{day}");
    }
}

#[test]
fn monthly_last_is_true_exactly_on_month_ends() {
    let month_ends = [
        date(2024, 1, 31),
        date(2024, 2, 29), // leap year
        date(2023, 2, 28),
        date(2024, 4, 30),
        date(2024, 12, 31),
    ];
    for day in month_ends {
        assert!(actual("monthly last", day).unwrap(), "{day}");
        if let Some(before) = day.pred_opt() {
            assert!(!actual("monthly last", before).unwrap(), "day before {day}");
        }
    }
}

#[test]
fn yearly_is_independent_of_the_year() {
    for year in [1970, 2000, 2023, 2024, 2087] {
        assert!(actual("yearly 12-25", date(year, 12, 25)).unwrap());
        assert!(!actual("yearly 12-25", date(year, 12, 24)).unwrap());
    }
}

#[test]
fn expander_fires_once_per_cycle_at_a_stable_offset() {
    // Scan six consecutive weeks of Mondays with a 1/3 rule: exactly one
    // Monday out of every three fires, always at the same offset.
    let mut firing_offsets = Vec::new();
    for cycle in 0..2 {
        for offset in 0..3u64 {
            let day = date(2024, 1, 1) + chrono::Days::new((cycle * 3 + offset) * 7);
            if actual("weekly 1/3 mon", day).unwrap() {
                firing_offsets.push(offset);
            }
        }
    }
    assert_eq!(firing_offsets.len(), 2);
    assert_eq!(firing_offsets[0], firing_offsets[1]);
}

#[test]
fn repeated_evaluation_is_stable() {
    let day = date(2024, 5, 17);
    let first = actual("daily 3/7", day).unwrap();
    for _ in 0..10 {
        assert_eq!(actual("daily 3/7", day).unwrap(), first);
    }
}

#[test]
fn error_taxonomy_matches_the_failure() {
    let day = date(2024, 1, 1);
    assert!(matches!(
        actual("daily abc/2", day).unwrap_err(),
        WhipError::MalformedExpander(_)
    ));
    assert!(matches!(
        actual("daily 3/2", day).unwrap_err(),
        WhipError::ExpanderOutOfRange { .. }
    ));
    assert!(matches!(
        actual("monthly 1/1 40", day).unwrap_err(),
        WhipError::InvalidRestrictor { .. }
    ));
    assert!(matches!(
        actual("daily mon", day).unwrap_err(),
        WhipError::UnexpectedRestrictor { .. }
    ));
    assert!(matches!(
        actual("hourly", day).unwrap_err(),
        WhipError::InvalidFrequency(_)
    ));
}

#[test]
fn restrictor_mismatch_is_not_an_error() {
    // A valid rule that simply does not fire today returns Ok(false).
    let tuesday = date(2024, 1, 2);
    assert_eq!(actual("weekly mon", tuesday).unwrap(), false);
    assert_eq!(actual("monthly 01", tuesday).unwrap(), false);
    assert_eq!(actual("yearly 12-25", tuesday).unwrap(), false);
}
