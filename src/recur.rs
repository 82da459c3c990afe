//! Recurrence evaluation
//!
//! Decides whether a rule fires on a given reference date. Two stages:
//! the frequency-specific restrictor filter (a mismatch is a normal "not
//! today", never an error), then the epoch-anchored expander cadence.
//!
//! The cadence counts whole units elapsed between the reference date and a
//! fixed epoch: 1970-01-01 for days, months and years, and 1970-01-05 (the
//! first Monday after the Unix epoch) for weeks, so week numbers align with
//! Monday boundaries. `(diff % denom) + 1 == num` then selects one fixed
//! cycle out of every `denom`. Anchoring to the reference date rather than
//! the wall clock keeps a future-dated generation consistent with what the
//! same rule says on the day itself.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::WhipError;
use crate::rule::{Frequency, RecurrenceRule};

/// 1970-01-01, the anchor for day, month and year counting
fn unit_epoch() -> NaiveDate {
    NaiveDate::default()
}

/// 1970-01-05, the anchor for week counting
fn week_epoch() -> NaiveDate {
    NaiveDate::default() + Days::new(4)
}

/// Evaluate a parsed rule against a reference date
///
/// Returns `Ok(false)` when the date falls outside the restrictor or off
/// the expander cadence. Errors mean the rule itself is broken and the run
/// should abort.
pub fn fires(rule: &RecurrenceRule, date: NaiveDate) -> Result<bool, WhipError> {
    let diff = match rule.frequency {
        Frequency::Daily => {
            if !rule.restrictor.is_empty() {
                return Err(WhipError::UnexpectedRestrictor {
                    frequency: rule.frequency,
                    restrictor: rule.restrictor.join(","),
                });
            }
            (date - unit_epoch()).num_days()
        }

        Frequency::Weekly => {
            let days = require_restrictor(rule)?;
            if let Some(bad) = days.iter().find(|d| weekday_from_abbrev(d).is_none()) {
                return Err(invalid_restrictor(rule, format!("unknown weekday '{bad}'")));
            }
            let today = weekday_abbrev(date.weekday());
            if !days.iter().any(|d| d == today) {
                return Ok(false);
            }
            (date - week_epoch()).num_days().div_euclid(7)
        }

        Frequency::Monthly => {
            let days = require_restrictor(rule)?;
            // "last" resolves against the reference date's month
            let last = format!("{:02}", last_day_of_month(date));
            let resolved: Vec<&str> = days
                .iter()
                .map(|d| if d == "last" { last.as_str() } else { d.as_str() })
                .collect();
            if let Some(bad) = resolved.iter().find(|d| !is_day_of_month(d)) {
                return Err(invalid_restrictor(
                    rule,
                    format!("'{bad}' is not a two-digit day of month (01-31) or 'last'"),
                ));
            }
            let today = format!("{:02}", date.day());
            if !resolved.contains(&today.as_str()) {
                return Ok(false);
            }
            months_since_epoch(date)
        }

        Frequency::Yearly => {
            let dates = require_restrictor(rule)?;
            if let Some(bad) = dates.iter().find(|d| !is_month_day(d)) {
                return Err(invalid_restrictor(
                    rule,
                    format!("'{bad}' does not match MM-DD"),
                ));
            }
            let today = format!("{:02}-{:02}", date.month(), date.day());
            if !dates.iter().any(|d| *d == today) {
                return Ok(false);
            }
            i64::from(date.year()) - 1970
        }
    };

    let modulus = diff.rem_euclid(i64::from(rule.denominator)) + 1;
    Ok(modulus == i64::from(rule.numerator))
}

fn require_restrictor(rule: &RecurrenceRule) -> Result<&[String], WhipError> {
    if rule.restrictor.is_empty() {
        return Err(invalid_restrictor(rule, "a restrictor is required".into()));
    }
    Ok(&rule.restrictor)
}

fn invalid_restrictor(rule: &RecurrenceRule, detail: String) -> WhipError {
    WhipError::InvalidRestrictor {
        frequency: rule.frequency,
        detail,
    }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sun",
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
    }
}

fn weekday_from_abbrev(abbrev: &str) -> Option<Weekday> {
    match abbrev {
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Two ASCII digits in 01..=31
fn is_day_of_month(s: &str) -> bool {
    s.len() == 2
        && s.bytes().all(|b| b.is_ascii_digit())
        && matches!(s.parse::<u32>(), Ok(1..=31))
}

/// MM-DD shape check
fn is_month_day(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && bytes[2] == b'-'
        && [0usize, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

fn last_day_of_month(date: NaiveDate) -> u32 {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Whole months between 1970-01-01 and `date`; exact because the epoch is
/// the first of a month
fn months_since_epoch(date: NaiveDate) -> i64 {
    i64::from(date.year() - 1970) * 12 + i64::from(date.month0())
}
