//! Recurrence rule model and parsing
//!
//! A rule string looks like `"<frequency> [<num>/<denom>] [<restrictor>]"`,
//! e.g. `"weekly 1/2 mon,wed"`. The second token is only treated as an
//! expander when it contains a `/`; otherwise it is reinterpreted as the
//! restrictor and the expander defaults to `1/1`.
//!
//! Restrictor *content* is frequency-specific and date-dependent (the
//! monthly `last` keyword resolves against the reference date), so it is
//! validated at evaluation time, not here.

use std::fmt;
use std::str::FromStr;

use crate::error::WhipError;

/// The repeating unit a rule is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

impl FromStr for Frequency {
    type Err = WhipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(WhipError::InvalidFrequency(s.to_string())),
        }
    }
}

/// A parsed recurrence rule
///
/// Invariant: `1 <= numerator <= denominator`. The `numerator/denominator`
/// pair (the expander) makes the rule fire on one fixed cycle out of every
/// `denominator`, anchored to a fixed epoch so the cadence is stable across
/// runs. The restrictor narrows which dates within a cycle count and its
/// meaning depends on the frequency:
/// - weekly: three-letter weekday abbreviations (`mon,wed`)
/// - monthly: two-digit days of month, or `last` (`01,15` / `last`)
/// - yearly: `MM-DD` pairs (`12-25`)
/// - daily: no restrictor allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub numerator: u32,
    pub denominator: u32,
    pub restrictor: Vec<String>,
}

impl FromStr for RecurrenceRule {
    type Err = WhipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let frequency: Frequency = tokens
            .next()
            .ok_or_else(|| WhipError::InvalidFrequency(String::new()))?
            .parse()?;

        let mut expander = tokens.next();
        let mut restrictor = tokens.next();

        // "weekly mon" -- the second token is the restrictor, not an expander
        if let Some(tok) = expander
            && !tok.contains('/')
        {
            restrictor = expander;
            expander = None;
        }

        let (numerator, denominator) = match expander {
            Some(tok) => parse_expander(tok)?,
            None => (1, 1),
        };

        if numerator > denominator {
            return Err(WhipError::ExpanderOutOfRange {
                numerator,
                denominator,
            });
        }

        let restrictor = match restrictor {
            Some(list) => list.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        };

        Ok(RecurrenceRule {
            frequency,
            numerator,
            denominator,
            restrictor,
        })
    }
}

/// Split and validate a `num/denom` expander token
///
/// Both halves must parse as positive integers. A zero denominator would
/// divide by zero in the cadence check and a zero numerator can never match
/// `(diff % denom) + 1`, so both are rejected here.
fn parse_expander(tok: &str) -> Result<(u32, u32), WhipError> {
    let malformed = || WhipError::MalformedExpander(tok.to_string());

    let (num, denom) = tok.split_once('/').ok_or_else(malformed)?;
    let num: u32 = num.parse().map_err(|_| malformed())?;
    let denom: u32 = denom.parse().map_err(|_| malformed())?;

    if num == 0 || denom == 0 {
        return Err(malformed());
    }

    Ok((num, denom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_frequency() {
        let rule: RecurrenceRule = "daily".parse().unwrap();
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!((rule.numerator, rule.denominator), (1, 1));
        assert!(rule.restrictor.is_empty());
    }

    #[test]
    fn parses_full_rule() {
        let rule: RecurrenceRule = "weekly 1/2 mon,wed".parse().unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!((rule.numerator, rule.denominator), (1, 2));
        assert_eq!(rule.restrictor, vec!["mon", "wed"]);
    }

    #[test]
    fn second_token_without_slash_is_the_restrictor() {
        let rule: RecurrenceRule = "monthly 01,last".parse().unwrap();
        assert_eq!((rule.numerator, rule.denominator), (1, 1));
        assert_eq!(rule.restrictor, vec!["01", "last"]);
    }

    #[test]
    fn rejects_unknown_frequency() {
        let err = "fortnightly".parse::<RecurrenceRule>().unwrap_err();
        assert!(matches!(err, WhipError::InvalidFrequency(f) if f == "fortnightly"));
    }

    #[test]
    fn rejects_non_integer_expander() {
        let err = "daily abc/2".parse::<RecurrenceRule>().unwrap_err();
        assert!(matches!(err, WhipError::MalformedExpander(_)));
    }

    #[test]
    fn rejects_zero_expander_halves() {
        assert!(matches!(
            "daily 1/0".parse::<RecurrenceRule>().unwrap_err(),
            WhipError::MalformedExpander(_)
        ));
        assert!(matches!(
            "daily 0/2".parse::<RecurrenceRule>().unwrap_err(),
            WhipError::MalformedExpander(_)
        ));
    }

    #[test]
    fn rejects_numerator_above_denominator() {
        let err = "daily 3/2".parse::<RecurrenceRule>().unwrap_err();
        assert!(matches!(
            err,
            WhipError::ExpanderOutOfRange {
                numerator: 3,
                denominator: 2
            }
        ));
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let rule: RecurrenceRule = "  weekly   2/3   fri  ".parse().unwrap();
        assert_eq!((rule.numerator, rule.denominator), (2, 3));
        assert_eq!(rule.restrictor, vec!["fri"]);
    }

    #[test]
    fn restrictor_content_is_not_validated_at_parse_time() {
        // Content checks are date-dependent (monthly "last"), so parsing
        // accepts anything list-shaped.
        let rule: RecurrenceRule = "weekly someday".parse().unwrap();
        assert_eq!(rule.restrictor, vec!["someday"]);
    }
}
