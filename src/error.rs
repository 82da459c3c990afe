//! Error types for whip
//!
//! Rule-syntax and rule-evaluation errors indicate a broken schedule
//! definition and abort the whole run; a partially evaluated checklist is
//! worse than none. The one deliberate non-error is a missing prior-day log,
//! which decodes as "no data" to support first runs.

use thiserror::Error;

use crate::rule::Frequency;

/// Errors raised while parsing or evaluating recurrence rules and while
/// decoding daily log files.
#[derive(Error, Debug)]
pub enum WhipError {
    /// The first token of a rule string is not a recognized frequency
    #[error("unrecognized frequency '{0}' (expected daily, weekly, monthly or yearly)")]
    InvalidFrequency(String),

    /// The expander token is not `num/denom` with both positive integers
    #[error("expander '{0}' must be num/denom, where both num and denom are positive integers")]
    MalformedExpander(String),

    /// An expander whose numerator exceeds its denominator would never fire
    #[error("expander numerator ({numerator}) > denominator ({denominator}), which will never happen")]
    ExpanderOutOfRange { numerator: u32, denominator: u32 },

    /// The restrictor does not match the shape the frequency expects,
    /// including an empty restrictor where one is required
    #[error("invalid restrictor for a {frequency} rule: {detail}")]
    InvalidRestrictor { frequency: Frequency, detail: String },

    /// A restrictor was given for a frequency that does not take one
    #[error("a {frequency} rule takes no restrictor (got '{restrictor}')")]
    UnexpectedRestrictor {
        frequency: Frequency,
        restrictor: String,
    },

    /// The front-matter block of an existing log file failed to deserialize
    #[error("malformed log front matter: {0}")]
    MalformedLog(#[source] serde_yaml::Error),
}
