//! whip - recurring daily checklist generator
//!
//! whip turns a declarative YAML schedule into a daily checklist file and
//! tracks completion over time. Each task carries a compact recurrence rule
//! (`"weekly 1/2 mon,wed"`); the evaluator decides which tasks appear on a
//! given date, unfinished tasks from the previous day carry over until they
//! are marked done, and checklists are stored as front-matter-delimited
//! text files with free-form notes after the structured block.
//!
//! # Architecture
//!
//! - `rule`: recurrence rule model and rule-string parsing
//! - `recur`: the recurrence evaluator (restrictor filters + epoch-anchored
//!   cadence)
//! - `daily_log`: codec for the front-matter log format
//! - `schedule`: schedule definition and checklist materialization
//! - `config`: persisted CLI configuration
//! - `stats`: completion CSV export
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use whip::rule::RecurrenceRule;
//!
//! let rule: RecurrenceRule = "weekly mon,wed".parse().unwrap();
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! assert!(whip::recur::fires(&rule, monday).unwrap());
//! ```

pub mod config;
pub mod daily_log;
pub mod error;
pub mod recur;
pub mod rule;
pub mod schedule;
pub mod stats;

use chrono::{Local, NaiveDate};

pub use config::Config;
pub use daily_log::{Completion, Header};
pub use error::WhipError;
pub use rule::{Frequency, RecurrenceRule};
pub use schedule::{Task, TaskGroup};

/// Get the current date in the local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}
