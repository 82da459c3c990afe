//! Schedule definition and checklist materialization
//!
//! A schedule file is an ordered YAML sequence of task groups:
//!
//! ```yaml
//! - name: Chores
//!   subs:
//!     - name: Dishes
//!       when: daily
//!     - name: Vacuum
//!       when: weekly sat
//! ```
//!
//! Rules stay raw strings on disk and in memory; they are parsed fresh on
//! every evaluation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::daily_log::{Completion, Header};
use crate::error::WhipError;
use crate::recur;
use crate::rule::RecurrenceRule;

/// A single scheduled task: display name plus its raw recurrence rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub when: String,
}

/// An ordered group of tasks, as written in the schedule file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskGroup {
    pub name: String,
    pub subs: Vec<Task>,
}

/// Load a schedule definition from a YAML file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<TaskGroup>> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("schedule file {} does not exist", path.display());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schedule file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse schedule file {}", path.display()))
}

/// Build today's checklist header
///
/// Every task whose rule fires on `date` gets an empty entry, in schedule
/// order. Then, when a prior day's header is given, every prior entry whose
/// completion is falsy is carried over too: overdue tasks persist until
/// marked done, regardless of their recurrence rule. Groups appear in the
/// order they are first touched.
///
/// Any rule that fails to parse or evaluate aborts the whole run; a
/// partially evaluated checklist is worse than none.
pub fn materialize(
    groups: &[TaskGroup],
    date: NaiveDate,
    prior: Option<&Header>,
) -> Result<Header, WhipError> {
    let mut header = Header::new();

    for group in groups {
        for task in &group.subs {
            let rule: RecurrenceRule = task.when.parse()?;
            if recur::fires(&rule, date)? {
                header
                    .entry(group.name.clone())
                    .or_default()
                    .insert(task.name.clone(), Completion::pending());
            }
        }
    }

    if let Some(prior) = prior {
        for (group_name, tasks) in prior {
            for (task_name, completion) in tasks {
                if !completion.is_done() {
                    header
                        .entry(group_name.clone())
                        .or_default()
                        .insert(task_name.clone(), Completion::pending());
                }
            }
        }
    }

    Ok(header)
}
