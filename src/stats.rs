//! Completion stats export
//!
//! Walks a date range of daily logs and produces a CSV with one row per day
//! and one column per scheduled task, labeled `group-task`. Days without a
//! log (or without a front-matter block) produce empty cells; a log that
//! exists but fails to decode aborts the export.

use anyhow::Result;
use chrono::{Days, NaiveDate};

use crate::daily_log;
use crate::schedule::TaskGroup;

/// Render the completion CSV for `[from, to)`
///
/// `format` is the strftime pattern mapping a date to its log path, the
/// same pattern `generate` writes with.
pub fn collect(groups: &[TaskGroup], from: NaiveDate, to: NaiveDate, format: &str) -> Result<String> {
    let labels: Vec<(&str, &str)> = groups
        .iter()
        .flat_map(|group| {
            group
                .subs
                .iter()
                .map(|task| (group.name.as_str(), task.name.as_str()))
        })
        .collect();

    let mut lines = Vec::new();
    let mut head = vec!["date".to_string()];
    head.extend(labels.iter().map(|(group, task)| format!("{group}-{task}")));
    lines.push(head.join(","));

    let mut day = from;
    while day < to {
        let path = day.format(format).to_string();
        let data = daily_log::read(&path)?;

        let mut row = vec![day.format("%Y-%m-%d").to_string()];
        for (group, task) in &labels {
            let value = data
                .as_ref()
                .and_then(|header| header.get(*group))
                .and_then(|tasks| tasks.get(*task))
                .map(|completion| completion.as_text())
                .unwrap_or_default();
            row.push(csv_field(&value));
        }
        lines.push(row.join(","));

        day = day + Days::new(1);
    }

    Ok(lines.join("\n"))
}

/// Non-empty values are quoted; embedded quotes are doubled
fn csv_field(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("\"{}\"", value.replace('"', "\"\""))
    }
}
