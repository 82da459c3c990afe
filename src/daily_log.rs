//! Daily log codec
//!
//! A daily log file carries one front-matter block delimited by `---` lines,
//! holding a YAML `group -> task -> completion` mapping, followed by
//! free-form notes that are never parsed:
//!
//! ```text
//! ---
//! Chores:
//!   Dishes: ''
//!   Vacuum: done
//! ---
//!
//! # Monday Notes:
//!
//! -
//! ```
//!
//! Both maps are insertion-ordered so a decode/encode round trip and the
//! carry-over scan keep their key order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::WhipError;

/// The structured head of a daily log: group name -> task name -> completion
pub type Header = IndexMap<String, IndexMap<String, Completion>>;

/// A task's completion value, an opaque YAML scalar
///
/// Anything a user writes next to a task counts as done except the values
/// that read as "nothing happened": null, `false`, `0`, the empty string and
/// the YAML 1.1 spellings `no` and `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Completion(serde_yaml::Value);

impl Completion {
    /// The empty value a freshly generated checklist entry starts with
    pub fn pending() -> Self {
        Completion(serde_yaml::Value::String(String::new()))
    }

    pub fn is_done(&self) -> bool {
        match &self.0 {
            serde_yaml::Value::Null => false,
            serde_yaml::Value::Bool(b) => *b,
            serde_yaml::Value::Number(n) => n.as_f64() != Some(0.0),
            serde_yaml::Value::String(s) => !(s.is_empty() || s == "no" || s == "false"),
            _ => true,
        }
    }

    /// Render the value for display or CSV export
    pub fn as_text(&self) -> String {
        match &self.0 {
            serde_yaml::Value::Null => String::new(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for Completion {
    fn from(s: &str) -> Self {
        Completion(serde_yaml::Value::String(s.to_string()))
    }
}

impl From<serde_yaml::Value> for Completion {
    fn from(value: serde_yaml::Value) -> Self {
        Completion(value)
    }
}

/// Extract and deserialize the front-matter block of a log
///
/// Scans line by line, toggling an inside-block flag on lines that trim to
/// exactly `---`, and stops at the closing delimiter; trailing notes are
/// ignored. Returns `Ok(None)` when no complete block exists. A block that
/// fails to deserialize is a hard [`WhipError::MalformedLog`].
pub fn decode(text: &str) -> Result<Option<Header>, WhipError> {
    let mut raw = String::new();
    let mut in_block = false;

    for line in text.lines() {
        if line.trim() == "---" {
            if in_block {
                if raw.trim().is_empty() {
                    return Ok(Some(Header::new()));
                }
                let header = serde_yaml::from_str(&raw).map_err(WhipError::MalformedLog)?;
                return Ok(Some(header));
            }
            in_block = true;
            continue;
        }
        if in_block {
            raw.push_str(line);
            raw.push('\n');
        }
    }

    Ok(None)
}

/// Serialize a header into a complete daily log
///
/// The notes section is titled with the reference date's weekday name and
/// seeded with one empty bullet as a writing prompt.
pub fn encode(header: &Header, date: NaiveDate) -> Result<String> {
    let body = serde_yaml::to_string(header).context("failed to serialize log header")?;
    Ok(format!(
        "---\n{body}---\n\n# {} Notes:\n\n- ",
        date.format("%A")
    ))
}

/// Read and decode a log file
///
/// A missing file is not an error: it decodes as "no data", the same as a
/// file without a front-matter block.
pub fn read(path: impl AsRef<Path>) -> Result<Option<Header>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read log file {}", path.display()))?;
    decode(&text).with_context(|| format!("failed to decode log file {}", path.display()))
}

/// Write an encoded log, creating parent directories as needed
pub fn write(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
