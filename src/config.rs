//! Persisted CLI configuration
//!
//! A small TOML file (default `~/.whip.toml`) holding defaults for the
//! flags people set once and forget: the schedule file, the log path
//! format, and the carry-over / auto-open toggles. Command-line flags
//! always win over config values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schedule definition file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// strftime pattern producing the daily log path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Carry unfinished tasks over from yesterday's log (default true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yesterday: Option<bool>,
    /// Open generated files in the default application (default true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

impl Config {
    /// Every key `get`/`set`/`unset` understand
    pub const KEYS: &'static [&'static str] = &["input", "format", "yesterday", "open"];

    /// The default config location, `.whip.toml` in the home directory
    pub fn default_path() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join(".whip.toml")
    }

    /// Load configuration; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Look up a key's current value as display text
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "input" => self.input.clone(),
            "format" => self.format.clone(),
            "yesterday" => self.yesterday.map(|b| b.to_string()),
            "open" => self.open.map(|b| b.to_string()),
            _ => None,
        }
    }

    /// Set a key from command-line text
    ///
    /// Boolean keys accept `true`/`yes` and `false`/`no`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "input" => self.input = Some(value.to_string()),
            "format" => self.format = Some(value.to_string()),
            "yesterday" => self.yesterday = Some(parse_bool(key, value)?),
            "open" => self.open = Some(parse_bool(key, value)?),
            _ => bail!("unknown config key '{key}' (known keys: input, format, yesterday, open)"),
        }
        Ok(())
    }

    /// Clear a key back to its unset state
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "input" => self.input = None,
            "format" => self.format = None,
            "yesterday" => self.yesterday = None,
            "open" => self.open = None,
            _ => bail!("unknown config key '{key}' (known keys: input, format, yesterday, open)"),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => bail!("config key '{key}' expects a boolean (true/yes or false/no), got '{value}'"),
    }
}
