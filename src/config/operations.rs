//! Config resolution: defaults overlaid with an optional JSON file.

use super::model::Config;
use super::types::{LogLevel, SyncStrategy};
use crate::error::{GitHelperError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

impl Config {
    /// Resolve the configuration from the file at `path`.
    ///
    /// A missing file silently yields the defaults. An unreadable or malformed
    /// file logs a warning and also yields the defaults; resolution never fails.
    pub fn resolve<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from a file that is expected to exist.
    ///
    /// Used for `--config <path>`, where a missing or unreadable file is a
    /// [`GitHelperError::Config`]. Malformed JSON still falls back to defaults
    /// with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GitHelperError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        match Self::from_json(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %path.display(), "{}; using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Parse a config from JSON text, overlaying recognized keys on the defaults.
    ///
    /// Returns an error only when the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| GitHelperError::Config(format!("failed to parse config JSON: {}", e)))?;

        let Value::Object(map) = value else {
            return Err(GitHelperError::Config(
                "config file must contain a JSON object".to_string(),
            ));
        };

        let mut config = Self::default();
        config.apply_overrides(&map);
        Ok(config)
    }

    /// Overwrite fields for every recognized key in `map`.
    ///
    /// Unknown keys are ignored. Values that cannot be coerced to the field's
    /// type leave the default in place and log a warning.
    pub fn apply_overrides(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            let applied = match key.as_str() {
                "defaultBase" => set(&mut self.default_base, coerce_name(value)),
                "syncStrategy" => set(
                    &mut self.sync_strategy,
                    value.as_str().and_then(SyncStrategy::from_str),
                ),
                "remoteName" => set(&mut self.remote_name, coerce_name(value)),
                "enforcePrefix" => set(&mut self.enforce_prefix, coerce_bool(value)),
                "allowedPrefixes" => set(&mut self.allowed_prefixes, coerce_list(value)),
                "protect" => set(&mut self.protect, coerce_list(value)),
                "confirmOnPrune" => set(&mut self.confirm_on_prune, coerce_bool(value)),
                "confirmOnSync" => set(&mut self.confirm_on_sync, coerce_bool(value)),
                "logLevel" => set(
                    &mut self.log_level,
                    value.as_str().and_then(LogLevel::from_str),
                ),
                "autoStash" => set(&mut self.auto_stash, coerce_bool(value)),
                "restoreStashOnFailure" => {
                    set(&mut self.restore_stash_on_failure, coerce_bool(value))
                }
                "preCommitCommand" => match value {
                    Value::Null => {
                        self.pre_commit_command = None;
                        true
                    }
                    other => match coerce_string(other) {
                        Some(cmd) => {
                            self.pre_commit_command = Some(cmd).filter(|s| !s.is_empty());
                            true
                        }
                        None => false,
                    },
                },
                _ => {
                    debug!(key = %key, "ignoring unknown config key");
                    true
                }
            };

            if !applied {
                warn!(key = %key, value = %value, "invalid config value, keeping default");
            }
        }
    }
}

fn set<T>(field: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *field = v;
            true
        }
        None => false,
    }
}

/// Coerce JSON bools, boolean-looking strings and 0/1 numbers.
pub(crate) fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce strings and numbers to a string.
pub(crate) fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`coerce_string`], but rejects empty names.
fn coerce_name(value: &Value) -> Option<String> {
    coerce_string(value).filter(|s| !s.is_empty())
}

/// Coerce an array of strings, or a single comma-separated string, to a list.
///
/// Empty entries are skipped and duplicates dropped, preserving first occurrence.
pub(crate) fn coerce_list(value: &Value) -> Option<Vec<String>> {
    let raw: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .map(coerce_string)
            .collect::<Option<Vec<_>>>()?,
        Value::String(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
        _ => return None,
    };

    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for item in raw {
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    Some(out)
}
