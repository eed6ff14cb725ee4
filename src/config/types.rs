//! Configuration enums and defaults for githelper.

use serde::Serialize;
use tracing::level_filters::LevelFilter;

/// How `sync` and `pull` bring the current branch up to date with the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncStrategy {
    /// Replay the current branch on top of `<remote>/<base>` (default).
    #[default]
    Rebase,
    /// Non-fast-forward merge of `<remote>/<base>` into the current branch.
    Merge,
}

impl SyncStrategy {
    /// Parse a sync strategy, case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rebase" => Some(Self::Rebase),
            "merge" => Some(Self::Merge),
            _ => None,
        }
    }

    /// The git verb for this strategy, used in messages and remediation text.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Rebase => "rebase",
            Self::Merge => "merge",
        }
    }
}

/// Diagnostic verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Silent,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Parse a log level, case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Some(Self::Silent),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// The tracing filter this level maps to.
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Silent => LevelFilter::OFF,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }
}

/// File name of the optional config file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".githelper.json";

pub(crate) fn default_base() -> String {
    "dev".to_string()
}
pub(crate) fn default_remote_name() -> String {
    "origin".to_string()
}
pub(crate) fn default_allowed_prefixes() -> Vec<String> {
    vec![
        "feature/".to_string(),
        "bugfix/".to_string(),
        "hotfix/".to_string(),
    ]
}
pub(crate) fn default_protect() -> Vec<String> {
    vec!["main".to_string(), "dev".to_string()]
}
