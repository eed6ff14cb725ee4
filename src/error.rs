//! Error types for the githelper CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for githelper operations.
///
/// Each variant maps to exactly one exit code; see [`exit_codes`].
#[derive(Error, Debug)]
pub enum GitHelperError {
    /// The user supplied an argument the policy rejects, or omitted a required one.
    #[error("{0}")]
    InvalidArgument(String),

    /// An explicitly requested config file could not be used.
    #[error("Config error: {0}")]
    Config(String),

    /// `git` is missing or the working directory is not a repository.
    #[error("{0}")]
    Environment(String),

    /// A protected-branch confirmation was declined.
    #[error("Blocked: {0}")]
    PolicyBlocked(String),

    /// A rebase or merge stopped on conflicts; `remediation` tells the user how to finish.
    #[error("{operation} stopped on conflicts\n\n{remediation}")]
    Conflict {
        operation: String,
        remediation: String,
    },

    /// A git (or pre-commit) subprocess exited nonzero.
    #[error("`{command}` failed{}", exit_suffix(.code))]
    CommandFailed { command: String, code: Option<i32> },
}

impl GitHelperError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitHelperError::InvalidArgument(_) => exit_codes::INVALID_ARGUMENTS,
            GitHelperError::Config(_) => exit_codes::CONFIG_ERROR,
            GitHelperError::Environment(_) => exit_codes::ENVIRONMENT_ERROR,
            GitHelperError::PolicyBlocked(_) => exit_codes::BLOCKED,
            GitHelperError::Conflict { .. } => exit_codes::OPERATION_FAILED,
            GitHelperError::CommandFailed { .. } => exit_codes::OPERATION_FAILED,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" (exit code {})", c),
        None => String::new(),
    }
}

/// Result type alias for githelper operations.
pub type Result<T> = std::result::Result<T, GitHelperError>;
