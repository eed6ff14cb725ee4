//! Branch policy: prefix rules, protected branches, confirmation gates.
//!
//! Pure decision functions over a [`Config`]. Nothing here touches git or the
//! terminal; callers decide how to report a negative answer.

use crate::config::Config;
use crate::error::{GitHelperError, Result};

/// An action that may be gated behind a protected-branch confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    Sync,
    Prune,
}

impl GuardedAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Prune => "prune",
        }
    }
}

/// True iff `branch` is listed in `protect` (exact, case-sensitive).
pub fn is_protected(branch: &str, cfg: &Config) -> bool {
    cfg.protect.iter().any(|p| p == branch)
}

/// True iff prefixes are not enforced, or `branch` starts with an allowed prefix.
pub fn has_allowed_prefix(branch: &str, cfg: &Config) -> bool {
    !cfg.enforce_prefix || cfg.allowed_prefixes.iter().any(|p| branch.starts_with(p.as_str()))
}

/// True iff `branch` is protected and the action's confirm flag is set.
pub fn requires_confirmation(action: GuardedAction, branch: &str, cfg: &Config) -> bool {
    let flag = match action {
        GuardedAction::Sync => cfg.confirm_on_sync,
        GuardedAction::Prune => cfg.confirm_on_prune,
    };
    flag && is_protected(branch, cfg)
}

/// Validate a branch name supplied by the user.
///
/// Empty names are always rejected; otherwise the prefix rule applies.
pub fn validate_branch_name(branch: &str, cfg: &Config) -> Result<()> {
    if branch.trim().is_empty() {
        return Err(GitHelperError::InvalidArgument(
            "branch name is required".to_string(),
        ));
    }

    if !has_allowed_prefix(branch, cfg) {
        return Err(GitHelperError::InvalidArgument(format!(
            "branch '{}' does not start with an allowed prefix ({}).\n\n\
             Rename the branch, or set \"enforcePrefix\": false in .githelper.json.",
            branch,
            cfg.allowed_prefixes.join(", ")
        )));
    }

    Ok(())
}
