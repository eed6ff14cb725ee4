//! Config struct definition and defaults.

use super::types::{
    LogLevel, SyncStrategy, default_allowed_prefixes, default_base, default_protect,
    default_remote_name,
};
use serde::Serialize;

/// Resolved githelper configuration.
///
/// Built once at startup from defaults overlaid with `.githelper.json`, then
/// passed by reference to every workflow action. Never mutated afterwards and
/// never written back to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Trunk branch that feature branches start from and sync against.
    pub default_base: String,

    /// How `sync` and `pull` integrate the base branch.
    pub sync_strategy: SyncStrategy,

    /// Remote used for fetch, push and tracking branches.
    pub remote_name: String,

    /// Whether branch names must carry one of `allowed_prefixes`.
    pub enforce_prefix: bool,

    /// Accepted branch name prefixes, in declaration order.
    pub allowed_prefixes: Vec<String>,

    /// Branch names that require confirmation before guarded actions.
    pub protect: Vec<String>,

    /// Ask before pruning while on a protected branch.
    pub confirm_on_prune: bool,

    /// Ask before syncing a protected branch.
    pub confirm_on_sync: bool,

    /// Diagnostic verbosity.
    pub log_level: LogLevel,

    /// Stash a dirty worktree before sync and restore it afterwards.
    pub auto_stash: bool,

    /// Pop the sync stash even when the rebase/merge failed.
    ///
    /// When false the stash is left in place for manual inspection.
    pub restore_stash_on_failure: bool,

    /// Command run before `commitpush` commits; nonzero exit aborts the commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_commit_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_base: default_base(),
            sync_strategy: SyncStrategy::default(),
            remote_name: default_remote_name(),
            enforce_prefix: true,
            allowed_prefixes: default_allowed_prefixes(),
            protect: default_protect(),
            confirm_on_prune: true,
            confirm_on_sync: false,
            log_level: LogLevel::default(),
            auto_stash: true,
            restore_stash_on_failure: false,
            pre_commit_command: None,
        }
    }
}
