//! Bringing the current branch up to date: sync and pull.

use super::Workflow;
use crate::config::SyncStrategy;
use crate::error::{GitHelperError, Result};
use crate::policy::GuardedAction;
use chrono::Utc;
use tracing::{info, warn};

impl Workflow<'_> {
    /// Update the current branch on top of `<remote>/<base>`.
    ///
    /// 1. Protected-branch gate (before anything touches the repository)
    /// 2. Set a dirty worktree aside when `autoStash` is on
    /// 3. Fetch the base branch
    /// 4. Rebase or merge according to `syncStrategy`
    /// 5. Bring the local changes back
    ///
    /// With `restoreStashOnFailure` the changes are handed to git's own
    /// `--autostash`, which reapplies them when a stopped rebase or merge is
    /// continued or aborted. Otherwise they go on the stash list and stay
    /// there after a conflict until the user runs `git stash pop`.
    pub fn sync(&self) -> Result<()> {
        let repo = self.repo();
        let branch = repo.require_current_branch()?;
        self.guard(GuardedAction::Sync, &branch)?;

        let dirty = self.cfg.auto_stash && repo.has_uncommitted_changes()?;
        let autostash = dirty && self.cfg.restore_stash_on_failure;
        let stashed = dirty && !autostash;
        if stashed {
            info!("Stashing local changes");
            let message = format!(
                "githelper: sync {} {}",
                branch,
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            );
            self.git(&["stash", "push", "-m", &message])?;
        }

        let remote_base = self.remote_base();
        info!("Fetching {}", remote_base);
        if let Err(e) = self.git(&["fetch", &self.cfg.remote_name, &self.cfg.default_base]) {
            // The worktree has not been touched yet, so the stash always comes back.
            if stashed {
                self.pop_stash_best_effort();
            }
            return Err(e);
        }

        let strategy = self.cfg.sync_strategy;
        info!("{} {} onto {}", strategy.verb(), branch, remote_base);
        let mut args = match strategy {
            SyncStrategy::Rebase => vec!["rebase"],
            SyncStrategy::Merge => vec!["merge", "--no-ff", "--no-edit"],
        };
        if autostash {
            args.push("--autostash");
        }
        args.push(remote_base.as_str());
        let status = self.git_status(&args)?;

        if status.is_success() {
            if stashed {
                info!("Restoring stashed changes");
                self.git(&["stash", "pop"]).inspect_err(|_| {
                    eprintln!(
                        "Restoring your stashed changes conflicted with the updated branch.\n\
                         Resolve the conflicts, then drop the stash with: git stash drop"
                    );
                })?;
            }
            println!("{} is up to date with {}.", branch, remote_base);
            return Ok(());
        }

        let mut remediation = conflict_help(strategy);
        if stashed {
            remediation.push_str(
                "\n\nYour local changes are still stashed. \
                 Restore them once the branch is clean again with: git stash pop",
            );
        } else if autostash {
            remediation.push_str(&format!(
                "\n\nYour local changes were set aside by git and come back \
                 when the {} is continued or aborted.",
                strategy.verb()
            ));
        }

        Err(GitHelperError::Conflict {
            operation: format!("{} of '{}' onto {}", strategy.verb(), branch, remote_base),
            remediation,
        })
    }

    /// Pull the upstream of the current branch using `syncStrategy`.
    pub fn pull(&self) -> Result<()> {
        let repo = self.repo();
        let branch = repo.require_current_branch()?;

        let strategy = self.cfg.sync_strategy;
        let mode = match strategy {
            SyncStrategy::Rebase => "--rebase",
            SyncStrategy::Merge => "--no-rebase",
        };

        info!("Pulling {} ({})", branch, strategy.verb());
        let status = self.git_status(&["pull", mode])?;
        if status.is_success() {
            return Ok(());
        }

        if let Some(in_progress) = repo.operation_in_progress()? {
            return Err(GitHelperError::Conflict {
                operation: format!("pull into '{}'", branch),
                remediation: conflict_help(in_progress),
            });
        }

        Err(GitHelperError::CommandFailed {
            command: format!("git pull {}", mode),
            code: status.code(),
        })
    }

    fn pop_stash_best_effort(&self) {
        if let Err(e) = self.git(&["stash", "pop"]) {
            warn!("could not restore stashed changes: {}", e);
            eprintln!("Your local changes are still stashed. Restore them with: git stash pop");
        }
    }
}

/// Remediation printed when a rebase or merge stops on conflicts.
pub(crate) fn conflict_help(strategy: SyncStrategy) -> String {
    match strategy {
        SyncStrategy::Rebase => "Rebase stopped because of conflicts.\n\
             Resolve the conflicted files, then run:\n  \
             git add -A\n  \
             git rebase --continue\n\
             To give up and return to the state before the sync:\n  \
             git rebase --abort"
            .to_string(),
        SyncStrategy::Merge => "Merge stopped because of conflicts.\n\
             Resolve the conflicted files, then run:\n  \
             git add -A\n  \
             git merge --continue\n\
             To give up and return to the state before the sync:\n  \
             git merge --abort"
            .to_string(),
    }
}
