//! Git queries and pre-flight checks for githelper.
//!
//! Read-only inspection of the repository goes through [`CommandRunner::query`]
//! and is therefore performed even in dry-run mode. Nothing in this module
//! mutates the repository.

use crate::config::SyncStrategy;
use crate::error::{GitHelperError, Result};
use crate::runner::{CommandRunner, GitCommand};
use std::path::PathBuf;

/// Verify that a `git` executable can be spawned.
///
/// # Returns
///
/// * `Ok(())` - git responded to `git --version`
/// * `Err(GitHelperError::Environment)` - git is missing (exit code 4)
pub fn ensure_git_available(runner: &dyn CommandRunner) -> Result<()> {
    let output = runner.query(&GitCommand::git(["--version"]))?;
    if output.success() {
        Ok(())
    } else {
        Err(GitHelperError::Environment(format!(
            "git is installed but `git --version` failed: {}",
            output.stderr
        )))
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the repository root
/// * `Err(GitHelperError::Environment)` - If not inside a git repository (exit code 4)
pub fn repo_root(runner: &dyn CommandRunner) -> Result<PathBuf> {
    let output = runner.query(&GitCommand::git(["rev-parse", "--show-toplevel"]))?;

    if output.success() && !output.stdout.is_empty() {
        Ok(PathBuf::from(&output.stdout))
    } else {
        Err(GitHelperError::Environment(
            "not inside a git repository. Run this command from within a git repository, \
             or use `githelper init` to create one."
                .to_string(),
        ))
    }
}

/// Read-only view of the repository used by the workflow engine.
pub struct Repo<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Repo<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn succeeds(&self, args: &[&str]) -> Result<bool> {
        Ok(self
            .runner
            .query(&GitCommand::git(args.iter().copied()))?
            .success())
    }

    /// Name of the checked-out branch, or `None` on a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let output = self
            .runner
            .query(&GitCommand::git(["symbolic-ref", "--quiet", "--short", "HEAD"]))?;
        if output.success() && !output.stdout.is_empty() {
            Ok(Some(output.stdout))
        } else {
            Ok(None)
        }
    }

    /// Like [`current_branch`](Self::current_branch), but a detached HEAD is an
    /// invalid-argument error since the action needs a branch to work on.
    pub fn require_current_branch(&self) -> Result<String> {
        self.current_branch()?.ok_or_else(|| {
            GitHelperError::InvalidArgument(
                "HEAD is detached; check out a branch first (githelper checkout <branch>)"
                    .to_string(),
            )
        })
    }

    /// Check if a branch exists locally.
    pub fn local_branch_exists(&self, branch: &str) -> Result<bool> {
        self.succeeds(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{}", branch),
        ])
    }

    /// Check if `remote/branch` exists, first among the remote-tracking refs,
    /// then by asking the remote.
    pub fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        let tracking = self.succeeds(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/remotes/{}/{}", remote, branch),
        ])?;
        if tracking {
            return Ok(true);
        }
        self.succeeds(&[
            "ls-remote",
            "--exit-code",
            "--heads",
            remote,
            &format!("refs/heads/{}", branch),
        ])
    }

    pub fn remote_exists(&self, remote: &str) -> Result<bool> {
        let output = self.runner.query(&GitCommand::git(["remote"]))?;
        Ok(output.lines().contains(&remote))
    }

    /// True if the current branch has an upstream configured.
    pub fn has_upstream(&self) -> Result<bool> {
        self.succeeds(&[
            "rev-parse",
            "--abbrev-ref",
            "--symbolic-full-name",
            "@{u}",
        ])
    }

    /// Check for staged or unstaged changes to tracked files.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let output = self.runner.query(&GitCommand::git([
            "status",
            "--porcelain",
            "--untracked-files=no",
        ]))?;
        Ok(output.success() && !output.stdout.is_empty())
    }

    /// True if the index differs from HEAD.
    ///
    /// On an unborn branch there is no HEAD to compare against, so any entry
    /// in the index counts as staged.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self
            .runner
            .query(&GitCommand::git(["diff", "--cached", "--quiet"]))?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => {
                let index = self
                    .runner
                    .query(&GitCommand::git(["ls-files", "--cached"]))?;
                Ok(!index.stdout.is_empty())
            }
        }
    }

    /// The rebase or merge left stopped in the worktree, if any.
    pub fn operation_in_progress(&self) -> Result<Option<SyncStrategy>> {
        if self.succeeds(&["rev-parse", "-q", "--verify", "REBASE_HEAD"])? {
            return Ok(Some(SyncStrategy::Rebase));
        }
        if self.succeeds(&["rev-parse", "-q", "--verify", "MERGE_HEAD"])? {
            return Ok(Some(SyncStrategy::Merge));
        }
        Ok(None)
    }

    /// Local branches whose tips are reachable from `target`.
    pub fn merged_branches(&self, target: &str) -> Result<Vec<String>> {
        // for-each-ref over refs/heads never reports the "(HEAD detached at ...)" pseudo-branch.
        let command = GitCommand::git([
            "for-each-ref",
            "--merged",
            target,
            "--format=%(refname:short)",
            "refs/heads/",
        ]);
        let output = self.runner.query(&command)?;
        if !output.success() {
            return Err(GitHelperError::CommandFailed {
                command: command.to_string(),
                code: output.status.code(),
            });
        }
        Ok(output.lines().iter().map(|l| l.trim().to_string()).collect())
    }
}
