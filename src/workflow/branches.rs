//! Branch creation and cleanup: checkout, newbranch, prune, cleanbranches.

use super::Workflow;
use crate::error::{GitHelperError, Result};
use crate::policy::{self, GuardedAction};
use tracing::info;

impl Workflow<'_> {
    /// Switch to `name`, creating it if needed.
    ///
    /// Resolution order: existing local branch, then `<remote>/<name>` as a
    /// tracking branch, then a new branch cut from `<remote>/<base>`.
    pub fn checkout(&self, name: &str) -> Result<()> {
        policy::validate_branch_name(name, self.cfg)?;
        let repo = self.repo();
        let remote = &self.cfg.remote_name;

        if repo.local_branch_exists(name)? {
            info!("Switching to local branch {}", name);
            return self.git(&["checkout", name]);
        }

        if repo.remote_branch_exists(remote, name)? {
            info!("Creating {} tracking {}/{}", name, remote, name);
            self.git(&["fetch", remote, name])?;
            return self.git(&[
                "checkout",
                "-b",
                name,
                "--track",
                &format!("{}/{}", remote, name),
            ]);
        }

        self.create_from_base(name)
    }

    /// Create `name` from `<remote>/<base>`; the branch must not exist locally.
    pub fn new_branch(&self, name: &str) -> Result<()> {
        policy::validate_branch_name(name, self.cfg)?;

        if self.repo().local_branch_exists(name)? {
            return Err(GitHelperError::InvalidArgument(format!(
                "branch '{}' already exists. Use `githelper checkout {}` to switch to it.",
                name, name
            )));
        }

        self.create_from_base(name)
    }

    fn create_from_base(&self, name: &str) -> Result<()> {
        let remote_base = self.remote_base();
        info!("Creating {} from {}", name, remote_base);

        self.git(&["fetch", &self.cfg.remote_name, &self.cfg.default_base])?;
        self.git(&["checkout", "-b", name, "--no-track", &remote_base])
    }

    /// Fetch with pruning, then prune stale remote-tracking branches.
    pub fn prune(&self) -> Result<()> {
        if let Some(branch) = self.repo().current_branch()? {
            self.guard(GuardedAction::Prune, &branch)?;
        }

        let remote = self.cfg.remote_name.as_str();
        info!("Pruning stale branches from {}", remote);
        self.git(&["fetch", remote, "--prune"])?;
        self.git(&["remote", "prune", remote])
    }

    /// Delete local branches already merged into `<remote>/<base>`.
    ///
    /// Protected branches, the base branch and the current branch are never
    /// candidates. Uses `git branch -d`, so git refuses anything unmerged.
    pub fn clean_branches(&self) -> Result<()> {
        let repo = self.repo();
        let remote_base = self.remote_base();
        let current = repo.current_branch()?;

        self.git(&["fetch", &self.cfg.remote_name, &self.cfg.default_base])?;

        let candidates: Vec<String> = repo
            .merged_branches(&remote_base)?
            .into_iter()
            .filter(|b| !b.is_empty())
            .filter(|b| !policy::is_protected(b, self.cfg))
            .filter(|b| *b != self.cfg.default_base)
            .filter(|b| current.as_deref() != Some(b.as_str()))
            .collect();

        if candidates.is_empty() {
            println!("No merged branches to delete.");
            return Ok(());
        }

        println!("Branches merged into {}:", remote_base);
        for branch in &candidates {
            println!("  {}", branch);
        }

        let prompt = format!("Delete {} merged branch(es)?", candidates.len());
        if !self.confirmer.confirm(&prompt)? {
            return Err(GitHelperError::PolicyBlocked(
                "branch cleanup was not confirmed (use --yes to skip the prompt)".to_string(),
            ));
        }

        for branch in &candidates {
            self.git(&["branch", "-d", branch])?;
        }
        println!("Deleted {} branch(es).", candidates.len());

        Ok(())
    }
}
