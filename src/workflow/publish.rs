//! Publishing work: commitpush and upstream.

use super::Workflow;
use crate::error::{GitHelperError, Result};
use crate::runner::GitCommand;
use tracing::info;

impl Workflow<'_> {
    /// Stage everything, commit, and push to `<remote>/<current branch>`.
    ///
    /// "Nothing to commit" is reported and the push still runs. A configured
    /// pre-commit command runs first and aborts everything if it fails.
    pub fn commit_push(&self, message: &str) -> Result<()> {
        if message.trim().is_empty() {
            return Err(GitHelperError::InvalidArgument(
                "commit message is required (githelper commitpush -m \"<message>\")".to_string(),
            ));
        }

        let branch = self.repo().require_current_branch()?;

        if let Some(check) = &self.cfg.pre_commit_command {
            self.run_pre_commit(check)?;
        }

        self.git(&["add", "-A"])?;
        self.commit_staged(message)?;

        info!("Pushing {} to {}", branch, self.cfg.remote_name);
        self.git(&["push", "-u", &self.cfg.remote_name, &branch])
    }

    /// Push with `--set-upstream` unless the current branch already tracks something.
    pub fn ensure_upstream(&self) -> Result<()> {
        let repo = self.repo();
        let branch = repo.require_current_branch()?;

        if repo.has_upstream()? {
            println!("Upstream already set for {}.", branch);
            return Ok(());
        }

        info!("Setting upstream {}/{}", self.cfg.remote_name, branch);
        self.git(&["push", "-u", &self.cfg.remote_name, &branch])
    }

    /// Commit the index. Returns false (after saying so) when nothing is staged.
    pub(super) fn commit_staged(&self, message: &str) -> Result<bool> {
        // In a dry run `add -A` never happened, so the index says nothing useful.
        if !self.opts.dry_run && !self.repo().has_staged_changes()? {
            println!("Nothing to commit");
            return Ok(false);
        }

        self.git(&["commit", "-m", message])?;
        Ok(true)
    }

    fn run_pre_commit(&self, check: &str) -> Result<()> {
        let words = shell_words::split(check).map_err(|e| {
            GitHelperError::Config(format!(
                "failed to parse preCommitCommand '{}': {}\n\n\
                 Fix: check for unmatched quotes in .githelper.json preCommitCommand.",
                check, e
            ))
        })?;

        let Some((program, args)) = words.split_first() else {
            return Err(GitHelperError::Config(
                "preCommitCommand is empty after parsing".to_string(),
            ));
        };

        info!("Running pre-commit check: {}", check);
        let command = GitCommand::new(program.as_str(), args.iter().map(String::as_str));
        self.runner.run(&command, self.opts).inspect_err(|_| {
            eprintln!("Pre-commit check failed; nothing was committed.");
        })
    }
}
