//! Fetching and read-only reporting: fetch, list, status, branch.

use super::Workflow;
use crate::error::{GitHelperError, Result};
use crate::runner::GitCommand;
use tracing::info;

impl Workflow<'_> {
    /// `git fetch <remote> --prune`.
    pub fn fetch(&self) -> Result<()> {
        info!("Fetching {}", self.cfg.remote_name);
        self.git(&["fetch", &self.cfg.remote_name, "--prune"])
    }

    /// Local and remote-tracking branches.
    pub fn list(&self) -> Result<()> {
        self.show(&["branch", "-a"])
    }

    /// Short status with branch/upstream line.
    pub fn status(&self) -> Result<()> {
        self.show(&["status", "-sb"])
    }

    /// Print the current branch name.
    pub fn branch(&self) -> Result<()> {
        match self.repo().current_branch()? {
            Some(name) => println!("{}", name),
            None => println!("(detached HEAD)"),
        }
        Ok(())
    }

    /// Run a read-only git command and print its output. Runs in dry-run too.
    fn show(&self, args: &[&str]) -> Result<()> {
        let command = GitCommand::git(args.iter().copied());
        let output = self.runner.query(&command)?;
        if !output.success() {
            if !output.stderr.is_empty() {
                eprintln!("{}", output.stderr);
            }
            return Err(GitHelperError::CommandFailed {
                command: command.to_string(),
                code: output.status.code(),
            });
        }
        if !output.stdout.is_empty() {
            println!("{}", output.stdout);
        }
        Ok(())
    }
}
