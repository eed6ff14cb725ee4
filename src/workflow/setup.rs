//! Repository bootstrap: init, gitignore, firstcommit, remote.

use super::Workflow;
use crate::error::{GitHelperError, Result};
use std::fs;
use tracing::info;

/// Entries written by `githelper gitignore`.
pub const GITIGNORE_TEMPLATE: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "*.log",
    "*.tmp",
    "*.swp",
    ".env",
    ".env.local",
    ".idea/",
    ".vscode/",
    "node_modules/",
    "target/",
    "dist/",
    "build/",
    "coverage/",
];

impl Workflow<'_> {
    /// `git init` in the working directory.
    pub fn init(&self) -> Result<()> {
        self.git(&["init"])?;
        println!("Initialized repository in {}", self.root.display());
        Ok(())
    }

    /// Create `.gitignore` from the template, or append the entries it lacks.
    pub fn gitignore(&self) -> Result<()> {
        let path = self.root.join(".gitignore");
        let existing = if path.exists() {
            fs::read_to_string(&path).map_err(|e| {
                GitHelperError::CommandFailed {
                    command: format!("read {} ({})", path.display(), e),
                    code: None,
                }
            })?
        } else {
            String::new()
        };

        let present: Vec<&str> = existing.lines().map(str::trim).collect();
        let missing: Vec<&str> = GITIGNORE_TEMPLATE
            .iter()
            .copied()
            .filter(|entry| !present.contains(entry))
            .collect();

        if missing.is_empty() {
            println!(".gitignore already contains every default entry.");
            return Ok(());
        }

        if self.opts.dry_run {
            println!("[dry-run] would add to {}:", path.display());
            for entry in &missing {
                println!("  {}", entry);
            }
            return Ok(());
        }

        let mut content = existing;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        for entry in &missing {
            content.push_str(entry);
            content.push('\n');
        }

        fs::write(&path, content).map_err(|e| GitHelperError::CommandFailed {
            command: format!("write {} ({})", path.display(), e),
            code: None,
        })?;

        info!("Wrote {} entries to {}", missing.len(), path.display());
        println!("Added {} entries to .gitignore.", missing.len());
        Ok(())
    }

    /// Stage everything and create the first commit.
    pub fn first_commit(&self, message: &str) -> Result<()> {
        if message.trim().is_empty() {
            return Err(GitHelperError::InvalidArgument(
                "commit message must not be empty".to_string(),
            ));
        }

        self.git(&["add", "-A"])?;
        self.commit_staged(message)?;
        Ok(())
    }

    /// Point `remoteName` at `url`, adding the remote if it does not exist yet.
    pub fn set_remote(&self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(GitHelperError::InvalidArgument(
                "remote URL is required (githelper remote <url>)".to_string(),
            ));
        }

        let remote = self.cfg.remote_name.as_str();
        if self.repo().remote_exists(remote)? {
            info!("Updating {} -> {}", remote, url);
            self.git(&["remote", "set-url", remote, url])
        } else {
            info!("Adding {} -> {}", remote, url);
            self.git(&["remote", "add", remote, url])
        }
    }
}
