//! The branch workflow engine.
//!
//! Each action is a short sequence of guarded git invocations:
//!
//! 1. Validate arguments against the branch policy (no git side effects)
//! 2. Gate protected branches behind the confirmation capability
//! 3. Run the git commands in order, aborting on the first failure
//!
//! Nothing is retried and nothing already done is rolled back: if a fetch
//! succeeds and the following rebase fails, the fetch stays.

mod branches;
mod inspect;
mod publish;
mod setup;
mod sync;


use crate::config::Config;
use crate::confirm::Confirmer;
use crate::error::{GitHelperError, Result};
use crate::exit_codes;
use crate::git::Repo;
use crate::policy::{self, GuardedAction};
use crate::runner::{CommandRunner, CommandStatus, GitCommand, RunOptions};
use std::path::{Path, PathBuf};

/// Outcome of a workflow action, used to pick the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowResult {
    Success,
    Blocked(String),
    ConflictDetected,
    CommandFailed(Option<i32>),
}

impl WorkflowResult {
    /// Classify the outcome of an action.
    ///
    /// Argument, config and environment errors are not workflow outcomes and
    /// are passed through unchanged.
    pub fn from_outcome(outcome: Result<()>) -> std::result::Result<Self, GitHelperError> {
        match outcome {
            Ok(()) => Ok(Self::Success),
            Err(GitHelperError::PolicyBlocked(reason)) => Ok(Self::Blocked(reason)),
            Err(GitHelperError::Conflict { .. }) => Ok(Self::ConflictDetected),
            Err(GitHelperError::CommandFailed { code, .. }) => Ok(Self::CommandFailed(code)),
            Err(other) => Err(other),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => exit_codes::SUCCESS,
            Self::Blocked(_) => exit_codes::BLOCKED,
            Self::ConflictDetected | Self::CommandFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Everything an action needs, injected once per run.
pub struct Workflow<'a> {
    cfg: &'a Config,
    runner: &'a dyn CommandRunner,
    confirmer: &'a dyn Confirmer,
    opts: RunOptions,
    root: PathBuf,
}

impl<'a> Workflow<'a> {
    pub fn new(
        cfg: &'a Config,
        runner: &'a dyn CommandRunner,
        confirmer: &'a dyn Confirmer,
        opts: RunOptions,
        root: impl AsRef<Path>,
    ) -> Self {
        Self {
            cfg,
            runner,
            confirmer,
            opts,
            root: root.as_ref().to_path_buf(),
        }
    }

    fn repo(&self) -> Repo<'a> {
        Repo::new(self.runner)
    }

    /// `<remote>/<base>`, e.g. `origin/dev`.
    fn remote_base(&self) -> String {
        format!("{}/{}", self.cfg.remote_name, self.cfg.default_base)
    }

    /// Run a mutating git command; nonzero exit is an error.
    fn git(&self, args: &[&str]) -> Result<()> {
        self.runner.run(&GitCommand::git(args.iter().copied()), self.opts)
    }

    /// Run a mutating git command and hand back its status for interpretation.
    fn git_status(&self, args: &[&str]) -> Result<CommandStatus> {
        self.runner.execute(&GitCommand::git(args.iter().copied()), self.opts)
    }

    /// Ask for confirmation when `action` on `branch` requires it.
    fn guard(&self, action: GuardedAction, branch: &str) -> Result<()> {
        if !policy::requires_confirmation(action, branch, self.cfg) {
            return Ok(());
        }

        let prompt = format!(
            "'{}' is a protected branch. Continue with {}?",
            branch,
            action.name()
        );
        if self.confirmer.confirm(&prompt)? {
            Ok(())
        } else {
            Err(GitHelperError::PolicyBlocked(format!(
                "{} on protected branch '{}' was not confirmed (use --yes to skip the prompt)",
                action.name(),
                branch
            )))
        }
    }
}
