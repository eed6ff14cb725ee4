//! githelper: guard-railed git branch workflows.
//!
//! This is the main entry point for the `githelper` CLI. It parses arguments,
//! resolves the repository and its configuration, dispatches the requested
//! action, and maps the outcome onto the process exit code.

mod cli;
mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod policy;
pub mod runner;
pub mod workflow;

#[cfg(test)]
mod test_support;

use cli::{Cli, Command};
use config::{CONFIG_FILE_NAME, Config};
use confirm::{AutoConfirm, Confirmer, PromptConfirmer};
use error::{GitHelperError, Result};
use runner::{RunOptions, SystemRunner};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use workflow::{Workflow, WorkflowResult};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let log_handle = logging::init();

    let code = match run(&cli, &log_handle) {
        Ok(result) => {
            if let WorkflowResult::Blocked(reason) = &result {
                eprintln!("Blocked: {}", reason);
            }
            result.exit_code()
        }
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            err.exit_code()
        }
    };

    ExitCode::from(code as u8)
}

fn run(cli: &Cli, log_handle: &logging::LogHandle) -> Result<WorkflowResult> {
    let cwd = match &cli.repo {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| {
            GitHelperError::Environment(format!("cannot determine current directory: {}", e))
        })?,
    };
    let probe = SystemRunner::new(&cwd);
    git::ensure_git_available(&probe)?;

    // Pick from the menu first so the chosen action gets the same repository check.
    let Some(command) = commands::resolve_menu(cli.action())? else {
        return Ok(WorkflowResult::Success);
    };
    let root = resolve_root(&command, &probe, cwd)?;
    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::resolve(root.join(CONFIG_FILE_NAME)),
    };
    logging::apply(log_handle, cfg.log_level, cli.verbose);

    if let Ok(effective) = serde_json::to_string(&cfg) {
        debug!(root = %root.display(), config = %effective, "resolved configuration");
    }

    let runner = SystemRunner::new(&root);
    let confirmer: &dyn Confirmer = if cli.yes {
        &AutoConfirm
    } else {
        &PromptConfirmer
    };
    let opts = RunOptions {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    let workflow = Workflow::new(&cfg, &runner, confirmer, opts, runner.cwd());

    let outcome = commands::dispatch(command, &workflow);
    if let Err(err @ (GitHelperError::Conflict { .. } | GitHelperError::CommandFailed { .. })) =
        &outcome
    {
        eprintln!("Error: {}", err);
    }
    WorkflowResult::from_outcome(outcome)
}

/// The directory actions run in: the repository top level.
///
/// Only `init` accepts a directory that is not a repository yet.
fn resolve_root(command: &Command, probe: &SystemRunner, cwd: PathBuf) -> Result<PathBuf> {
    match git::repo_root(probe) {
        Ok(root) => Ok(root),
        Err(err) if command.creates_repository() => {
            debug!("{}; initializing in {}", err, cwd.display());
            Ok(cwd)
        }
        Err(err) => Err(err),
    }
}
