//! CLI argument parsing for githelper.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actions live in `workflow`
//! and are routed by `commands::dispatch`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// githelper: guard-railed git branch workflows.
///
/// Wraps everyday git operations (checkout, sync, prune, commit-and-push)
/// with branch naming rules, protected-branch confirmation and
/// conflict remediation help. Settings come from `.githelper.json` at the
/// repository root.
#[derive(Parser, Debug)]
#[command(name = "githelper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Echo each git command and enable debug diagnostics.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print mutating git commands instead of running them.
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Read settings from this file instead of `<repo>/.githelper.json`.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run against this directory instead of the current one.
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Action to run. Opens the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick an action interactively.
    Menu,

    /// Fetch the configured remote and prune deleted branches.
    Fetch,

    /// List local and remote branches.
    List,

    /// Switch to a branch, tracking or creating it as needed.
    ///
    /// An existing local branch is checked out; a branch that only exists
    /// on the remote is checked out tracking it; otherwise the branch is
    /// created from `<remote>/<defaultBase>`.
    Checkout {
        /// Branch name (must carry an allowed prefix when enforcePrefix is on).
        branch: String,
    },

    /// Create a new branch from `<remote>/<defaultBase>`.
    Newbranch {
        /// Branch name (must carry an allowed prefix when enforcePrefix is on).
        branch: String,
    },

    /// Stage everything, commit and push the current branch.
    Commitpush {
        /// Commit message.
        #[arg(short, long)]
        message: String,
    },

    /// Pull the current branch using the configured sync strategy.
    Pull,

    /// Bring the current branch up to date with `<remote>/<defaultBase>`.
    ///
    /// Rebases or merges according to syncStrategy. Stops on conflicts and
    /// prints how to continue or abort.
    Sync,

    /// Prune remote-tracking branches that no longer exist on the remote.
    Prune,

    /// Short working tree status.
    Status,

    /// Push the current branch with upstream tracking if none is set.
    Upstream,

    /// Initialize a git repository in the working directory.
    Init,

    /// Create or extend `.gitignore` with common entries.
    Gitignore,

    /// Stage everything and create the first commit.
    Firstcommit {
        /// Commit message.
        #[arg(short, long, default_value = "Initial commit")]
        message: String,
    },

    /// Add or update the configured remote.
    Remote {
        /// Remote URL.
        url: String,
    },

    /// Print the current branch name.
    Branch,

    /// Delete local branches already merged into the base branch.
    Cleanbranches,
}

impl Command {
    /// Whether this action runs outside an existing repository.
    pub fn creates_repository(&self) -> bool {
        matches!(self, Command::Init)
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The requested action, defaulting to the menu.
    pub fn action(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}
