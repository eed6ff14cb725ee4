//! Command routing for githelper.
//!
//! Maps each CLI action onto its `Workflow` operation. The interactive menu
//! resolves to one of the same actions and goes through the same path.

mod menu;

use crate::cli::Command;
use crate::error::Result;
use crate::workflow::Workflow;

/// Replace `menu` with the action picked from it. `Ok(None)` when the user quits.
///
/// Other commands come back unchanged. The result is never `Command::Menu`, so
/// callers can run their repository checks against the real action.
pub fn resolve_menu(command: Command) -> Result<Option<Command>> {
    match command {
        Command::Menu => menu::choose(),
        other => Ok(Some(other)),
    }
}

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, workflow: &Workflow) -> Result<()> {
    match command {
        Command::Menu => match resolve_menu(command)? {
            Some(chosen) => dispatch(chosen, workflow),
            None => Ok(()),
        },
        Command::Fetch => workflow.fetch(),
        Command::List => workflow.list(),
        Command::Checkout { branch } => workflow.checkout(&branch),
        Command::Newbranch { branch } => workflow.new_branch(&branch),
        Command::Commitpush { message } => workflow.commit_push(&message),
        Command::Pull => workflow.pull(),
        Command::Sync => workflow.sync(),
        Command::Prune => workflow.prune(),
        Command::Status => workflow.status(),
        Command::Upstream => workflow.ensure_upstream(),
        Command::Init => workflow.init(),
        Command::Gitignore => workflow.gitignore(),
        Command::Firstcommit { message } => workflow.first_commit(&message),
        Command::Remote { url } => workflow.set_remote(&url),
        Command::Branch => workflow.branch(),
        Command::Cleanbranches => workflow.clean_branches(),
    }
}
