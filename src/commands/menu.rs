//! Interactive action picker (`githelper` with no subcommand, or `githelper menu`).

use crate::cli::Command;
use crate::error::{GitHelperError, Result};
use inquire::error::InquireError;
use inquire::{Select, Text};
use std::fmt;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Status,
    Branch,
    List,
    Fetch,
    Checkout,
    NewBranch,
    Sync,
    Pull,
    CommitPush,
    Upstream,
    Prune,
    CleanBranches,
    Init,
    Gitignore,
    FirstCommit,
    Remote,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 17] = [
        MenuItem::Status,
        MenuItem::Branch,
        MenuItem::List,
        MenuItem::Fetch,
        MenuItem::Checkout,
        MenuItem::NewBranch,
        MenuItem::Sync,
        MenuItem::Pull,
        MenuItem::CommitPush,
        MenuItem::Upstream,
        MenuItem::Prune,
        MenuItem::CleanBranches,
        MenuItem::Init,
        MenuItem::Gitignore,
        MenuItem::FirstCommit,
        MenuItem::Remote,
        MenuItem::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuItem::Status => "status         show working tree status",
            MenuItem::Branch => "branch         print the current branch",
            MenuItem::List => "list           list local and remote branches",
            MenuItem::Fetch => "fetch          fetch and prune the remote",
            MenuItem::Checkout => "checkout       switch to (or create) a branch",
            MenuItem::NewBranch => "newbranch      create a branch from the base",
            MenuItem::Sync => "sync           update with the base branch",
            MenuItem::Pull => "pull           pull the current branch",
            MenuItem::CommitPush => "commitpush     commit everything and push",
            MenuItem::Upstream => "upstream       set the upstream branch",
            MenuItem::Prune => "prune          prune stale remote branches",
            MenuItem::CleanBranches => "cleanbranches  delete merged local branches",
            MenuItem::Init => "init           initialize a repository",
            MenuItem::Gitignore => "gitignore      add common .gitignore entries",
            MenuItem::FirstCommit => "firstcommit    create the first commit",
            MenuItem::Remote => "remote         add or update the remote",
            MenuItem::Quit => "quit",
        }
    }

    /// Prompt for the free-text argument this action needs, if any.
    fn input_prompt(self) -> Option<&'static str> {
        match self {
            MenuItem::Checkout | MenuItem::NewBranch => Some("Branch name:"),
            MenuItem::CommitPush => Some("Commit message:"),
            MenuItem::FirstCommit => Some("Commit message (blank for \"Initial commit\"):"),
            MenuItem::Remote => Some("Remote URL:"),
            _ => None,
        }
    }

    /// The command this item stands for. `None` for quit.
    fn into_command(self, input: String) -> Option<Command> {
        let input = input.trim().to_string();
        let command = match self {
            MenuItem::Status => Command::Status,
            MenuItem::Branch => Command::Branch,
            MenuItem::List => Command::List,
            MenuItem::Fetch => Command::Fetch,
            MenuItem::Checkout => Command::Checkout { branch: input },
            MenuItem::NewBranch => Command::Newbranch { branch: input },
            MenuItem::Sync => Command::Sync,
            MenuItem::Pull => Command::Pull,
            MenuItem::CommitPush => Command::Commitpush { message: input },
            MenuItem::Upstream => Command::Upstream,
            MenuItem::Prune => Command::Prune,
            MenuItem::CleanBranches => Command::Cleanbranches,
            MenuItem::Init => Command::Init,
            MenuItem::Gitignore => Command::Gitignore,
            MenuItem::FirstCommit => Command::Firstcommit {
                message: if input.is_empty() {
                    "Initial commit".to_string()
                } else {
                    input
                },
            },
            MenuItem::Remote => Command::Remote { url: input },
            MenuItem::Quit => return None,
        };
        Some(command)
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ask which action to run. `Ok(None)` when the user quits or cancels.
pub(super) fn choose() -> Result<Option<Command>> {
    if !std::io::stdin().is_terminal() {
        return Err(GitHelperError::InvalidArgument(
            "the menu needs an interactive terminal; pass an action instead (see `githelper help`)"
                .to_string(),
        ));
    }

    let Some(item) = cancellable(
        Select::new("What do you want to do?", MenuItem::ALL.to_vec())
            .with_page_size(12)
            .prompt(),
    )?
    else {
        return Ok(None);
    };

    let input = match item.input_prompt() {
        Some(prompt) => match cancellable(Text::new(prompt).prompt())? {
            Some(text) => text,
            None => return Ok(None),
        },
        None => String::new(),
    };

    Ok(item.into_command(input))
}

/// Esc and Ctrl-C mean "never mind"; anything else is an environment problem.
fn cancellable<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(GitHelperError::Environment(format!("menu prompt failed: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_but_quit_maps_to_a_command() {
        for item in MenuItem::ALL {
            let command = item.into_command("feature/x".to_string());
            assert_eq!(command.is_none(), item == MenuItem::Quit, "{:?}", item);
        }
    }

    #[test]
    fn argument_items_carry_trimmed_input() {
        assert_eq!(
            MenuItem::Checkout.into_command("  feature/login ".to_string()),
            Some(Command::Checkout {
                branch: "feature/login".to_string()
            })
        );
        assert_eq!(
            MenuItem::CommitPush.into_command("fix typo".to_string()),
            Some(Command::Commitpush {
                message: "fix typo".to_string()
            })
        );
    }

    #[test]
    fn blank_first_commit_message_uses_default() {
        assert_eq!(
            MenuItem::FirstCommit.into_command(String::new()),
            Some(Command::Firstcommit {
                message: "Initial commit".to_string()
            })
        );
    }

    #[test]
    fn only_argument_actions_prompt_for_input() {
        assert!(MenuItem::Sync.input_prompt().is_none());
        assert!(MenuItem::Remote.input_prompt().is_some());
        assert!(MenuItem::NewBranch.input_prompt().is_some());
    }

    #[test]
    fn cancelled_prompt_is_none() {
        let answer: std::result::Result<String, InquireError> =
            Err(InquireError::OperationCanceled);
        assert!(cancellable(answer).unwrap().is_none());
    }
}
