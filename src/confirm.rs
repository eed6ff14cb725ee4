//! Interactive confirmation, as an injectable capability.

use crate::error::Result;
use inquire::Confirm;
use inquire::error::InquireError;
use std::io::IsTerminal;
use tracing::warn;

/// Asks the user to approve a guarded action.
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Approves everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Prompts on the terminal. Defaults to "no".
///
/// Without an interactive stdin the answer is "no"; a cancelled prompt
/// (Esc / Ctrl-C) is also treated as declined.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if !std::io::stdin().is_terminal() {
            warn!("stdin is not a terminal; declining \"{}\" (pass --yes to approve)", prompt);
            return Ok(false);
        }

        match Confirm::new(prompt)
            .with_default(false)
            .with_help_message("pass --yes to skip this prompt")
            .prompt()
        {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
            Err(e) => {
                warn!("confirmation prompt failed: {}", e);
                Ok(false)
            }
        }
    }
}
