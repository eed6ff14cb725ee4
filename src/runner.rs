//! Subprocess runner for githelper.
//!
//! Every external program (git, the optional pre-commit command) goes through
//! a [`CommandRunner`]. Commands are structured argument vectors handed
//! straight to the OS; no shell is involved, so branch names and commit
//! messages are never re-interpreted.

use crate::error::{GitHelperError, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// A program plus its ordered arguments. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    program: String,
    args: Vec<String>,
}

impl GitCommand {
    /// Build a command for an arbitrary program.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a `git` command.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for GitCommand {
    /// Renders a copy-pasteable command line, quoting where needed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(&self.program).chain(self.args.iter());
        f.write_str(&shell_words::join(words))
    }
}

/// Per-invocation execution switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the command line instead of running it.
    pub dry_run: bool,
    /// Print the command line before running it.
    pub verbose: bool,
}

/// Exit status of a command. Dry runs produce a synthetic success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Captured result of a read-only query.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: CommandStatus,
    /// Standard output (trimmed).
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Executes external commands.
///
/// `execute` is for side-effecting commands: it honors [`RunOptions`] and
/// inherits the terminal so editors and prompts work. `query` is for
/// read-only inspection: it always runs (even in dry-run) and captures output.
pub trait CommandRunner {
    fn execute(&self, command: &GitCommand, opts: RunOptions) -> Result<CommandStatus>;

    fn query(&self, command: &GitCommand) -> Result<CommandOutput>;

    /// Execute and map a nonzero exit to [`GitHelperError::CommandFailed`].
    fn run(&self, command: &GitCommand, opts: RunOptions) -> Result<()> {
        let status = self.execute(command, opts)?;
        if status.is_success() {
            Ok(())
        } else {
            Err(GitHelperError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Runs commands as real child processes in a fixed working directory.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    pub fn new<P: AsRef<Path>>(cwd: P) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Build the process, failing up front if the working directory is gone.
    ///
    /// A missing `current_dir` surfaces from spawn as `NotFound`, which would
    /// otherwise read as a missing executable.
    fn command(&self, command: &GitCommand) -> Result<Command> {
        if !self.cwd.is_dir() {
            return Err(GitHelperError::Environment(format!(
                "directory '{}' does not exist",
                self.cwd.display()
            )));
        }
        let mut cmd = Command::new(command.program());
        cmd.current_dir(&self.cwd).args(command.args());
        Ok(cmd)
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, command: &GitCommand, opts: RunOptions) -> Result<CommandStatus> {
        if opts.dry_run {
            println!("[dry-run] {}", command);
            return Ok(CommandStatus::success());
        }
        if opts.verbose {
            println!("+ {}", command);
        }

        let status = self
            .command(command)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(command, e))?;

        debug!(command = %command, code = ?status.code(), "command finished");
        Ok(status.into())
    }

    fn query(&self, command: &GitCommand) -> Result<CommandOutput> {
        let output = self
            .command(command)?
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(command, e))?;

        let output = CommandOutput::from_output(&output);
        debug!(command = %command, code = ?output.status.code(), "query finished");
        Ok(output)
    }
}

fn spawn_error(command: &GitCommand, e: std::io::Error) -> GitHelperError {
    if command.program() == "git" && e.kind() == ErrorKind::NotFound {
        GitHelperError::Environment(
            "git executable not found. Install git and make sure it is on PATH.".to_string(),
        )
    } else {
        GitHelperError::CommandFailed {
            command: format!("{} ({})", command, e),
            code: None,
        }
    }
}
