use crate::confirm::Confirmer;
use crate::error::Result;
use crate::runner::{CommandOutput, CommandRunner, CommandStatus, GitCommand, RunOptions};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Changes the process working directory until dropped.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; pair with #[serial].
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// A working repo plus a bare `origin` carrying `main` and `dev`.
///
/// Returns `(work, remote)`; keep both alive for the duration of the test.
pub(crate) fn create_test_repo_with_remote() -> (TempDir, TempDir) {
    let remote = TempDir::new().unwrap();
    git(remote.path(), &["init", "--bare"]);
    git(remote.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);

    let work = create_test_repo();
    let path = work.path();
    git(path, &["branch", "dev"]);

    let remote_str = remote.path().to_string_lossy().to_string();
    git(path, &["remote", "add", "origin", &remote_str]);
    git(path, &["push", "--quiet", "origin", "main", "dev"]);
    git(path, &["fetch", "--quiet", "origin"]);

    (work, remote)
}

/// Commit a file in `repo` with the given content.
pub(crate) fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(repo.join(name), content).unwrap();
    git(repo, &["add", name]);
    git(repo, &["commit", "--quiet", "-m", message]);
}

/// Run git in `repo_dir`, panicking on failure. Returns trimmed stdout.
pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Test double for [`CommandRunner`].
///
/// Queries are answered from a script keyed by the unquoted command line
/// (`"git show-ref --verify --quiet refs/heads/x"`); unscripted queries fail
/// with exit code 1 and empty output. Executed commands are recorded and
/// succeed unless scripted to fail.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    queries: HashMap<String, CommandOutput>,
    failures: HashMap<String, i32>,
    pub(crate) executed: RefCell<Vec<String>>,
    pub(crate) queried: RefCell<Vec<String>>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, line: &str, stdout: &str) -> Self {
        self.queries.insert(
            line.to_string(),
            CommandOutput {
                status: CommandStatus::success(),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub(crate) fn respond_code(mut self, line: &str, code: i32) -> Self {
        self.queries.insert(
            line.to_string(),
            CommandOutput {
                status: CommandStatus::from_code(code),
                stdout: String::new(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Script `line` to exit with `code` when executed.
    pub(crate) fn fail_on(mut self, line: &str, code: i32) -> Self {
        self.failures.insert(line.to_string(), code);
        self
    }

    /// Repository on `branch` with no local/remote extras.
    pub(crate) fn on_branch(self, branch: &str) -> Self {
        self.respond("git symbolic-ref --quiet --short HEAD", branch)
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    pub(crate) fn ran(&self, line: &str) -> bool {
        self.executed.borrow().iter().any(|l| l == line)
    }

    pub(crate) fn ran_starting_with(&self, prefix: &str) -> bool {
        self.executed.borrow().iter().any(|l| l.starts_with(prefix))
    }
}

fn line_of(command: &GitCommand) -> String {
    std::iter::once(command.program())
        .chain(command.args().iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

impl CommandRunner for RecordingRunner {
    fn execute(&self, command: &GitCommand, opts: RunOptions) -> Result<CommandStatus> {
        if opts.dry_run {
            return Ok(CommandStatus::success());
        }
        let line = line_of(command);
        let status = match self.failures.get(&line) {
            Some(code) => CommandStatus::from_code(*code),
            None => CommandStatus::success(),
        };
        self.executed.borrow_mut().push(line);
        Ok(status)
    }

    fn query(&self, command: &GitCommand) -> Result<CommandOutput> {
        let line = line_of(command);
        self.queried.borrow_mut().push(line.clone());
        Ok(self.queries.get(&line).cloned().unwrap_or(CommandOutput {
            status: CommandStatus::from_code(1),
            stdout: String::new(),
            stderr: String::new(),
        }))
    }
}

/// Confirmer with a fixed answer that counts how often it was asked.
pub(crate) struct FixedConfirmer {
    answer: bool,
    pub(crate) asked: Cell<usize>,
}

impl FixedConfirmer {
    pub(crate) fn yes() -> Self {
        Self {
            answer: true,
            asked: Cell::new(0),
        }
    }

    pub(crate) fn no() -> Self {
        Self {
            answer: false,
            asked: Cell::new(0),
        }
    }
}

impl Confirmer for FixedConfirmer {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer)
    }
}
