//! Exit code constants for the githelper CLI.
//!
//! - 0: Success
//! - 2: Invalid arguments (bad branch name, missing message)
//! - 3: Config error (an explicitly named config file could not be read)
//! - 4: Environment error (git not found, not inside a repository)
//! - 5: Blocked by policy (protected branch, confirmation declined)
//! - 6: Operation failed (conflict, push rejection, any nonzero git exit)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Invalid arguments: branch name rejected by policy or a required value missing.
pub const INVALID_ARGUMENTS: i32 = 2;

/// Config error: the file passed with `--config` could not be read.
pub const CONFIG_ERROR: i32 = 3;

/// Environment error: `git` is not installed or the directory is not a repository.
pub const ENVIRONMENT_ERROR: i32 = 4;

/// Blocked by policy: a protected-branch confirmation was declined.
pub const BLOCKED: i32 = 5;

/// Operation failed: a git subprocess exited nonzero.
pub const OPERATION_FAILED: i32 = 6;
