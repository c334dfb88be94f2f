//! External command execution.
//!
//! Provides a thin wrapper around subprocess invocation so the detector does
//! not need to deal with `std::process::Command` directly. Lookup and
//! execution are separate steps: callers check availability first and only
//! run programs that were found. Children see only the variables the caller
//! passes, never the inherited process environment.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program does not exist at the given path.
    #[error("command not found: {}", program.display())]
    NotFound {
        /// The program that was requested.
        program: PathBuf,
    },

    /// The program exists but could not be spawned.
    #[error("failed to execute {}: {source}", program.display())]
    Spawn {
        /// The program that was requested.
        program: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The command exited with a non-zero status.
    #[error("command failed (exit code {code:?}): {stderr}")]
    Failed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },
}

/// A specialized `Result` type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

// ---------------------------------------------------------------------------
// Runner trait
// ---------------------------------------------------------------------------

/// Locates and runs external programs.
pub trait CommandRunner {
    /// Finds `program` in `search_path` (a `PATH`-style list).
    ///
    /// Returns `None` if the program is not available.
    fn locate(&self, program: &str, search_path: Option<&OsStr>) -> Option<PathBuf>;

    /// Runs `program` with `args` and exactly the variables in `envs`,
    /// returning trimmed stdout on success.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] if the program vanished,
    /// [`CommandError::Spawn`] on other spawn failures, or
    /// [`CommandError::Failed`] on a non-zero exit status.
    fn run(&self, program: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<String>;
}

/// Runs real subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match which::which_in(program, search_path, cwd) {
            Ok(path) => Some(path),
            Err(err) => {
                debug!(program, error = %err, "program not found on search path");
                None
            }
        }
    }

    fn run(&self, program: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<String> {
        debug!(program = %program.display(), ?args, vars = envs.len(), "running external command");
        let output = Command::new(program)
            .args(args)
            .env_clear()
            .envs(envs.iter().copied())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => CommandError::NotFound {
                    program: program.to_path_buf(),
                },
                _ => CommandError::Spawn {
                    program: program.to_path_buf(),
                    source,
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CommandError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(stdout)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
