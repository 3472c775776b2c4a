//! Process gateway for invoking the `git` executable.
//!
//! Every operation that mutates the working tree (checkout, rebase,
//! abort, diff, branch deletion) goes through [`ProcessGateway::run`].
//! Callers get combined output text and the tool's own success flag and
//! nothing else; interpreting the text is left to them.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Combined output of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Standard output followed by standard error.
    pub output: String,
    /// Whether the process reported success.
    pub success: bool,
}

impl ProcessResult {
    /// Create a result from already-combined output.
    #[must_use]
    pub fn new(output: impl Into<String>, success: bool) -> Self {
        Self {
            output: output.into(),
            success,
        }
    }

    /// The most useful single line of output for a diagnostic.
    ///
    /// Prefers git's own `fatal:` / `error:` lines, falling back to the
    /// first non-empty line.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = self.output.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = lines.clone().next();

        lines
            .find(|l| l.starts_with("fatal:") || l.starts_with("error:"))
            .or(first)
            .map_or_else(|| "git reported failure".to_string(), String::from)
    }
}

/// Synchronous access to the version-control tool.
///
/// This trait is the seam between orchestration logic and the real
/// `git` executable, allowing a scripted gateway in tests.
#[allow(clippy::missing_errors_doc)]
pub trait ProcessGateway {
    /// Run git with the given arguments and wait for it to finish.
    ///
    /// Returns an error only if the process could not be run at all;
    /// a failing git command is reported through [`ProcessResult::success`].
    fn run(&self, args: &[&str]) -> Result<ProcessResult>;

    /// Check if the repository is in the middle of a rebase.
    fn rebase_in_progress(&self) -> bool;
}

/// A configured `git` executable bound to a working directory.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
    workdir: PathBuf,
    env: Vec<(String, String)>,
}

impl GitCommand {
    /// Create a command runner for `program` executing inside `workdir`.
    #[must_use]
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
            env: Vec::new(),
        }
    }

    /// Set an environment variable on every invocation.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The program being invoked.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The directory every invocation runs in.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run the program and capture combined output.
    ///
    /// # Errors
    /// Returns [`Error::Spawn`] if the process cannot be started.
    pub fn output(&self, args: &[&str]) -> Result<ProcessResult> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessResult {
            output: combined,
            success: output.status.success(),
        })
    }
}
