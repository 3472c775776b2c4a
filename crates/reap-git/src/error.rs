//! Error types for reap-git.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting or driving a repository.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory has no `.git` metadata directly inside it.
    #[error("not at the root of a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// HEAD exists but could not be read.
    #[error("unable to read current branch: {0}")]
    UnreadableHead(#[source] std::io::Error),

    /// HEAD is detached or does not hold a symbolic branch ref.
    #[error("unable to parse branch name from HEAD: {0:?}")]
    UnparsableHead(String),

    /// Local branches could not be listed.
    #[error("unable to list local branches: {0}")]
    BranchEnumeration(#[source] git2::Error),

    /// The current directory could not be determined.
    #[error("unable to determine the current directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// HEAD parsed but the repository metadata could not be opened.
    #[error("unable to open repository at {}: {source}", .path.display())]
    Open {
        /// Working tree root.
        path: PathBuf,
        /// Underlying git2 error.
        #[source]
        source: git2::Error,
    },

    /// The git executable could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
