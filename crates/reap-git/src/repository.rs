//! Repository handle: the working tree root, its git2 view and the
//! `git` executable bound to it.

use std::path::{Path, PathBuf};

use git2::{BranchType, RepositoryState};

use crate::error::{Error, Result};
use crate::gateway::{GitCommand, ProcessGateway, ProcessResult};
use crate::head;

/// A repository rooted exactly at a working tree directory.
///
/// The branch HEAD points at is resolved once, when the repository is
/// opened, and is not re-read afterwards.
pub struct Repository {
    root: PathBuf,
    head: String,
    inner: git2::Repository,
    git: GitCommand,
}

impl Repository {
    /// Open the repository whose root is `path`.
    ///
    /// Unlike `git` itself this performs no upward search: `path` must
    /// contain the `.git` metadata directory directly.
    ///
    /// # Errors
    /// - [`Error::NotARepository`] if `path` has no `.git/HEAD`.
    /// - [`Error::UnreadableHead`] / [`Error::UnparsableHead`] if HEAD
    ///   cannot be read or is not on a branch.
    /// - [`Error::Open`] if the metadata cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let head = head::resolve_head(&root)?;

        let inner = git2::Repository::open(&root).map_err(|source| Error::Open {
            path: root.clone(),
            source,
        })?;
        let git = GitCommand::new("git", &root);
        Ok(Self {
            root,
            head,
            inner,
            git,
        })
    }

    /// Open the repository rooted at the current directory.
    ///
    /// # Errors
    /// Returns error if the current directory is not a repository root.
    pub fn open_current() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(Error::WorkingDirectory)?;
        Self::open(cwd)
    }

    /// Replace the command used to invoke git.
    #[must_use]
    pub fn with_git(mut self, git: GitCommand) -> Self {
        self.git = git;
        self
    }

    /// Get the path to the working tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if there's a rebase in progress.
    #[must_use]
    pub fn is_rebasing(&self) -> bool {
        matches!(
            self.inner.state(),
            RepositoryState::Rebase
                | RepositoryState::RebaseInteractive
                | RepositoryState::RebaseMerge
                | RepositoryState::ApplyMailboxOrRebase
        )
    }

    // === Branch operations ===

    /// Get the branch HEAD pointed at when the repository was opened.
    #[must_use]
    pub fn head_branch(&self) -> &str {
        &self.head
    }

    /// List all local branches, including nested names like `feature/x/y`.
    ///
    /// # Errors
    /// Returns [`Error::BranchEnumeration`] if the reference database
    /// cannot be read.
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let branches = self
            .inner
            .branches(Some(BranchType::Local))
            .map_err(Error::BranchEnumeration)?;

        let mut names = Vec::new();
        for entry in branches {
            let (branch, _) = entry.map_err(Error::BranchEnumeration)?;
            if let Some(name) = branch.name().map_err(Error::BranchEnumeration)? {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }
}

impl ProcessGateway for Repository {
    fn run(&self, args: &[&str]) -> Result<ProcessResult> {
        self.git.output(args)
    }

    fn rebase_in_progress(&self) -> bool {
        self.is_rebasing()
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field("head", &self.head)
            .field("git", &self.git.program())
            .finish()
    }
}
