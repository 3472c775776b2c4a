//! Error types for reap-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that halt a run.
///
/// Every variant is fatal. A conflicted rebase is not an error: it is
/// rolled back and reported through [`crate::ProgressSink`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Repository could not be located, its HEAD resolved, or its
    /// branches listed.
    #[error(transparent)]
    Git(#[from] reap_git::Error),

    /// A checkout did not complete.
    #[error("unable to check out '{branch}': {cause}")]
    CheckoutFailure { branch: String, cause: String },

    /// Rebase failed for a reason other than a conflict.
    #[error("unable to rebase '{branch}': {cause}")]
    RebaseFatalFailure { branch: String, cause: String },

    /// Rolling back a conflicted rebase failed; the tree is mid-rebase.
    #[error("unable to abort rebase of '{branch}': {cause}")]
    AbortFailure { branch: String, cause: String },

    /// Comparing the rebased branch against the base failed.
    #[error("unable to diff '{branch}' against base: {cause}")]
    DiffFailure { branch: String, cause: String },

    /// Deleting an absorbed branch failed.
    #[error("unable to delete '{branch}': {cause}")]
    DeleteFailure { branch: String, cause: String },
}

impl Error {
    /// The branch being handled when the error occurred, if any.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Git(_) => None,
            Self::CheckoutFailure { branch, .. }
            | Self::RebaseFatalFailure { branch, .. }
            | Self::AbortFailure { branch, .. }
            | Self::DiffFailure { branch, .. }
            | Self::DeleteFailure { branch, .. } => Some(branch),
        }
    }
}
