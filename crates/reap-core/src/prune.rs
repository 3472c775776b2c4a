//! Deletion of branches fully absorbed by the base.

use reap_git::ProcessGateway;

use crate::error::{Error, Result};

/// Force-delete `branch`.
///
/// Callers only reach this after a clean rebase left no difference from
/// the base, so the branch's commits are already represented there.
///
/// # Errors
/// Returns [`Error::DeleteFailure`] if git cannot be run or refuses.
pub fn prune_branch<G: ProcessGateway + ?Sized>(git: &G, branch: &str) -> Result<()> {
    let delete_failure = |cause: String| Error::DeleteFailure {
        branch: branch.to_string(),
        cause,
    };

    let result = git
        .run(&["branch", "-D", branch])
        .map_err(|e| delete_failure(e.to_string()))?;

    if result.success {
        Ok(())
    } else {
        Err(delete_failure(result.summary()))
    }
}
