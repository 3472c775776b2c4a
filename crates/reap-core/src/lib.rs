//! # reap-core
//!
//! Rebases every topic branch onto the base branch and prunes the ones
//! left with no difference from it. Classification of rebase output
//! lives in [`classify`], the per-branch loop in [`orchestrator`].

pub mod classify;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod prune;

#[cfg(test)]
mod test_mocks;

pub use classify::{Classifier, Marker, Outcome, RebaseAttempt};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use orchestrator::{
    Disposition, Orchestrator, ProgressSink, Recovery, RunSummary, topic_branches,
};

use reap_git::Repository;

/// Take the base branch from HEAD, enumerate topic branches and process them.
///
/// # Errors
/// Returns the first fatal condition encountered; see [`Error`].
pub fn run(
    repo: &Repository,
    config: &RunConfig,
    sink: &mut dyn ProgressSink,
) -> Result<RunSummary> {
    let base = repo.head_branch();
    let topics = topic_branches(repo.list_branches()?, base);

    sink.run_started(base, &topics);
    Orchestrator::new(repo, &config.classifier, base).run(&topics, sink)
}
