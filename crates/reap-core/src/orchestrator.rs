//! The rebase-and-prune loop.
//!
//! Each topic branch is driven through checkout, rebase, classification
//! and then either abort (conflicted), halt (fatal) or a diff against the
//! base that decides whether the branch is kept or pruned. Branches are
//! handled strictly one at a time since they share one working tree.

use reap_git::{ProcessGateway, ProcessResult};

use crate::classify::{Classifier, Outcome, RebaseAttempt};
use crate::error::{Error, Result};
use crate::prune::prune_branch;

/// What happened to a topic branch that was handled without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Rebased cleanly and still differs from the base.
    Kept,
    /// Rebased cleanly, no difference left, deleted.
    Pruned,
    /// Rebase conflicted and was rolled back; branch untouched.
    Skipped,
}

/// Result of the best-effort return to base after a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// The base branch was checked out again.
    ReturnedToBase,
    /// A rebase is still in progress, so the tree was left alone.
    LeftInPlace,
    /// Checking out the base failed as well.
    CheckoutFailed(String),
}

/// Receives progress as the run advances.
///
/// All methods default to doing nothing.
pub trait ProgressSink {
    /// Called once the base branch and work set are known.
    fn run_started(&mut self, _base: &str, _topics: &[String]) {}

    /// Called before a branch is checked out.
    fn branch_started(&mut self, _branch: &str) {}

    /// Called after a branch has been handled.
    fn branch_finished(&mut self, _branch: &str, _disposition: Disposition) {}

    /// Called after a fatal error, before the run halts.
    fn recovery(&mut self, _base: &str, _recovery: &Recovery) {}
}

/// Branches handled by a completed run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub base: String,
    pub pruned: Vec<String>,
    pub kept: Vec<String>,
    pub skipped: Vec<String>,
}

impl RunSummary {
    fn record(&mut self, branch: &str, disposition: Disposition) {
        let list = match disposition {
            Disposition::Kept => &mut self.kept,
            Disposition::Pruned => &mut self.pruned,
            Disposition::Skipped => &mut self.skipped,
        };
        list.push(branch.to_string());
    }

    /// Total number of branches handled.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pruned.len() + self.kept.len() + self.skipped.len()
    }
}

/// Remove the base branch and duplicates from an enumeration, keeping
/// first-seen order.
#[must_use]
pub fn topic_branches(branches: Vec<String>, base: &str) -> Vec<String> {
    let mut topics: Vec<String> = Vec::with_capacity(branches.len());
    for branch in branches {
        if branch != base && !topics.contains(&branch) {
            topics.push(branch);
        }
    }
    topics
}

/// Full ref name for a local branch, so a tag of the same name is never
/// picked instead.
fn qualified(branch: &str) -> String {
    format!("refs/heads/{branch}")
}

/// Drives topic branches through rebase and prune against one base.
pub struct Orchestrator<'a, G: ProcessGateway + ?Sized> {
    git: &'a G,
    classifier: &'a Classifier,
    base: String,
}

impl<'a, G: ProcessGateway + ?Sized> Orchestrator<'a, G> {
    /// Create an orchestrator rebasing onto `base`.
    #[must_use]
    pub fn new(git: &'a G, classifier: &'a Classifier, base: impl Into<String>) -> Self {
        Self {
            git,
            classifier,
            base: base.into(),
        }
    }

    /// Handle every branch in order, then check out the base.
    ///
    /// The base branch is ignored if present. On the first fatal error
    /// the loop stops; the base is checked out again only if no rebase
    /// is left in progress, and the error is returned.
    ///
    /// # Errors
    /// Returns the fatal error that halted the run.
    pub fn run(&self, branches: &[String], sink: &mut dyn ProgressSink) -> Result<RunSummary> {
        let mut summary = RunSummary {
            base: self.base.clone(),
            ..RunSummary::default()
        };

        for branch in branches.iter().filter(|b| **b != self.base) {
            sink.branch_started(branch);
            match self.process_branch(branch) {
                Ok(disposition) => {
                    summary.record(branch, disposition);
                    sink.branch_finished(branch, disposition);
                }
                Err(err) => {
                    let recovery = self.recover();
                    sink.recovery(&self.base, &recovery);
                    return Err(err);
                }
            }
        }

        self.checkout(&self.base)?;
        Ok(summary)
    }

    /// Take one branch from checkout to its final disposition.
    ///
    /// # Errors
    /// Returns error on any fatal condition for this branch.
    pub fn process_branch(&self, branch: &str) -> Result<Disposition> {
        self.checkout(branch)?;

        let attempt = self.rebase(branch)?;
        match attempt.outcome {
            Outcome::Fatal => Err(Error::RebaseFatalFailure {
                branch: attempt.branch,
                cause: ProcessResult::new(attempt.raw_output, false).summary(),
            }),
            Outcome::Conflicted => {
                self.abort(branch)?;
                Ok(Disposition::Skipped)
            }
            Outcome::Clean => {
                self.checkout(&self.base)?;
                if self.has_content(branch)? {
                    Ok(Disposition::Kept)
                } else {
                    prune_branch(self.git, branch)?;
                    Ok(Disposition::Pruned)
                }
            }
        }
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let checkout_failure = |cause: String| Error::CheckoutFailure {
            branch: branch.to_string(),
            cause,
        };

        let result = self
            .git
            .run(&["checkout", branch, "--"])
            .map_err(|e| checkout_failure(e.to_string()))?;

        if result.success {
            Ok(())
        } else {
            Err(checkout_failure(result.summary()))
        }
    }

    fn rebase(&self, branch: &str) -> Result<RebaseAttempt> {
        let upstream = qualified(&self.base);
        let result = self
            .git
            .run(&["rebase", upstream.as_str()])
            .map_err(|e| Error::RebaseFatalFailure {
                branch: branch.to_string(),
                cause: e.to_string(),
            })?;

        Ok(RebaseAttempt {
            branch: branch.to_string(),
            outcome: self.classifier.classify(&result),
            raw_output: result.output,
        })
    }

    fn abort(&self, branch: &str) -> Result<()> {
        let abort_failure = |cause: String| Error::AbortFailure {
            branch: branch.to_string(),
            cause,
        };

        let result = self
            .git
            .run(&["rebase", "--abort"])
            .map_err(|e| abort_failure(e.to_string()))?;

        if result.success {
            Ok(())
        } else {
            Err(abort_failure(result.summary()))
        }
    }

    fn has_content(&self, branch: &str) -> Result<bool> {
        let diff_failure = |cause: String| Error::DiffFailure {
            branch: branch.to_string(),
            cause,
        };
        let (base, tip) = (qualified(&self.base), qualified(branch));

        let result = self
            .git
            .run(&["diff", base.as_str(), tip.as_str(), "--"])
            .map_err(|e| diff_failure(e.to_string()))?;

        // Ambiguity warnings land in the same output and are not content.
        if result.success {
            Ok(result
                .output
                .lines()
                .map(str::trim)
                .any(|line| !line.is_empty() && !line.starts_with("warning:")))
        } else {
            Err(diff_failure(result.summary()))
        }
    }

    fn recover(&self) -> Recovery {
        if self.git.rebase_in_progress() {
            return Recovery::LeftInPlace;
        }

        match self.checkout(&self.base) {
            Ok(()) => Recovery::ReturnedToBase,
            Err(e) => Recovery::CheckoutFailed(e.to_string()),
        }
    }
}
