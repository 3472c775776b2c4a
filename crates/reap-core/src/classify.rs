//! Rebase outcome classification.
//!
//! git's exit status does not reliably separate "stopped on a conflict"
//! from "failed for some other reason", so the combined output text is
//! scanned for markers instead. Any marker match means the rebase is
//! paused and must be aborted, whatever the exit status said. Only when
//! nothing matches does the exit status decide between clean and fatal.

use reap_git::ProcessResult;

/// Classification of one rebase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The rebase finished without intervention.
    Clean,
    /// The rebase stopped mid-way and must be rolled back.
    Conflicted,
    /// The rebase failed for a reason unrelated to a conflict.
    Fatal,
}

/// One branch's pass through a rebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseAttempt {
    pub branch: String,
    pub outcome: Outcome,
    pub raw_output: String,
}

/// A named predicate over rebase output that signals a paused rebase.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    name: &'static str,
    matches: fn(&str) -> bool,
}

impl Marker {
    /// Create a marker from a name and a predicate.
    #[must_use]
    pub const fn new(name: &'static str, matches: fn(&str) -> bool) -> Self {
        Self { name, matches }
    }

    /// Short identifier used in diagnostics and tests.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check whether `output` carries this marker.
    #[must_use]
    pub fn matches(&self, output: &str) -> bool {
        (self.matches)(output)
    }
}

fn conflict_with_abort_hint(output: &str) -> bool {
    output.contains("CONFLICT") && output.contains("abort")
}

fn conflicts_fixed_uncommitted(output: &str) -> bool {
    output.to_ascii_lowercase().contains("all conflicts fixed")
}

fn commit_not_written(output: &str) -> bool {
    let lower = output.to_ascii_lowercase();
    [
        "could not write commit",
        "unable to write commit",
        "failed to write commit object",
    ]
    .iter()
    .any(|phrase| lower.contains(phrase))
}

// Emitted by the sequencer even when advice hints are switched off.
fn conflict_could_not_apply(output: &str) -> bool {
    output.contains("CONFLICT") && output.contains("could not apply")
}

/// The marker set used when nothing else is configured.
#[must_use]
pub fn default_markers() -> Vec<Marker> {
    vec![
        Marker::new("conflict-with-abort-hint", conflict_with_abort_hint),
        Marker::new("conflicts-fixed-uncommitted", conflicts_fixed_uncommitted),
        Marker::new("commit-not-written", commit_not_written),
        Marker::new("conflict-could-not-apply", conflict_could_not_apply),
    ]
}

/// Ordered list of markers applied to rebase output.
#[derive(Debug, Clone)]
pub struct Classifier {
    markers: Vec<Marker>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_markers())
    }
}

impl Classifier {
    /// Create a classifier from an explicit marker list.
    #[must_use]
    pub const fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// Append a marker, checked after the existing ones.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// The markers in the order they are checked.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The first marker found in `output`, if any.
    #[must_use]
    pub fn matching_marker(&self, output: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.matches(output))
    }

    /// Classify the result of a `git rebase` invocation.
    #[must_use]
    pub fn classify(&self, result: &ProcessResult) -> Outcome {
        if self.matching_marker(&result.output).is_some() {
            Outcome::Conflicted
        } else if result.success {
            Outcome::Clean
        } else {
            Outcome::Fatal
        }
    }
}
