//! Progress reporting for a run.

use reap_core::{Disposition, ProgressSink, Recovery, RunSummary};

use crate::output;

/// Prints progress to the terminal as branches are handled.
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    /// Print the closing line of a completed run.
    pub fn finish(&self, summary: &RunSummary) {
        if summary.total() == 0 {
            output::success(&format!(
                "Nothing to do - back on {}",
                output::branch(&summary.base)
            ));
            return;
        }

        output::success(&format!(
            "Done: {} pruned, {} kept, {} skipped - back on {}",
            summary.pruned.len(),
            summary.kept.len(),
            summary.skipped.len(),
            output::branch(&summary.base)
        ));
    }
}

impl ProgressSink for Reporter {
    fn run_started(&mut self, base: &str, topics: &[String]) {
        output::info(&format!("Rebasing branches onto: {}", output::branch(base)));
        if topics.is_empty() {
            output::info("No topic branches to process");
        } else {
            output::detail(&format!("  {} to check", output::count(topics.len(), "branch")));
        }
    }

    fn branch_started(&mut self, branch: &str) {
        output::detail(&format!("Checking {} ...", output::branch(branch)));
    }

    fn branch_finished(&mut self, branch: &str, disposition: Disposition) {
        let name = output::branch(branch);
        match disposition {
            Disposition::Pruned => {
                output::success(&format!("{name} has no content left - deleted"));
            }
            Disposition::Kept => output::info(&format!("{name} has content - kept")),
            Disposition::Skipped => {
                output::warn(&format!("{name} could not rebase cleanly, rolled back"));
            }
        }
    }

    fn recovery(&mut self, base: &str, recovery: &Recovery) {
        match recovery {
            Recovery::ReturnedToBase => {
                output::info(&format!("Returned to {}", output::branch(base)));
            }
            Recovery::LeftInPlace => {
                output::warn("A rebase is still in progress; working tree left as is");
                output::detail("  Inspect with `git status`, then `git rebase --abort`");
            }
            Recovery::CheckoutFailed(cause) => {
                output::warn(&format!("Could not return to {}: {cause}", output::branch(base)));
            }
        }
    }
}
