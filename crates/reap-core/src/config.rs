//! Run configuration.
//!
//! reap reads no configuration file; these are the built-in defaults the
//! binary uses, kept in one place so tests can swap pieces out.

use std::path::Path;

use reap_git::GitCommand;

use crate::classify::Classifier;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Program used to invoke git.
    pub git_program: String,

    /// Environment set on every git invocation.
    pub git_env: Vec<(String, String)>,

    /// Markers used to recognise a paused rebase.
    pub classifier: Classifier,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            git_env: vec![
                // Markers are matched against English output.
                ("LC_ALL".to_string(), "C".to_string()),
                ("LANGUAGE".to_string(), "C".to_string()),
                ("GIT_EDITOR".to_string(), "true".to_string()),
            ],
            classifier: Classifier::default(),
        }
    }
}

impl RunConfig {
    /// Build the git command runner for a repository rooted at `root`.
    #[must_use]
    pub fn git_command(&self, root: &Path) -> GitCommand {
        self.git_env
            .iter()
            .fold(GitCommand::new(&self.git_program, root), |git, (k, v)| {
                git.env(k, v)
            })
    }
}
