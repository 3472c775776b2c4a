//! Scripted gateway for testing orchestration without a real repository.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};

use reap_git::{ProcessGateway, ProcessResult, Result as GitResult};

/// Mock implementation of `ProcessGateway`.
///
/// Commands are keyed by their space-joined arguments. Unscripted
/// commands succeed with empty output. A successful `checkout <name> --`
/// moves the tracked current branch.
pub struct MockGateway {
    pub responses: RefCell<HashMap<String, VecDeque<ProcessResult>>>,
    pub spawn_failures: RefCell<HashSet<String>>,
    pub calls: RefCell<Vec<String>>,
    pub current_branch: RefCell<String>,
    pub rebasing: Cell<bool>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            spawn_failures: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            current_branch: RefCell::new("main".to_string()),
            rebasing: Cell::new(false),
        }
    }

    /// Queue a response for the next invocation of `command`.
    pub fn with_response(self, command: &str, result: ProcessResult) -> Self {
        self.responses
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// Make `command` fail to spawn.
    pub fn with_spawn_failure(self, command: &str) -> Self {
        self.spawn_failures.borrow_mut().insert(command.to_string());
        self
    }

    /// Report a rebase in progress until an abort succeeds.
    pub fn with_rebasing(self, rebasing: bool) -> Self {
        self.rebasing.set(rebasing);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn current_branch(&self) -> String {
        self.current_branch.borrow().clone()
    }
}

impl ProcessGateway for MockGateway {
    fn run(&self, args: &[&str]) -> GitResult<ProcessResult> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());

        if self.spawn_failures.borrow().contains(&command) {
            return Err(reap_git::Error::Spawn {
                program: "git".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        let result = self
            .responses
            .borrow_mut()
            .get_mut(&command)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| ProcessResult::new("", true));

        if result.success {
            match args {
                ["checkout", branch, "--"] => {
                    *self.current_branch.borrow_mut() = (*branch).to_string();
                }
                ["rebase", "--abort"] => self.rebasing.set(false),
                _ => {}
            }
        }

        Ok(result)
    }

    fn rebase_in_progress(&self) -> bool {
        self.rebasing.get()
    }
}
