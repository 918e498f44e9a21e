//! Git invocations used to publish code.

use crate::core::runner::{Invocation, Outcome};

/// The version-control executable.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Git {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Stage every change in the working tree.
    pub fn add_all(&self) -> Invocation {
        Invocation::new(&self.program).args(["add", "."])
    }

    /// Machine-readable working tree status.
    pub fn status(&self) -> Invocation {
        Invocation::new(&self.program).args(["status", "--porcelain"])
    }

    /// Whether a [`Git::status`] outcome lists anything to commit.
    pub fn has_changes(outcome: &Outcome) -> bool {
        outcome.stdout.lines().any(|l| !l.trim().is_empty())
    }

    pub fn commit(&self, message: &str) -> Invocation {
        Invocation::new(&self.program).args(["commit", "-m", message])
    }

    /// Push the current HEAD to `branch` on `remote`.
    pub fn push(&self, remote: &str, branch: &str) -> Invocation {
        Invocation::new(&self.program)
            .args(["push", remote])
            .arg(format!("HEAD:{}", branch))
            .inherit()
    }
}
