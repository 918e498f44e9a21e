//! Pipeline stage names and outcomes.

use std::fmt;

/// A named step of a deployment, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preflight,
    Auth,
    Resolve,
    Target,
    Secrets,
    Publish,
    Scale,
    PostDeploy,
    Complete,
}

impl Stage {
    /// Stable lowercase name used in output and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Preflight => "preflight",
            Stage::Auth => "auth",
            Stage::Resolve => "resolve",
            Stage::Target => "target",
            Stage::Secrets => "secrets",
            Stage::Publish => "publish",
            Stage::Scale => "scale",
            Stage::PostDeploy => "post-deploy",
            Stage::Complete => "complete",
        }
    }

    /// Whether a failure here ends the run no matter the failure policy.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Stage::Preflight | Stage::Auth | Stage::Resolve | Stage::Target
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a stage ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Skipped(String),
}
