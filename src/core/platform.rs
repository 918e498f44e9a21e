//! Heroku CLI command surface.
//!
//! Builds the invocations the pipeline runs against the deployment CLI and
//! interprets the few outcomes whose meaning goes beyond success/failure.

use crate::core::domain::{Lookup, Secret, Target};
use crate::core::runner::{Invocation, Outcome};

/// Stderr fragments the CLI prints when an app does not exist.
const MISSING_MARKERS: &[&str] = &["couldn't find that app", "not found"];

/// The deployment CLI, addressed by program name or path.
#[derive(Debug, Clone)]
pub struct Platform {
    program: String,
}

impl Platform {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn cmd(&self, subcommand: &str) -> Invocation {
        Invocation::new(&self.program).arg(subcommand)
    }

    /// `auth:whoami`: succeeds only with a valid session.
    pub fn whoami(&self) -> Invocation {
        self.cmd("auth:whoami")
    }

    /// `apps:info`: metadata query used as an existence check.
    pub fn info(&self, target: &Target) -> Invocation {
        self.cmd("apps:info").args(["--app", target.as_str()])
    }

    /// Interpret the outcome of [`Platform::info`].
    ///
    /// Returns `None` when the query failed for a reason other than the app
    /// not existing, such as a network or permission error.
    pub fn classify_lookup(outcome: &Outcome) -> Option<Lookup> {
        if outcome.success() {
            return Some(Lookup::Found);
        }

        let stderr = outcome.stderr.to_lowercase();
        if MISSING_MARKERS.iter().any(|m| stderr.contains(m)) {
            Some(Lookup::Missing)
        } else {
            None
        }
    }

    /// `apps:create`, also wiring the git remote.
    pub fn create(&self, target: &Target, remote: &str) -> Invocation {
        self.cmd("apps:create")
            .arg(target.as_str())
            .args(["--remote", remote])
            .inherit()
    }

    /// `git:remote`: point the local remote at an existing app.
    pub fn wire_remote(&self, target: &Target, remote: &str) -> Invocation {
        self.cmd("git:remote")
            .args(["--app", target.as_str(), "--remote", remote])
    }

    /// `config:set` for a single secret.
    ///
    /// Output is captured because the CLI echoes the value back.
    pub fn set_config(&self, target: &Target, secret: &Secret) -> Invocation {
        self.cmd("config:set")
            .secret_arg(format!("{}={}", secret.key(), secret.value()))
            .args(["--app", target.as_str()])
    }

    /// `ps:scale`: absolute process count, not an increment.
    pub fn scale(&self, target: &Target, process: &str, count: u32) -> Invocation {
        self.cmd("ps:scale")
            .arg(format!("{}={}", process, count))
            .args(["--app", target.as_str()])
    }

    /// `run`: one-off dyno executing `command`.
    pub fn run(&self, target: &Target, command: &str) -> Invocation {
        self.cmd("run")
            .args(["--app", target.as_str()])
            .arg(command)
            .inherit()
    }

    /// Command for following the app's logs.
    pub fn logs_hint(&self, target: &Target) -> String {
        format!("{} logs --tail --app {}", self.program, target)
    }

    /// Commands an operator runs by hand to set `keys` without a secrets file.
    pub fn config_examples(&self, target: &Target, keys: &[String]) -> Vec<String> {
        keys.iter()
            .map(|key| format!("{} config:set {}=... --app {}", self.program, key, target))
            .collect()
    }
}
