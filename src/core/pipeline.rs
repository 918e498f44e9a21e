//! Deployment pipeline.
//!
//! Runs the deployment as a fixed sequence of named stages:
//!
//! ```text
//! preflight → auth → resolve → target → secrets → publish → scale → post-deploy → complete
//! ```
//!
//! The first four stages are preconditions and always end the run when they
//! fail. The rest follow the configured [`FailurePolicy`].

use tracing::{debug, info, warn};

use crate::core::config::{FailurePolicy, Settings};
use crate::core::domain::{Lookup, SecretsFile, Stage, StageStatus, Target};
use crate::core::git::Git;
use crate::core::notion;
use crate::core::platform::Platform;
use crate::core::runner::{Invocation, Outcome, Runner};
use crate::error::{Error, LookupError, PreflightError, Result, StageError};

/// Something worth telling the operator mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Logged-in account reported by the CLI.
    Account(String),
    Created(Target),
    Reused(Target),
    SecretSet(String),
    /// No secrets file; these commands set the required secrets by hand.
    NoSecretsFile {
        path: String,
        examples: Vec<String>,
    },
    MissingRequired(Vec<String>),
    IdsFormatted(Vec<String>),
    NothingToCommit,
    /// A non-fatal stage failed and the run continues.
    Continuing(String),
    Deployed {
        logs: String,
    },
}

/// Receives pipeline progress.
pub trait Reporter {
    fn stage(&mut self, stage: Stage);
    fn command(&mut self, invocation: &Invocation);
    fn finished(&mut self, stage: Stage, status: &StageStatus);
    fn notice(&mut self, notice: Notice);
}

/// Supplies the app name when none was given.
pub trait Prompter {
    /// Block until the operator enters an app name.
    fn target(&mut self) -> Result<String>;
}

/// Result of a run that reached the `complete` stage.
#[derive(Debug)]
pub struct Summary {
    pub target: Target,
    /// Stages that failed under [`FailurePolicy::Continue`].
    pub failures: Vec<StageError>,
    /// Exit status of the last external command.
    pub last_status: i32,
}

impl Summary {
    /// Process exit status for the run.
    pub fn exit_code(&self) -> i32 {
        self.last_status
    }
}

/// A single deployment.
pub struct Pipeline<'a> {
    settings: &'a Settings,
    runner: &'a dyn Runner,
    platform: Platform,
    git: Git,
    last_status: i32,
}

impl<'a> Pipeline<'a> {
    pub fn new(settings: &'a Settings, runner: &'a dyn Runner) -> Self {
        Self {
            platform: Platform::new(&settings.cli),
            git: Git::new(&settings.git),
            settings,
            runner,
            last_status: 0,
        }
    }

    /// Run every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first precondition failure, the first stage failure under
    /// [`FailurePolicy::Halt`], or any error that is not a command failure
    /// (unreadable secrets file, io errors).
    pub fn run(
        &mut self,
        reporter: &mut dyn Reporter,
        prompter: &mut dyn Prompter,
    ) -> Result<Summary> {
        self.enter(reporter, Stage::Preflight);
        let status = self.preflight()?;
        reporter.finished(Stage::Preflight, &status);

        self.enter(reporter, Stage::Auth);
        let status = self.auth(reporter)?;
        reporter.finished(Stage::Auth, &status);

        self.enter(reporter, Stage::Resolve);
        let target = self.resolve(prompter)?;
        reporter.finished(Stage::Resolve, &StageStatus::Done);

        self.enter(reporter, Stage::Target);
        let status = self.target(reporter, &target)?;
        reporter.finished(Stage::Target, &status);

        let mut failures = Vec::new();
        for stage in [Stage::Secrets, Stage::Publish, Stage::Scale, Stage::PostDeploy] {
            self.enter(reporter, stage);

            let result = match stage {
                Stage::Secrets => self.secrets(reporter, &target),
                Stage::Publish => self.publish(reporter),
                Stage::Scale => self.scale(reporter, &target),
                _ => self.post_deploy(reporter, &target),
            };

            match result {
                Ok(status) => reporter.finished(stage, &status),
                Err(Error::Stage(e)) if self.keeps_going(stage) => {
                    warn!(stage = %stage, error = %e, "stage failed, continuing");
                    reporter.notice(Notice::Continuing(e.to_string()));
                    failures.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        self.enter(reporter, Stage::Complete);
        reporter.notice(Notice::Deployed {
            logs: self.platform.logs_hint(&target),
        });
        reporter.finished(Stage::Complete, &StageStatus::Done);

        Ok(Summary {
            target,
            failures,
            last_status: self.last_status,
        })
    }

    /// Whether a failure in `stage` is recorded rather than ending the run.
    fn keeps_going(&self, stage: Stage) -> bool {
        !stage.is_fatal() && self.settings.policy == FailurePolicy::Continue
    }

    fn enter(&self, reporter: &mut dyn Reporter, stage: Stage) {
        debug!(stage = %stage, "entering stage");
        reporter.stage(stage);
    }

    fn exec(&mut self, reporter: &mut dyn Reporter, invocation: &Invocation) -> Result<Outcome> {
        reporter.command(invocation);
        let outcome = self.runner.run(invocation)?;
        self.last_status = outcome.code.unwrap_or(1);
        Ok(outcome)
    }

    /// Run `invocation`, turning a non-zero exit into a failure of `stage`.
    fn check(
        &mut self,
        reporter: &mut dyn Reporter,
        stage: Stage,
        invocation: &Invocation,
    ) -> Result<Outcome> {
        let outcome = self.exec(reporter, invocation)?;
        if !outcome.success() {
            return Err(StageError::new(stage, outcome.code, outcome.reason()).into());
        }
        Ok(outcome)
    }

    /// Like [`Pipeline::check`], but a failure the policy lets through is
    /// recorded in `partial` under `label` and yields `None`.
    fn attempt(
        &mut self,
        reporter: &mut dyn Reporter,
        stage: Stage,
        invocation: &Invocation,
        label: &str,
        partial: &mut Partial,
    ) -> Result<Option<Outcome>> {
        match self.check(reporter, stage, invocation) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(Error::Stage(e)) if self.keeps_going(stage) => {
                warn!(stage = %stage, what = label, error = %e, "command failed, continuing");
                partial.record(label, &e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn preflight(&self) -> Result<StageStatus> {
        if !self.runner.locate(self.platform.program()) {
            return Err(PreflightError::CliMissing {
                program: self.platform.program().to_string(),
            }
            .into());
        }

        if !self.runner.locate(self.git.program()) {
            return Err(PreflightError::GitMissing {
                program: self.git.program().to_string(),
            }
            .into());
        }

        Ok(StageStatus::Done)
    }

    fn auth(&mut self, reporter: &mut dyn Reporter) -> Result<StageStatus> {
        let outcome = self.exec(reporter, &self.platform.whoami())?;
        if !outcome.success() {
            return Err(PreflightError::Unauthenticated {
                program: self.platform.program().to_string(),
                detail: outcome.reason(),
            }
            .into());
        }

        let account = outcome.stdout.trim();
        if !account.is_empty() {
            reporter.notice(Notice::Account(account.to_string()));
        }
        Ok(StageStatus::Done)
    }

    fn resolve(&self, prompter: &mut dyn Prompter) -> Result<Target> {
        let target = match &self.settings.app {
            Some(app) => Target::new(app)?,
            None => Target::new(prompter.target()?)?,
        };

        info!(app = %target, "target resolved");
        Ok(target)
    }

    fn target(&mut self, reporter: &mut dyn Reporter, target: &Target) -> Result<StageStatus> {
        let outcome = self.exec(reporter, &self.platform.info(target))?;

        match Platform::classify_lookup(&outcome) {
            Some(Lookup::Found) => {
                let wire = self.platform.wire_remote(target, &self.settings.remote);
                self.check(reporter, Stage::Target, &wire)?;
                reporter.notice(Notice::Reused(target.clone()));
            }
            Some(Lookup::Missing) => {
                info!(app = %target, "app not found, creating");
                let create = self.platform.create(target, &self.settings.remote);
                self.check(reporter, Stage::Target, &create)?;
                reporter.notice(Notice::Created(target.clone()));
            }
            None => {
                return Err(LookupError {
                    app: target.to_string(),
                    code: outcome.code,
                    detail: outcome.reason(),
                }
                .into());
            }
        }

        Ok(StageStatus::Done)
    }

    fn secrets(&mut self, reporter: &mut dyn Reporter, target: &Target) -> Result<StageStatus> {
        let settings = self.settings;
        let path = &settings.env_file;
        if !path.exists() {
            debug!(path = %path.display(), "no secrets file");
            reporter.notice(Notice::NoSecretsFile {
                path: path.display().to_string(),
                examples: self.platform.config_examples(target, &settings.required),
            });
            return Ok(StageStatus::Skipped("no secrets file".to_string()));
        }

        let mut file = SecretsFile::load(path)?;
        debug!(entries = file.len(), "secrets file loaded");

        if settings.format_ids {
            let changed = notion::normalize(&mut file);
            if !changed.is_empty() {
                reporter.notice(Notice::IdsFormatted(changed));
            }
        }

        let missing: Vec<String> = file
            .missing(&settings.required)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            reporter.notice(Notice::MissingRequired(missing));
        }

        if file.is_empty() {
            return Ok(StageStatus::Skipped("secrets file has no entries".to_string()));
        }

        let mut partial = Partial::default();
        for secret in file.entries() {
            let invocation = self.platform.set_config(target, secret);
            let key = secret.key();
            if self
                .attempt(reporter, Stage::Secrets, &invocation, key, &mut partial)?
                .is_some()
            {
                reporter.notice(Notice::SecretSet(key.to_string()));
            }
        }

        partial.finish(Stage::Secrets, "set")
    }

    fn publish(&mut self, reporter: &mut dyn Reporter) -> Result<StageStatus> {
        let settings = self.settings;
        let mut partial = Partial::default();

        let add = self.git.add_all();
        self.attempt(reporter, Stage::Publish, &add, "git add", &mut partial)?;

        let status = self.git.status();
        let status = self.attempt(reporter, Stage::Publish, &status, "git status", &mut partial)?;
        let dirty = match status {
            Some(outcome) => Git::has_changes(&outcome),
            // unknown tree state; let git decide whether there is anything to commit
            None => true,
        };

        if dirty {
            let commit = self.git.commit(&settings.message);
            self.attempt(reporter, Stage::Publish, &commit, "git commit", &mut partial)?;
        } else {
            debug!("working tree clean, skipping commit");
            reporter.notice(Notice::NothingToCommit);
        }

        let push = self.git.push(&settings.remote, &settings.branch);
        self.attempt(reporter, Stage::Publish, &push, "git push", &mut partial)?;

        partial.finish(Stage::Publish, "run")
    }

    fn scale(&mut self, reporter: &mut dyn Reporter, target: &Target) -> Result<StageStatus> {
        let scale = self
            .platform
            .scale(target, &self.settings.process, self.settings.count);
        self.check(reporter, Stage::Scale, &scale)?;
        Ok(StageStatus::Done)
    }

    fn post_deploy(
        &mut self,
        reporter: &mut dyn Reporter,
        target: &Target,
    ) -> Result<StageStatus> {
        let settings = self.settings;
        if settings.post_deploy.is_empty() {
            return Ok(StageStatus::Skipped("no post-deploy commands".to_string()));
        }

        let mut partial = Partial::default();
        for command in &settings.post_deploy {
            let run = self.platform.run(target, command);
            self.attempt(reporter, Stage::PostDeploy, &run, command, &mut partial)?;
        }

        partial.finish(Stage::PostDeploy, "run")
    }
}

/// Commands that failed inside a stage that kept going.
#[derive(Debug, Default)]
struct Partial {
    labels: Vec<String>,
    code: Option<i32>,
}

impl Partial {
    fn record(&mut self, label: &str, error: &StageError) {
        self.code = self.code.or(error.code);
        self.labels.push(label.to_string());
    }

    /// `Done` when nothing failed, otherwise one error for the whole stage.
    fn finish(self, stage: Stage, verb: &str) -> Result<StageStatus> {
        if self.labels.is_empty() {
            return Ok(StageStatus::Done);
        }

        let detail = format!("could not {} {}", verb, self.labels.join(", "));
        Err(StageError::new(stage, self.code, detail).into())
    }
}
