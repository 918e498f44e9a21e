//! Deploy command.
//!
//! Wires the terminal to the deployment pipeline: settings from flags and
//! `.hoist.toml`, a real or dry-run runner, styled progress output and the
//! app-name prompt.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Input;
use tracing::debug;

use crate::cli::{output, Cli};
use crate::core::config::{Overrides, Settings};
use crate::core::domain::{Stage, StageStatus};
use crate::core::pipeline::{Notice, Pipeline, Prompter, Reporter};
use crate::core::runner::{DryRun, Invocation, Runner, SystemRunner};
use crate::error::Result;

const PROMPT: &str = "App name";

/// Run a deployment, returning the process exit status.
pub fn execute(cli: Cli) -> Result<i32> {
    let dir = std::env::current_dir()?;
    let dry_run = cli.dry_run;
    let verbose = cli.verbose;

    let overrides = Overrides {
        app: cli.app,
        cli: cli.cli,
        git: cli.git,
        remote: cli.remote,
        branch: cli.branch,
        env_file: cli.env_file,
        message: cli.message,
        format_ids: cli.format_ids,
        keep_going: cli.keep_going,
    };
    let settings = Settings::load(dir, overrides)?;
    debug!(policy = ?settings.policy, dry_run, "settings resolved");

    let runner: Box<dyn Runner> = if dry_run {
        Box::new(DryRun)
    } else {
        Box::new(SystemRunner::new(&settings.dir))
    };

    let mut reporter = Terminal {
        show_commands: verbose || dry_run,
    };
    let summary = Pipeline::new(&settings, runner.as_ref())
        .run(&mut reporter, &mut Operator)?;

    if !summary.failures.is_empty() {
        output::warn(&format!(
            "{} stage(s) failed during deploy of {}",
            summary.failures.len(),
            summary.target
        ));
        for failure in &summary.failures {
            output::dimmed(&format!("  {}", failure));
        }
    }

    Ok(summary.exit_code())
}

/// Styled progress on stdout.
struct Terminal {
    show_commands: bool,
}

fn stage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::Preflight => "Checking tools",
        Stage::Auth => "Checking login",
        Stage::Resolve => "Resolving app",
        Stage::Target => "Preparing app",
        Stage::Secrets => "Setting secrets",
        Stage::Publish => "Publishing code",
        Stage::Scale => "Scaling worker",
        Stage::PostDeploy => "Running post-deploy commands",
        Stage::Complete => "Done",
    }
}

impl Reporter for Terminal {
    fn stage(&mut self, stage: Stage) {
        output::header(stage_title(stage));
    }

    fn command(&mut self, invocation: &Invocation) {
        if self.show_commands {
            output::dimmed(&format!("  $ {}", invocation));
        }
    }

    fn finished(&mut self, _stage: Stage, status: &StageStatus) {
        if let StageStatus::Skipped(reason) = status {
            output::dimmed(&format!("  skipped: {}", reason));
        }
    }

    fn notice(&mut self, notice: Notice) {
        match notice {
            Notice::Account(account) => output::kv("account", account),
            Notice::Created(target) => output::success(&format!("created app {}", target)),
            Notice::Reused(target) => output::success(&format!("using existing app {}", target)),
            Notice::SecretSet(key) => output::success(&format!("set {}", output::key(&key))),
            Notice::NoSecretsFile { path, examples } => {
                output::warn(&format!("no secrets file at {}", path));
                output::hint("set the required secrets yourself:");
                for example in examples {
                    output::command(&example);
                }
            }
            Notice::MissingRequired(keys) => {
                output::warn(&format!("secrets file is missing: {}", keys.join(", ")));
            }
            Notice::IdsFormatted(keys) => {
                output::hint(&format!("formatted Notion ids: {}", keys.join(", ")));
            }
            Notice::NothingToCommit => output::dimmed("  nothing to commit, pushing HEAD"),
            Notice::Continuing(reason) => output::warn(&format!("{} (continuing)", reason)),
            Notice::Deployed { logs } => {
                output::success("deployed");
                output::hint(&format!("follow logs: {}", logs));
            }
        }
    }
}

/// Asks the operator at the terminal, or reads one line from piped stdin.
struct Operator;

impl Prompter for Operator {
    fn target(&mut self) -> Result<String> {
        if io::stdin().is_terminal() {
            let name: String = Input::new()
                .with_prompt(PROMPT)
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("app name cannot be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            return Ok(name);
        }

        output::prompt(PROMPT);
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
