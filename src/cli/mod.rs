//! Command-line interface.

pub mod completions;
pub mod deploy;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

/// Hoist - deploy the bot worker to Heroku.
#[derive(Parser, Debug)]
#[command(
    name = "hoist",
    about = "Deploy the bot worker to Heroku: secrets, code, worker, browser deps",
    version,
    after_help = "Settings can also live in .hoist.toml. Logs: HOIST_LOG=debug"
)]
pub struct Cli {
    /// App name (prompted for when omitted)
    pub app: Option<String>,

    /// Secrets file to provision from
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Deployment CLI executable
    #[arg(long, env = "HOIST_CLI", value_name = "PROGRAM")]
    pub cli: Option<String>,

    /// Git executable
    #[arg(long, env = "HOIST_GIT", value_name = "PROGRAM")]
    pub git: Option<String>,

    /// Git remote the app is pushed to
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Remote branch that triggers a build
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Commit message for the deploy commit
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Keep going after a failing stage instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Print what would run without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Normalise Notion ids (…_DATABASE_ID, …_PAGE_ID) to dashed form
    #[arg(long)]
    pub format_ids: bool,

    /// Show debug output and every command run
    #[arg(short, long)]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute the parsed command line, returning the process exit status.
pub fn execute(cli: Cli) -> crate::error::Result<i32> {
    if let Some(shell) = cli.completions {
        completions::execute(shell)?;
        return Ok(0);
    }

    deploy::execute(cli)
}
