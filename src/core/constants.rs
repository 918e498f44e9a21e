//! Constants used throughout hoist.
//!
//! Centralizes magic strings and default settings.

/// Project configuration file name (.hoist.toml).
pub const CONFIG_FILE: &str = ".hoist.toml";

/// Default secrets file name (.env).
pub const ENV_FILE: &str = ".env";

/// Default deployment CLI.
pub const DEFAULT_CLI: &str = "heroku";

/// Default version-control executable.
pub const DEFAULT_GIT: &str = "git";

/// Git remote the deployment CLI wires up for an app.
pub const DEFAULT_REMOTE: &str = "heroku";

/// Remote branch that triggers a build.
pub const DEFAULT_BRANCH: &str = "main";

/// Commit message used when publishing.
pub const DEFAULT_MESSAGE: &str = "Deploy to Heroku";

/// Process type that runs the bot's message loop.
pub const DEFAULT_PROCESS: &str = "worker";

/// One-off command installing the browser the scrapers drive.
pub const DEFAULT_POST_DEPLOY: &str = "playwright install chromium";

/// Secrets the bot refuses to start without.
pub const REQUIRED_SECRETS: &[&str] = &[
    "TELEGRAM_BOT_TOKEN",
    "OPENAI_API_KEY",
    "NOTION_API_KEY",
    "NOTION_DATABASE_ID",
];
