//! Configuration management.
//!
//! Reads the optional `.hoist.toml` project file and merges it with
//! command-line overrides into the [`Settings`] a deployment runs with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.hoist.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub deploy: DeploySection,
    pub worker: WorkerSection,
    pub secrets: SecretsSection,
}

/// `[deploy]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeploySection {
    /// Default app name; when set, no prompt is shown
    pub app: Option<String>,
    pub cli: String,
    pub git: String,
    pub remote: String,
    pub branch: String,
    pub env_file: PathBuf,
    pub message: String,
    /// One-off commands run on the app after the worker is scaled
    pub post_deploy: Vec<String>,
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            app: None,
            cli: constants::DEFAULT_CLI.to_string(),
            git: constants::DEFAULT_GIT.to_string(),
            remote: constants::DEFAULT_REMOTE.to_string(),
            branch: constants::DEFAULT_BRANCH.to_string(),
            env_file: PathBuf::from(constants::ENV_FILE),
            message: constants::DEFAULT_MESSAGE.to_string(),
            post_deploy: vec![constants::DEFAULT_POST_DEPLOY.to_string()],
        }
    }
}

/// `[worker]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerSection {
    pub process: String,
    pub count: u32,
}

impl Default for WorkerSection {
    fn default() -> Self {
        Self {
            process: constants::DEFAULT_PROCESS.to_string(),
            count: 1,
        }
    }
}

/// `[secrets]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsSection {
    /// Keys the bot needs at startup
    pub required: Vec<String>,
    /// Rewrite Notion ids into dashed form before provisioning
    pub format_ids: bool,
}

impl Default for SecretsSection {
    fn default() -> Self {
        Self {
            required: constants::REQUIRED_SECRETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            format_ids: false,
        }
    }
}

impl Config {
    /// Load configuration from `.hoist.toml` in `dir`
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be used.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(constants::CONFIG_FILE);
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration contents
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first bad field.
    pub fn validate(&self) -> Result<()> {
        let non_empty = [
            ("deploy.cli", &self.deploy.cli),
            ("deploy.git", &self.deploy.git),
            ("deploy.remote", &self.deploy.remote),
            ("deploy.branch", &self.deploy.branch),
            ("deploy.message", &self.deploy.message),
            ("worker.process", &self.worker.process),
        ];
        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "cannot be empty".to_string(),
                }
                .into());
            }
        }

        if self.deploy.post_deploy.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "deploy.post_deploy",
                reason: "commands cannot be empty".to_string(),
            }
            .into());
        }

        if let Some(app) = &self.deploy.app {
            crate::core::validation::validate_target(app).map_err(|e| {
                ConfigError::InvalidValue {
                    field: "deploy.app",
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}

/// Values given on the command line, overriding the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub app: Option<String>,
    pub cli: Option<String>,
    pub git: Option<String>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub env_file: Option<PathBuf>,
    pub message: Option<String>,
    pub format_ids: bool,
    pub keep_going: bool,
}

/// What to do when a non-fatal stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing stage.
    Halt,
    /// Report the failure and move on to the next stage.
    Continue,
}

/// Fully resolved settings for one deployment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Working directory every command runs in
    pub dir: PathBuf,
    pub app: Option<String>,
    pub cli: String,
    pub git: String,
    pub remote: String,
    pub branch: String,
    pub env_file: PathBuf,
    pub message: String,
    pub process: String,
    pub count: u32,
    pub post_deploy: Vec<String>,
    pub required: Vec<String>,
    pub format_ids: bool,
    pub policy: FailurePolicy,
}

impl Settings {
    /// Merge `config` with `overrides`; overrides win.
    pub fn resolve(dir: impl Into<PathBuf>, config: Config, overrides: Overrides) -> Self {
        let dir = dir.into();
        let deploy = config.deploy;

        let env_file = overrides.env_file.unwrap_or(deploy.env_file);
        let env_file = if env_file.is_absolute() {
            env_file
        } else {
            dir.join(env_file)
        };

        Self {
            app: overrides.app.or(deploy.app),
            cli: overrides.cli.unwrap_or(deploy.cli),
            git: overrides.git.unwrap_or(deploy.git),
            remote: overrides.remote.unwrap_or(deploy.remote),
            branch: overrides.branch.unwrap_or(deploy.branch),
            env_file,
            message: overrides.message.unwrap_or(deploy.message),
            process: config.worker.process,
            count: config.worker.count,
            post_deploy: deploy.post_deploy,
            required: config.secrets.required,
            format_ids: overrides.format_ids || config.secrets.format_ids,
            policy: if overrides.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Halt
            },
            dir,
        }
    }

    /// Load `.hoist.toml` from `dir` and resolve it against `overrides`.
    pub fn load(dir: impl Into<PathBuf>, overrides: Overrides) -> Result<Self> {
        let dir = dir.into();
        let config = Config::load(&dir)?;
        let settings = Self::resolve(dir, config, overrides);
        settings.validate()?;
        Ok(settings)
    }

    /// Re-check the merged values; flags never went through [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first empty value.
    pub fn validate(&self) -> Result<()> {
        let non_empty = [
            ("cli", &self.cli),
            ("git", &self.git),
            ("remote", &self.remote),
            ("branch", &self.branch),
            ("message", &self.message),
        ];
        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "cannot be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
