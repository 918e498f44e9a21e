//! Error types for hoist.
//!
//! Every failure carries enough context for the operator to act on it.
//! Preflight and configuration problems exit with status 1; stage failures
//! propagate the exit status of the command that failed.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::domain::Stage;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error(transparent)]
    Secrets(#[from] SecretsError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Stage and lookup failures keep the status of the failing command;
    /// everything else is a plain `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Stage(StageError { code, .. }) | Error::Lookup(LookupError { code, .. }) => {
                match code {
                    Some(code) if *code != 0 => *code,
                    _ => 1,
                }
            }
            _ => 1,
        }
    }

    /// Remediation hint shown under the error message, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::Preflight(PreflightError::CliMissing { program }) if program == "heroku" => {
                Some("install it: https://devcenter.heroku.com/articles/heroku-cli".to_string())
            }
            Error::Preflight(PreflightError::CliMissing { program }) => {
                Some(format!("install {} or point --cli at it", program))
            }
            Error::Preflight(PreflightError::GitMissing { .. }) => {
                Some("install git: https://git-scm.com/downloads".to_string())
            }
            Error::Preflight(PreflightError::Unauthenticated { program, .. }) => {
                Some(format!("run: {} login", program))
            }
            Error::Config(ConfigError::Parse { .. }) => Some("fix .hoist.toml".to_string()),
            Error::Lookup(_) => {
                Some("lookup failed for a reason other than a missing app; not creating".into())
            }
            _ => None,
        }
    }
}

/// Project configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Hard preconditions checked before any remote work.
#[derive(Error, Debug)]
pub enum PreflightError {
    #[error("{program} CLI not found on PATH")]
    CliMissing { program: String },

    #[error("{program} not found on PATH")]
    GitMissing { program: String },

    #[error("not logged in to {program}: {detail}")]
    Unauthenticated { program: String, detail: String },
}

/// Secrets file errors.
#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("app name cannot be empty")]
    EmptyTarget,

    #[error("invalid app name '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },

    #[error("secret key cannot be empty")]
    EmptyKey,

    #[error("invalid secret key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

/// The app lookup failed without saying the app is missing.
#[derive(Error, Debug)]
#[error("lookup of {app} failed{}: {detail}", code.map(|c| format!(" (exit {})", c)).unwrap_or_default())]
pub struct LookupError {
    pub app: String,
    pub code: Option<i32>,
    pub detail: String,
}

/// A pipeline stage whose external command failed.
#[derive(Error, Debug)]
#[error("{stage} failed{}: {detail}", code.map(|c| format!(" (exit {})", c)).unwrap_or_default())]
pub struct StageError {
    pub stage: Stage,
    pub code: Option<i32>,
    pub detail: String,
}

impl StageError {
    pub fn new(stage: Stage, code: Option<i32>, detail: impl Into<String>) -> Self {
        Self {
            stage,
            code,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
