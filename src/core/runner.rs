//! External command execution.
//!
//! Every interaction with the deployment CLI and git goes through the
//! [`Runner`] trait so the pipeline can be driven against a real system,
//! a dry run, or a scripted fake in tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;
use zeroize::Zeroize;

use crate::error::Result;

/// Exit status reported when a program could not be started at all.
pub const SPAWN_FAILED: i32 = 127;

/// Where a command's output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    /// Collect stdout/stderr for inspection.
    Capture,
    /// Let the command write straight to the operator's terminal.
    Inherit,
}

/// A single external command to run.
pub struct Invocation {
    program: String,
    args: Vec<String>,
    stream: Stream,
    redacted: Vec<usize>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stream: Stream::Capture,
            redacted: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an argument that carries a secret.
    ///
    /// It is masked in [`Display`](fmt::Display) output and wiped when the
    /// invocation is dropped.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.redacted.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    /// Stream output to the terminal instead of capturing it.
    pub fn inherit(mut self) -> Self {
        self.stream = Stream::Inherit;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.redacted.contains(&i) {
                match arg.split_once('=') {
                    Some((key, _)) => write!(f, " {}=***", key)?,
                    None => f.write_str(" ***")?,
                }
            } else if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invocation({})", self)
    }
}

impl Drop for Invocation {
    fn drop(&mut self) {
        for i in &self.redacted {
            if let Some(arg) = self.args.get_mut(*i) {
                arg.zeroize();
            }
        }
    }
}

/// What a finished command reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Exit status; `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    /// A successful outcome with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed outcome with the given status and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Last non-empty line of stderr, for error messages.
    pub fn reason(&self) -> String {
        self.stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| match self.code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            })
    }
}

/// Executes external commands.
pub trait Runner {
    /// Whether `program` can be found on PATH (or at the given path).
    fn locate(&self, program: &str) -> bool;

    /// Run a command to completion.
    ///
    /// A non-zero exit is reported through [`Outcome`], not as an error.
    fn run(&self, invocation: &Invocation) -> Result<Outcome>;
}

/// Runs commands on the local system in a fixed working directory.
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl Runner for SystemRunner {
    fn locate(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        debug!(command = %invocation, cwd = %self.cwd.display(), "running");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(&self.cwd);

        let result = match invocation.stream {
            Stream::Capture => cmd.stdin(Stdio::null()).output().map(|output| Outcome {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Stream::Inherit => cmd.status().map(|status| Outcome {
                code: status.code(),
                ..Outcome::default()
            }),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Outcome::failed(SPAWN_FAILED, format!("{}: {}", invocation.program, e))
            }
            Err(e) => return Err(e.into()),
        };

        debug!(command = %invocation, code = ?outcome.code, "finished");
        Ok(outcome)
    }
}

/// Pretends every command succeeds without running anything.
///
/// Program lookup still hits the real PATH so a dry run reports the same
/// preflight problems a real run would.
pub struct DryRun;

impl Runner for DryRun {
    fn locate(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        debug!(command = %invocation, "dry run");
        Ok(Outcome::ok(""))
    }
}
