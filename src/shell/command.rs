//! External command execution.
//!
//! Every subprocess this crate starts goes through a [`CommandRunner`].
//! Probes and git queries describe what to run with a [`CommandSpec`] and
//! get back a [`CommandResult`] holding the captured streams and exit code;
//! parsing never touches process mechanics.

use crate::error::{Result, VersionError};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program invocation: program name, argument list, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,

    /// Arguments, passed verbatim (no shell).
    pub args: Vec<String>,

    /// Working directory (None = inherit).
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Command line as a single string, for logs and errors.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or never started).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            success: false,
        }
    }

    /// Result standing in for a command that could not be started.
    pub fn not_run() -> Self {
        Self::failure(None, "", "")
    }

    /// Attach a measured duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Runs external commands and captures their output.
pub trait CommandRunner {
    /// Run `spec` to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit is not an error; only a failure to start the
    /// process is.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Runner backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        execute(spec)
    }
}

/// Execute a command directly, without a shell.
pub fn execute(spec: &CommandSpec) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|_| VersionError::CommandFailed {
        command: spec.display(),
        code: None,
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let result = if output.status.success() {
        CommandResult::success(stdout, stderr)
    } else {
        CommandResult::failure(output.status.code(), stdout, stderr)
    };

    Ok(result.with_duration(duration))
}

/// Run a command, folding spawn failures into an empty [`CommandResult`].
///
/// Version probes treat "binary missing" the same as "binary printed
/// nothing", so callers get a result either way.
pub fn capture(runner: &dyn CommandRunner, spec: &CommandSpec) -> CommandResult {
    tracing::debug!("Running `{}`", spec.display());
    match runner.run(spec) {
        Ok(result) => {
            tracing::debug!(
                "`{}` exited with {:?} in {:?}",
                spec.display(),
                result.exit_code,
                result.duration
            );
            result
        }
        Err(e) => {
            tracing::debug!("{}", e);
            CommandResult::not_run()
        }
    }
}
