//! Subprocess execution utilities.
//!
//! External tools are run through the [`Executor`] trait so the build pipeline
//! can be driven by a recording executor in tests.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the working directory, if set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Get the extra environment variables.
    pub fn get_envs(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd
    }

    /// Display the command for logs and error messages.
    ///
    /// Arguments containing spaces are wrapped in single quotes.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| {
            if a.contains(' ') {
                format!("'{}'", a)
            } else {
                a.clone()
            }
        }));
        parts.join(" ")
    }
}

/// Error from running an external tool.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with exit code {}", display_code(.code))]
    NonZeroExit { command: String, code: Option<i32> },
}

impl ProcessError {
    /// Exit code this error should propagate to the driver's own exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessError::NonZeroExit { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// Result of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run an external process to completion.
pub trait Executor {
    /// Run the command, blocking until it exits.
    fn execute(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutcome, ProcessError>;

    /// Run the command and turn a non-zero exit into [`ProcessError::NonZeroExit`].
    fn execute_checked(&mut self, cmd: &ProcessBuilder) -> Result<(), ProcessError> {
        let outcome = self.execute(cmd)?;
        if !outcome.success() {
            return Err(ProcessError::NonZeroExit {
                command: cmd.display_command(),
                code: outcome.code,
            });
        }
        Ok(())
    }
}

/// Executor that spawns real processes with inherited stdio.
///
/// The tools' own output reaches the terminal unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutcome, ProcessError> {
        let status = cmd
            .build_command()
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: cmd.get_program().display().to_string(),
                source,
            })?;
        Ok(ProcessOutcome {
            code: status.code(),
        })
    }
}
