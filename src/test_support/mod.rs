//! Test utilities and mocks for skbuild unit tests.
//!
//! Provides a recording [`Executor`] so the build pipeline can be exercised
//! without launching gn or ninja.
//!
//! # Example
//!
//! ```rust,ignore
//! use skbuild::test_support::{MockExecutor, MockProcessOutput};
//!
//! #[test]
//! fn test_example() {
//!     let mut exec = MockExecutor::new();
//!     exec.expect_prefix("ninja", MockProcessOutput::failure(1, "FAILED"));
//!     exec.set_default(MockProcessOutput::success());
//!
//!     // Pass `&mut exec` to the pipeline...
//! }
//! ```

use std::io;

use crate::util::process::{Executor, ProcessBuilder, ProcessError, ProcessOutcome};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output.
    pub fn success() -> Self {
        MockProcessOutput {
            status: 0,
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stderr: stderr.into(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success()
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
struct CommandExpectation {
    pattern: CommandPattern,
    output: MockProcessOutput,
}

/// Mock process executor.
///
/// Records every command line it is asked to run (as rendered by
/// [`ProcessBuilder::display_command`]) and answers with the output of the
/// first matching expectation.
#[derive(Debug, Default)]
pub struct MockExecutor {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
    default_output: Option<MockProcessOutput>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.push(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.push(CommandPattern::Contains(substring.to_string()), output)
    }

    fn push(&mut self, pattern: CommandPattern, output: MockProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation { pattern, output });
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }
}

impl Executor for MockExecutor {
    fn execute(&mut self, cmd: &ProcessBuilder) -> Result<ProcessOutcome, ProcessError> {
        let full_cmd = cmd.display_command();
        self.calls.push(full_cmd.clone());

        let output = self
            .expectations
            .iter()
            .find(|exp| exp.pattern.matches(&full_cmd))
            .map(|exp| &exp.output)
            .or(self.default_output.as_ref())
            .ok_or_else(|| ProcessError::Spawn {
                program: cmd.get_program().display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, format!("unexpected command: {}", full_cmd)),
            })?;

        if !output.stderr.is_empty() {
            tracing::debug!("mock stderr: {}", output.stderr);
        }

        Ok(ProcessOutcome {
            code: Some(output.status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_matching() {
        let mut exec = MockExecutor::new();
        exec.expect("ninja -C out", MockProcessOutput::failure(2, "boom"));

        let outcome = exec.execute(&ProcessBuilder::new("ninja").args(["-C", "out"])).unwrap();
        assert_eq!(outcome.code, Some(2));

        let err = exec.execute(&ProcessBuilder::new("gn")).unwrap_err();
        assert!(err.to_string().contains("gn"));
        assert_eq!(exec.calls(), &["ninja -C out", "gn"]);
    }
}
