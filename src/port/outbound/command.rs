//! External program execution port.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CommandError, Result};

/// One external program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Written to the child's stdin, then stdin is closed.
    pub stdin: Option<String>,
    /// Hard upper bound on the call; the child is killed when it elapses.
    pub deadline: Option<Duration>,
    /// Arguments carry secret material and must not be logged.
    pub sensitive: bool,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
            deadline: None,
            sensitive: false,
        }
    }

    #[must_use]
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// True when the program and leading arguments equal `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        let mut parts =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        prefix.iter().all(|expected| parts.next() == Some(*expected))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        if self.sensitive {
            if let Some(first) = self.args.first() {
                write!(f, " {first}")?;
            }
            return f.write_str(" [arguments redacted]");
        }
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[must_use]
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Trimmed stdout, or `None` when it is blank.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        let trimmed = self.stdout.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Runs an external program and captures its output.
///
/// A non-zero exit is not an error at this level; use
/// [`CommandRunner::run_checked`] to turn it into one.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Run and fail on any non-zero exit.
    async fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let output = self.run(invocation).await?;
        if output.is_success() {
            return Ok(output);
        }
        Err(CommandError::Failed {
            command: invocation.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        }
        .into())
    }
}
