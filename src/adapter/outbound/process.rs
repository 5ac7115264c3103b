//! Process-backed command runner.
//!
//! Spawns the program directly (no shell), captures stdout/stderr and
//! enforces the invocation's deadline. The child is killed if the deadline
//! elapses or the future is dropped.

use std::io;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{CommandError, Result};
use crate::port::{CommandOutput, CommandRunner, Invocation};

/// Runs invocations as child processes of this one, from the current
/// directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, "Spawning");
        let started = Instant::now();

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| CommandError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        // Stdin is fed while output drains; the deadline bounds both.
        let pipe = child.stdin.take();
        let input = invocation.stdin.as_deref();
        let feed = async move {
            let (Some(input), Some(mut pipe)) = (input, pipe) else {
                return Ok(());
            };
            match pipe.write_all(input.as_bytes()).await {
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("Child closed stdin before reading all input");
                    Ok(())
                }
                other => other,
            }
            // `pipe` drops here, so the child sees EOF.
        };
        let exchange = async {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            let output = output?;
            fed?;
            Ok::<_, io::Error>(output)
        };

        let output = match invocation.deadline {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(command = %invocation, limit_secs = limit.as_secs(), "Deadline exceeded, killing");
                    return Err(CommandError::DeadlineExceeded {
                        command: invocation.to_string(),
                        limit,
                    }
                    .into());
                }
            },
            None => exchange.await?,
        };

        // Terminated by signal has no code.
        let code = output.status.code().unwrap_or(-1);
        debug!(
            command = %invocation,
            code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Finished"
        );

        Ok(CommandOutput {
            code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
