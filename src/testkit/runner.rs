//! Scripted [`CommandRunner`] for exercising adapters and the pipeline
//! without `gcloud`, `docker` or `kubectl` installed.
//!
//! Rules are matched by command prefix (program followed by leading
//! arguments); the first matching rule wins. Invocations with no matching
//! rule succeed with empty output. Every invocation is recorded.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{CommandError, Result};
use crate::port::{CommandOutput, CommandRunner, Invocation};

/// What a matched rule does.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return this output immediately.
    Output(CommandOutput),
    /// Never finish on its own: honour the invocation's deadline if it has
    /// one, otherwise wait for `fallback`.
    Hang { fallback: Duration },
}

#[derive(Debug, Clone)]
struct Rule {
    prefix: Vec<String>,
    reply: Reply,
}

/// A mock runner with prefix-matched replies and a call log.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `output` to invocations starting with `prefix`.
    pub fn on(mut self, prefix: &[&str], output: CommandOutput) -> Self {
        self.rules.push(Rule {
            prefix: prefix.iter().map(|part| (*part).to_string()).collect(),
            reply: Reply::Output(output),
        });
        self
    }

    /// Invocations starting with `prefix` block until their deadline.
    pub fn hang_on(mut self, prefix: &[&str]) -> Self {
        self.rules.push(Rule {
            prefix: prefix.iter().map(|part| (*part).to_string()).collect(),
            reply: Reply::Hang {
                fallback: Duration::from_secs(3600),
            },
        });
        self
    }

    /// Snapshot of every invocation received so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    /// Recorded invocations starting with `prefix`.
    pub fn calls_matching(&self, prefix: &[&str]) -> Vec<Invocation> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Index of the first recorded invocation starting with `prefix`.
    pub fn position(&self, prefix: &[&str]) -> Option<usize> {
        self.calls.lock().iter().position(|call| call.starts_with(prefix))
    }

    fn reply_for(&self, invocation: &Invocation) -> Reply {
        self.rules
            .iter()
            .find(|rule| {
                let prefix: Vec<&str> = rule.prefix.iter().map(String::as_str).collect();
                invocation.starts_with(&prefix)
            })
            .map_or_else(
                || Reply::Output(CommandOutput::success("")),
                |rule| rule.reply.clone(),
            )
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.lock().push(invocation.clone());
        match self.reply_for(invocation) {
            Reply::Output(output) => Ok(output),
            Reply::Hang { fallback } => match invocation.deadline {
                Some(limit) => {
                    tokio::time::sleep(limit).await;
                    Err(CommandError::DeadlineExceeded {
                        command: invocation.to_string(),
                        limit,
                    }
                    .into())
                }
                None => {
                    tokio::time::sleep(fallback).await;
                    Ok(CommandOutput::failure(-1, "hung"))
                }
            },
        }
    }
}
