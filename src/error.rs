use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures of an external tool invocation.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("`{command}` did not finish within {}s", .limit.as_secs())]
    DeadlineExceeded { command: String, limit: Duration },
}

/// Conditions that must hold before the cluster is touched.
#[derive(Error, Debug)]
pub enum PreconditionError {
    #[error("no project identifier: pass --project, set target.project_id, DEPLOYCTL_PROJECT_ID, or run `gcloud config set project`")]
    ProjectUnresolved,

    #[error("static address '{name}' not found in project {project}")]
    StaticAddressMissing { name: String, project: String },

    #[error("no cluster connection: {0}")]
    ClusterUnreachable(String),

    #[error("seed secret variable {0} is not set")]
    SeedVariableMissing(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid image reference '{0}'")]
    ImageReference(String),

    #[error("invalid image pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error with the name of the stage it aborted.
    #[must_use]
    pub fn in_stage(self, stage: &'static str) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
