//! Command-line interface definitions.
//!
//! Defines the `deployctl` command surface using `clap`: the full
//! `deploy` rollout, its standalone steps (`patch`, `check`, `status`) and
//! configuration management.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::BuildStrategy;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Build, patch, apply and report a Kubernetes deployment
#[derive(Parser, Debug)]
#[command(name = "deployctl")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build (optionally), patch, apply and report a full rollout
    Deploy(DeployArgs),

    /// Point manifests at the resolved image references without applying
    Patch(PatchArgs),

    /// Report ingress address and certificate state
    Status(TargetArgs),

    /// Verify project, static address, cluster and seed variables
    Check(TargetArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `deployctl config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a commented configuration template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file.
    Validate(ConfigPathArg),
}

/// Build strategy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    /// Build with the local docker daemon and push
    Local,
    /// Build with Cloud Build
    Remote,
}

impl From<StrategyArg> for BuildStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Local => BuildStrategy::Local,
            StrategyArg::Remote => BuildStrategy::Remote,
        }
    }
}

/// Shared argument struct for commands that need only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Configuration path plus project override.
#[derive(Parser, Debug)]
pub struct TargetArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Cloud project (auto-detected when omitted).
    #[arg(long)]
    pub project: Option<String>,
}

/// Arguments for `deployctl deploy`.
#[derive(Parser, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Build and push images before applying.
    #[arg(long)]
    pub build: bool,

    /// Build strategy (overrides `images.strategy`).
    #[arg(long, value_enum, requires = "build")]
    pub strategy: Option<StrategyArg>,

    /// Image tag (overrides `images.tag`).
    #[arg(long)]
    pub tag: Option<String>,

    /// Skip the post-rollout status report.
    #[arg(long)]
    pub skip_status: bool,
}

/// Arguments for `deployctl patch`.
#[derive(Parser, Debug)]
pub struct PatchArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Image tag (overrides `images.tag`).
    #[arg(long)]
    pub tag: Option<String>,
}

/// Arguments for `deployctl config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the template.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}
