//! Command dispatch and per-command wiring.

use std::sync::Arc;

use super::command::{Cli, ColorChoice, Commands, ConfigCommand, TargetArgs};
use super::output::{self, OutputConfig};
use super::progress::CliNotifier;
use super::{check, config, deploy, operator, patch, status};
use crate::error::Result;
use crate::port::inbound::operator::deployment::TargetRequest;
use crate::port::{LogNotifier, Notifier, NotifierRegistry};

/// Apply the global flags: output mode and color.
pub fn configure(cli: &Cli) {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    if cli.json {
        owo_colors::set_override(false);
    }
}

/// Run the selected subcommand.
pub async fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Deploy(args) => deploy::execute(args).await,
        Commands::Patch(args) => patch::execute(args).await,
        Commands::Status(args) => status::execute(args).await,
        Commands::Check(args) => check::execute(args).await,
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}

/// Progress rendering for one command, fanned out alongside the log.
pub struct Session {
    progress: Arc<CliNotifier>,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    #[must_use]
    pub fn start() -> Self {
        let progress = Arc::new(CliNotifier::new());
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(LogNotifier));
        registry.register(Box::new(Arc::clone(&progress)));

        Self {
            notifier: Arc::new(registry),
            progress,
        }
    }

    #[must_use]
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// Stop any spinner left running by the last event.
    pub fn finish(&self) {
        self.progress.clear();
    }
}

/// Read the configuration named by `args` into an operator request.
pub fn target_request(args: &TargetArgs) -> Result<TargetRequest> {
    Ok(TargetRequest {
        config_toml: operator::read_config_toml(&args.config)?,
        config_path: args.config.clone(),
        project: args.project.clone(),
        verbosity: output::verbosity(),
    })
}
