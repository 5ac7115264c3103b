//! Handler for the `config` command group, plus the parse-error rendering
//! shared by every other handler.

use std::fs;
use std::path::Path;

use super::diagnostic::ConfigDiagnostic;
use super::operator::{operator, read_config_toml};
use super::output;
use crate::domain::StageKind;
use crate::error::{ConfigError, Error, Result};
use crate::port::inbound::operator::configuration::ConfigView;
use crate::port::inbound::operator::deployment::TargetRequest;

/// Default config template with documentation.
pub(crate) const CONFIG_TEMPLATE: &str = include_str!("../../../../deploy.toml.example");

/// Render a TOML parse failure against the text it came from.
///
/// The error is passed through unchanged; when toml reported a location the
/// offending excerpt is printed first.
pub fn explain<T>(result: Result<T>, target: &TargetRequest) -> Result<T> {
    render_parse_error(result, &target.config_path, &target.config_toml)
}

fn render_parse_error<T>(result: Result<T>, path: &Path, content: &str) -> Result<T> {
    match result {
        Err(Error::Config(ConfigError::Parse(err))) => {
            let name = path.display().to_string();
            if let Some(diag) = ConfigDiagnostic::from_toml(&name, content, &err) {
                output::diagnostic(miette::Report::new(diag));
            }
            Err(ConfigError::Parse(err).into())
        }
        other => other,
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} for your project and domain", path.display()));
    output::note(&format!("2. Run: deployctl check -c {}", path.display()));
    output::note(&format!("3. Run: deployctl deploy --build -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let content = read_config_toml(path)?;
    let view = render_parse_error(operator()?.show_config(&content, path), path, &content)?;

    if output::is_json() {
        output::json_output(show_json(&view));
        return Ok(());
    }

    output::section("Target");
    output::field(
        "Project",
        view.target.project_id.as_deref().unwrap_or("(auto-detect)"),
    );
    output::field("Domain", &view.target.domain);
    output::field("Namespace", &view.target.namespace);
    output::field("Static IP", &view.target.static_ip_name);

    output::section("Images");
    output::field("Registry", &view.images.registry);
    if let Some(repository) = &view.images.repository {
        output::field("Repository", repository);
    }
    output::field("Tag", &view.images.tag);
    output::field("Strategy", view.images.strategy);
    for image in &view.images.images {
        output::field(
            image.role.as_str(),
            format!("{} ({})", image.name, image.context.display()),
        );
    }

    output::section("Stages");
    let secret_name = view.seed_secret.as_ref().map(|secret| secret.name.as_str());
    for stage in &view.stages {
        let files: Vec<String> = stage
            .manifests
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        let detail = match (&stage.selector, stage.kind) {
            (Some(selector), _) => format!("{} [wait {selector}]", files.join(", ")),
            (None, StageKind::Secrets) => secret_name.unwrap_or_default().to_string(),
            (None, _) => files.join(", "),
        };
        output::field(stage.kind.as_str(), detail);
    }

    output::section("Readiness");
    output::field("Timeout", format!("{}s", view.readiness_timeout_secs));

    output::section("Status");
    output::field("Settle", format!("{}s", view.settle_secs));
    output::field("Ingress", &view.ingress);
    output::field("Certificate", &view.certificate);

    output::section("Seed Secret");
    match &view.seed_secret {
        Some(secret) => {
            output::field("Name", &secret.name);
            output::field("Keys", secret.keys.join(", "));
        }
        None => output::field("Enabled", "no"),
    }

    Ok(())
}

fn show_json(view: &ConfigView) -> serde_json::Value {
    serde_json::json!({
        "target": {
            "project_id": view.target.project_id,
            "domain": view.target.domain,
            "namespace": view.target.namespace,
            "static_ip_name": view.target.static_ip_name,
        },
        "images": {
            "registry": view.images.registry,
            "repository": view.images.repository,
            "tag": view.images.tag,
            "strategy": view.images.strategy,
        },
        "stages": view.stages.iter().map(|stage| stage.kind).collect::<Vec<_>>(),
        "readiness_timeout_secs": view.readiness_timeout_secs,
        "settle_secs": view.settle_secs,
        "secrets_enabled": view.seed_secret.is_some(),
    })
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let content = read_config_toml(path)?;
    let report = render_parse_error(operator()?.validate_config(&content, path), path, &content)?;
    output::success("Config file is valid");

    if !report.warnings.is_empty() {
        output::section("Warnings");
        for warning in &report.warnings {
            output::warning(warning);
        }
    }

    output::hint(&format!("deployctl config show -c {}", path.display()));
    Ok(())
}
