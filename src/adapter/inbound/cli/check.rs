//! Handler for the `check` command.

use super::command::TargetArgs;
use super::dispatch::{self, Session};
use super::operator::operator;
use super::{config, output};
use crate::error::Result;

/// Verify every precondition of a rollout without changing anything.
pub async fn execute(args: &TargetArgs) -> Result<()> {
    let target = dispatch::target_request(args)?;
    let session = Session::start();

    output::section("Preflight");
    let report = operator()?.check(&target, session.notifier()).await;
    session.finish();
    let report = config::explain(report, &target)?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "target": report.target,
            "static_address": report.static_address,
            "cluster": report.cluster,
            "seed_secret": report.seed_secret.as_ref().map(|secret| &secret.name),
        }));
        return Ok(());
    }

    if let Some(secret) = &report.seed_secret {
        output::field(
            "Seed secret",
            format!("{} ({} keys)", secret.name, secret.entries.len()),
        );
    }
    output::success("Ready to deploy");
    output::hint(&format!("deployctl deploy --build -c {}", args.config.display()));
    Ok(())
}
