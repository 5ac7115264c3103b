//! Handler for the `deploy` command.

use super::command::DeployArgs;
use super::dispatch::{self, Session};
use super::operator::operator;
use super::{config, output, status};
use crate::error::Result;
use crate::port::inbound::operator::deployment::{DeployOutcome, DeployRequest};

/// Execute the full rollout.
pub async fn execute(args: &DeployArgs) -> Result<()> {
    let target = dispatch::target_request(&args.target)?;
    let session = Session::start();

    output::header(env!("CARGO_PKG_VERSION"));
    let request = DeployRequest {
        project: args.target.project.clone(),
        build: args.build,
        strategy: args.strategy.map(Into::into),
        tag: args.tag.clone(),
        report_status: !args.skip_status,
    };

    let outcome = operator()?
        .deploy(&target, request, session.notifier())
        .await;
    session.finish();
    let outcome = config::explain(outcome, &target)?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&outcome)?);
        return Ok(());
    }
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &DeployOutcome) {
    output::section("Rollout");
    output::field("Target", &outcome.target);
    for image in &outcome.images {
        output::field(if outcome.built { "Built" } else { "Image" }, image);
    }
    let stages: Vec<&str> = outcome.stages.iter().map(|stage| stage.as_str()).collect();
    output::field("Stages", stages.join(" → "));
    output::field("Run", output::muted(outcome.run_id));

    if let Some(summary) = &outcome.summary {
        status::print_summary(summary);
    }
    output::success("Deployment complete");
}
