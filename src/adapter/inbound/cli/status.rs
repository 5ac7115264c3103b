//! Handler for the `status` command.

use super::command::TargetArgs;
use super::dispatch::{self, Session};
use super::operator::operator;
use super::{config, output};
use crate::domain::DeploymentSummary;
use crate::error::Result;

pub async fn execute(args: &TargetArgs) -> Result<()> {
    let target = dispatch::target_request(args)?;
    let session = Session::start();

    let summary = operator()?.status(&target, session.notifier()).await;
    session.finish();
    let summary = config::explain(summary, &target)?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&summary)?);
        return Ok(());
    }
    print_summary(&summary);
    Ok(())
}

/// Print address and certificate state.
pub fn print_summary(summary: &DeploymentSummary) {
    output::section("Status");
    output::field(
        "Static IP",
        summary.static_address.as_deref().unwrap_or("(not reserved)"),
    );
    output::field(
        "Ingress IP",
        summary.external_address.as_deref().unwrap_or("(pending)"),
    );
    output::field("Certificate", &summary.certificate);
    output::field("URL", output::highlight(&summary.url));

    match (&summary.external_address, summary.address_matches()) {
        (None, _) => output::note("The ingress has no address yet; rerun `deployctl status` shortly"),
        (Some(_), false) if summary.static_address.is_some() => {
            output::warning("Ingress address differs from the reserved static address");
        }
        _ => {}
    }
    if !summary.certificate.is_active() {
        output::note("Managed certificates can take up to an hour to become active");
    }
}
