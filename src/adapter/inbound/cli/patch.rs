//! Handler for the `patch` command.

use super::command::PatchArgs;
use super::dispatch::{self, Session};
use super::operator::operator;
use super::{config, output};
use crate::error::Result;

pub async fn execute(args: &PatchArgs) -> Result<()> {
    let target = dispatch::target_request(&args.target)?;
    let session = Session::start();

    let outcomes = operator()?
        .patch(&target, args.tag.as_deref(), session.notifier())
        .await;
    session.finish();
    let outcomes = config::explain(outcomes, &target)?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&outcomes)?);
        return Ok(());
    }

    let changed = outcomes.iter().filter(|outcome| outcome.changed).count();
    let unmatched = outcomes.iter().filter(|outcome| outcome.is_unmatched()).count();
    output::section("Summary");
    output::field("Manifests", outcomes.len());
    output::field("Changed", changed);
    if unmatched > 0 {
        output::field("Unmatched", unmatched);
    }
    Ok(())
}
