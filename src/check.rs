use anyhow::Result;
use octocrab::Octocrab;

use crate::actions;
use crate::github::{self, MatchingRef};
use crate::request::{CheckRequest, RequestError};

/// Reason attached to a deliberate policy failure, as opposed to an
/// execution error.
pub const FAILURE_REASON: &str = "Failing action per input.";

/// What a completed run decided: the reported output and whether the step
/// was marked failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub tag_exists: bool,
    pub failed: bool,
}

/// Run the whole check: validate the request, query GitHub once, apply the
/// pass/fail policy, and report the `tag_exists` output.
///
/// A rejected request or a provider error terminates the run before any
/// output is reported. A policy failure completes normally with the output
/// still reported; the caller maps it to the process exit status.
pub async fn run(request: CheckRequest) -> Result<Outcome> {
    if !request.validate() {
        tracing::error!("Invalid request");
        return Err(RequestError::PolicyConflict.into());
    }

    let gh = github::client(&request.github_token)?;
    let exists = tag_exists(&gh, &request).await?;

    let failed = evaluate(&request, exists);
    if failed {
        actions::set_failed(FAILURE_REASON);
    }
    actions::set_output("tag_exists", exists).await?;

    Ok(Outcome {
        tag_exists: exists,
        failed,
    })
}

/// Query GitHub and report whether any tag ref matches the request.
async fn tag_exists(gh: &Octocrab, request: &CheckRequest) -> Result<bool, octocrab::Error> {
    tracing::info!("Searching for tag: {}", request.tag);
    let refs = github::matching_tags(gh, request).await?;

    if refs.is_empty() {
        tracing::info!("A matching tag was not found");
        Ok(false)
    } else {
        tracing::info!("A matching tag was found: {}", render_refs(&refs));
        Ok(true)
    }
}

fn render_refs(refs: &[MatchingRef]) -> String {
    serde_json::to_string(refs).unwrap_or_else(|_| format!("{refs:?}"))
}

/// Pure policy decision over the query result.
fn evaluate(request: &CheckRequest, exists: bool) -> bool {
    (exists && request.fail_if_exists) || (!exists && request.fail_if_not_exists)
}
