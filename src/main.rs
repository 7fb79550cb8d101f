mod actions;
mod check;
mod github;
mod inputs;
mod request;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::inputs::{RawInputs, RepoContext};
use crate::request::CheckRequest;

#[derive(Parser, Debug)]
#[command(
    name = "check-tag",
    version,
    about = "Check whether a tag exists in a GitHub repository",
    long_about = None
)]
struct Cli {
    /// Tag name to search for
    #[arg(long, env = "INPUT_TAG")]
    tag: Option<String>,

    /// Token used to authenticate against the GitHub API
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Repository owner; defaults to the owner of the current repository
    #[arg(long, env = "INPUT_OWNER")]
    owner: Option<String>,

    /// Repository name; defaults to the current repository
    #[arg(long, env = "INPUT_REPOSITORY")]
    repository: Option<String>,

    /// Fail the step when the tag exists
    #[arg(long, env = "INPUT_FAIL_IF_EXISTS")]
    fail_if_exists: Option<String>,

    /// Fail the step when the tag does not exist
    #[arg(long, env = "INPUT_FAIL_IF_NOT_EXISTS")]
    fail_if_not_exists: Option<String>,
}

impl Cli {
    fn into_inputs(self) -> RawInputs {
        RawInputs {
            tag: self.tag,
            github_token: self.github_token,
            owner: self.owner,
            repository: self.repository,
            fail_if_exists: self.fail_if_exists,
            fail_if_not_exists: self.fail_if_not_exists,
        }
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout is reserved for workflow commands and the
    // local step-output fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let ctx = RepoContext::from_env();
    let request = CheckRequest::build(cli.into_inputs(), ctx.as_ref())?;
    let outcome = check::run(request).await?;
    tracing::debug!(
        "check complete tag_exists={} failed={}",
        outcome.tag_exists,
        outcome.failed
    );

    Ok(if outcome.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
