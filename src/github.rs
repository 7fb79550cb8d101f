use anyhow::{Context, Result};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::request::CheckRequest;

/// A git reference as returned by the matching-refs endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub url: String,
}

/// Build an authenticated GitHub client for the request token.
///
/// GITHUB_API_URL is honored when set, so the action talks to whatever API
/// endpoint the runner is configured for.
pub fn client(token: &str) -> Result<Octocrab> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());
    // The action issues a single read; do not retry (see module docs).
    builder.add_retry_config(RetryConfig::None);
    if let Some(base) = std::env::var("GITHUB_API_URL")
        .ok()
        .filter(|v| !v.is_empty())
    {
        builder = builder
            .base_uri(base.as_str())
            .with_context(|| format!("invalid GITHUB_API_URL: {base}"))?;
    }
    builder.build().context("failed to build GitHub client")
}

/// List tag refs matching the requested name under the request repository.
///
/// Provider failures are logged with a diagnostic and then re-raised
/// unchanged; this never swallows or retries an error.
pub async fn matching_tags(
    gh: &Octocrab,
    request: &CheckRequest,
) -> Result<Vec<MatchingRef>, octocrab::Error> {
    let route = format!(
        "/repos/{}/{}/git/matching-refs/tags/{}",
        request.owner,
        request.repository,
        urlencoding::encode(&request.tag)
    );
    match gh.get(route, None::<&()>).await {
        Ok(refs) => Ok(refs),
        Err(err) => {
            if is_not_found(&err) {
                tracing::error!(
                    "Unable to find repository {}/{}",
                    request.owner,
                    request.repository
                );
            } else {
                tracing::error!("An unexpected error occurred when communicating with GitHub");
            }
            Err(err)
        }
    }
}

fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}
