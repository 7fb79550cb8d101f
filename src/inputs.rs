/// Raw input values as read at the boundary, either from CLI flags or from
/// the `INPUT_*` environment variables a CI runner exports. Empty strings
/// are equivalent to absent values since runners export empty strings for
/// inputs that were not provided.
#[derive(Debug, Default, Clone)]
pub struct RawInputs {
    pub tag: Option<String>,
    pub github_token: Option<String>,
    pub owner: Option<String>,
    pub repository: Option<String>,
    pub fail_if_exists: Option<String>,
    pub fail_if_not_exists: Option<String>,
}

/// Identity of the repository the workflow is running in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub owner: String,
    pub name: String,
}

impl RepoContext {
    /// Parse an `owner/name` slug as exported in GITHUB_REPOSITORY.
    pub fn parse(slug: &str) -> Option<RepoContext> {
        let (owner, name) = slug.split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(RepoContext {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Read the ambient repository identity from the environment, if any.
    pub fn from_env() -> Option<RepoContext> {
        std::env::var("GITHUB_REPOSITORY")
            .ok()
            .as_deref()
            .and_then(Self::parse)
    }
}
