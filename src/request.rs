use std::fmt;

use thiserror::Error;

use crate::inputs::{RawInputs, RepoContext};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("missing required input `{0}`")]
    MissingInput(&'static str),
    #[error("input `{name}` is not a valid boolean: `{value}`")]
    InvalidBool { name: &'static str, value: String },
    /// Both policy flags were set; the request is never executed.
    #[error("Invalid request")]
    PolicyConflict,
}

/// A fully resolved tag-existence check, immutable once built.
#[derive(Clone)]
pub struct CheckRequest {
    pub owner: String,
    pub repository: String,
    pub tag: String,
    pub github_token: String,
    pub fail_if_exists: bool,
    pub fail_if_not_exists: bool,
}

impl fmt::Debug for CheckRequest {
    // The token is a secret and must not leak through Debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRequest")
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .field("tag", &self.tag)
            .field("github_token", &"<redacted>")
            .field("fail_if_exists", &self.fail_if_exists)
            .field("fail_if_not_exists", &self.fail_if_not_exists)
            .finish()
    }
}

impl CheckRequest {
    /// Resolve raw inputs into a request, falling back to the ambient
    /// repository identity for `owner` and `repository`.
    pub fn build(
        inputs: RawInputs,
        ctx: Option<&RepoContext>,
    ) -> Result<CheckRequest, RequestError> {
        let tag = non_empty(inputs.tag).ok_or(RequestError::MissingInput("tag"))?;
        let github_token =
            non_empty(inputs.github_token).ok_or(RequestError::MissingInput("github_token"))?;
        let owner = non_empty(inputs.owner)
            .or_else(|| ctx.map(|c| c.owner.clone()))
            .ok_or(RequestError::MissingInput("owner"))?;
        let repository = non_empty(inputs.repository)
            .or_else(|| ctx.map(|c| c.name.clone()))
            .ok_or(RequestError::MissingInput("repository"))?;

        Ok(CheckRequest {
            owner,
            repository,
            tag,
            github_token,
            fail_if_exists: parse_bool_input("fail_if_exists", inputs.fail_if_exists)?,
            fail_if_not_exists: parse_bool_input("fail_if_not_exists", inputs.fail_if_not_exists)?,
        })
    }

    /// True when the policy flags are internally consistent.
    pub fn validate(&self) -> bool {
        if self.fail_if_exists && self.fail_if_not_exists {
            tracing::error!("Both fail_if_exists and fail_if_not_exist cannot be set to true");
            return false;
        }
        true
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Boolean inputs accept the YAML spellings CI runners accept; absent
/// means false.
fn parse_bool_input(name: &'static str, value: Option<String>) -> Result<bool, RequestError> {
    match non_empty(value).as_deref() {
        None => Ok(false),
        Some("true" | "True" | "TRUE") => Ok(true),
        Some("false" | "False" | "FALSE") => Ok(false),
        Some(other) => Err(RequestError::InvalidBool {
            name,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RepoContext {
        RepoContext {
            owner: "ContextOwner".to_string(),
            name: "ContextRepository".to_string(),
        }
    }

    fn required_inputs() -> RawInputs {
        RawInputs {
            tag: Some("InputTag".to_string()),
            github_token: Some("InputToken".to_string()),
            ..RawInputs::default()
        }
    }

    #[test]
    fn uses_context_owner_and_repo_if_not_provided() {
        let request = CheckRequest::build(required_inputs(), Some(&ctx())).unwrap();
        assert_eq!(request.owner, "ContextOwner");
        assert_eq!(request.repository, "ContextRepository");
    }

    #[test]
    fn uses_input_owner_and_repo_if_provided() {
        let inputs = RawInputs {
            owner: Some("InputOwner".to_string()),
            repository: Some("InputRepository".to_string()),
            ..required_inputs()
        };
        let request = CheckRequest::build(inputs, Some(&ctx())).unwrap();
        assert_eq!(request.owner, "InputOwner");
        assert_eq!(request.repository, "InputRepository");
    }

    #[test]
    fn empty_strings_fall_back_to_context() {
        let inputs = RawInputs {
            owner: Some(String::new()),
            repository: Some(String::new()),
            ..required_inputs()
        };
        let request = CheckRequest::build(inputs, Some(&ctx())).unwrap();
        assert_eq!(request.owner, "ContextOwner");
        assert_eq!(request.repository, "ContextRepository");
    }

    #[test]
    fn missing_tag_is_rejected() {
        let inputs = RawInputs {
            tag: None,
            ..required_inputs()
        };
        let err = CheckRequest::build(inputs, Some(&ctx())).unwrap_err();
        assert_eq!(err, RequestError::MissingInput("tag"));
    }

    #[test]
    fn missing_token_is_rejected() {
        let inputs = RawInputs {
            github_token: None,
            ..required_inputs()
        };
        let err = CheckRequest::build(inputs, Some(&ctx())).unwrap_err();
        assert_eq!(err, RequestError::MissingInput("github_token"));
    }

    #[test]
    fn missing_owner_without_context_is_rejected() {
        let err = CheckRequest::build(required_inputs(), None).unwrap_err();
        assert_eq!(err, RequestError::MissingInput("owner"));
    }

    #[test]
    fn boolean_inputs_accept_yaml_spellings() {
        for spelling in ["true", "True", "TRUE"] {
            let inputs = RawInputs {
                fail_if_exists: Some(spelling.to_string()),
                ..required_inputs()
            };
            let request = CheckRequest::build(inputs, Some(&ctx())).unwrap();
            assert!(request.fail_if_exists, "spelling {spelling}");
        }
        for spelling in ["false", "False", "FALSE"] {
            let inputs = RawInputs {
                fail_if_not_exists: Some(spelling.to_string()),
                ..required_inputs()
            };
            let request = CheckRequest::build(inputs, Some(&ctx())).unwrap();
            assert!(!request.fail_if_not_exists, "spelling {spelling}");
        }
    }

    #[test]
    fn absent_boolean_inputs_default_to_false() {
        let request = CheckRequest::build(required_inputs(), Some(&ctx())).unwrap();
        assert!(!request.fail_if_exists);
        assert!(!request.fail_if_not_exists);
    }

    #[test]
    fn invalid_boolean_input_is_rejected() {
        let inputs = RawInputs {
            fail_if_exists: Some("yes".to_string()),
            ..required_inputs()
        };
        let err = CheckRequest::build(inputs, Some(&ctx())).unwrap_err();
        assert_eq!(
            err,
            RequestError::InvalidBool {
                name: "fail_if_exists",
                value: "yes".to_string(),
            }
        );
    }

    #[test]
    fn validate_rejects_conflicting_policy_flags() {
        let inputs = RawInputs {
            fail_if_exists: Some("true".to_string()),
            fail_if_not_exists: Some("true".to_string()),
            ..required_inputs()
        };
        let request = CheckRequest::build(inputs, Some(&ctx())).unwrap();
        assert!(!request.validate());
    }

    #[test]
    fn validate_accepts_a_single_policy_flag() {
        let inputs = RawInputs {
            fail_if_exists: Some("true".to_string()),
            ..required_inputs()
        };
        let request = CheckRequest::build(inputs, Some(&ctx())).unwrap();
        assert!(request.validate());
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let request = CheckRequest::build(required_inputs(), Some(&ctx())).unwrap();
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("InputToken"));
        assert!(rendered.contains("<redacted>"));
    }
}
