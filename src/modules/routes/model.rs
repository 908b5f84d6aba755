use dancehub_auth::AccessRequirement;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::guard::GuardDecision;

/// An SPA route and what it takes to open it.
///
/// `pattern` segments starting with `:` match any single non-empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    pub pattern: String,
    #[serde(skip_serializing_if = "AccessRequirement::is_open")]
    pub access: AccessRequirement,
    /// All listed permissions are needed instead of any one of them.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub require_all: bool,
}

impl RouteDefinition {
    pub fn new(pattern: &str, access: AccessRequirement) -> Self {
        Self {
            pattern: pattern.to_string(),
            access,
            require_all: false,
        }
    }

    #[must_use]
    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }

    /// Matches a path (without query string) against the pattern.
    pub fn matches(&self, path: &str) -> bool {
        let mut expected = segments(&self.pattern);
        let mut actual = segments(path);
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(pat), Some(seg)) if pat.starts_with(':') || pat == seg => {}
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteAccessQuery {
    /// Attempted SPA location, including any query string.
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteAccessResponse {
    pub path: String,
    /// The matched route pattern; `None` for paths outside the route table.
    pub route: Option<String>,
    pub decision: GuardDecision,
}
