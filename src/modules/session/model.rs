use dancehub_auth::Session;
use dancehub_auth::overrides::{ModuleGroup, group_by_module};
use dancehub_models::{Role, User};
use serde::Serialize;
use utoipa::ToSchema;

/// The signed-in user as the SPA sees it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    pub role: Role,
    pub effective_permissions: Vec<String>,
    pub modules: Vec<ModuleGroup>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let effective = session.effective_permissions();
        Self {
            user: session.user().clone(),
            role: session.role(),
            effective_permissions: effective.iter().cloned().collect(),
            modules: group_by_module(effective),
        }
    }
}
