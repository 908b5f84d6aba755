//! Role checks for gateway endpoints.
//!
//! Role gates are strict: an admin only passes when `Role::Admin` is listed.

use axum::{extract::FromRequestParts, http::request::Parts};
use dancehub_core::AppError;
use dancehub_models::Role;

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

fn check_roles(current: &CurrentSession, allowed: &[Role]) -> Result<(), AppError> {
    if current.session.evaluator().has_role(allowed) {
        return Ok(());
    }
    let required: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(AppError::forbidden(format!(
        "Access denied. Required roles: {}, but user has role: {}",
        required.join(", "),
        current.session.role()
    )))
}

/// Extractor for academy-only endpoints.
#[derive(Debug, Clone)]
pub struct RequireAcademy(pub CurrentSession);

impl FromRequestParts<AppState> for RequireAcademy {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentSession::from_request_parts(parts, state).await?;
        check_roles(&current, &[Role::Academy])?;
        Ok(RequireAcademy(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::session_for;
    use dancehub_auth::RolePermissionSet;
    use dancehub_client::BearerToken;
    use dancehub_models::{User, UserId};

    fn current(role: Role) -> CurrentSession {
        let user = User {
            id: UserId::from_u128(3),
            email: "role@example.com".into(),
            name: None,
            role,
            permissions: vec![],
            academy_id: None,
            academy: None,
        };
        CurrentSession {
            session: session_for(user, &RolePermissionSet::builtin()),
            token: BearerToken::new("t"),
        }
    }

    #[test]
    fn test_admin_is_not_an_academy() {
        let err = check_roles(&current(Role::Admin), &[Role::Academy]).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert!(err.error.to_string().contains("academy"));
    }

    #[test]
    fn test_listed_roles_pass() {
        assert!(check_roles(&current(Role::Academy), &[Role::Academy]).is_ok());
        assert!(check_roles(&current(Role::Admin), &[Role::Admin, Role::Academy]).is_ok());
        assert!(check_roles(&current(Role::Dancer), &[Role::Admin]).is_err());
    }
}
