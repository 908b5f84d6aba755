use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use dancehub_auth::{RolePermissionSet, Session, SessionState};
use dancehub_client::BearerToken;
use dancehub_core::AppError;
use dancehub_models::User;

use crate::state::AppState;

/// Extractor that forwards the bearer token to the backend and resolves the
/// signed-in user into a [`Session`].
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session: Session,
    pub token: BearerToken,
}

impl CurrentSession {
    pub fn user(&self) -> &User {
        self.session.user()
    }
}

/// Like [`CurrentSession`] but yields [`SessionState::Anonymous`] instead of
/// rejecting when there is no token or the backend no longer accepts it.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub SessionState);

/// Builds the session for a user returned by the auth provider.
///
/// The backend's permission list is already the effective set. Admins always
/// resolve to the full catalog, and a user that arrives without any list falls
/// back to the role defaults.
pub fn session_for(user: User, role_sets: &RolePermissionSet) -> Session {
    if user.role.is_admin() || user.permissions.is_empty() {
        Session::resolve(user, role_sets, &[])
    } else {
        Session::new(user)
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<BearerToken>, AppError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format".to_string()))?;

    Ok(Some(BearerToken::new(token)))
}

async fn resolve(state: &AppState, token: BearerToken) -> Result<CurrentSession, AppError> {
    let user = state.backend.current_user(&token).await?;
    tracing::debug!(user_id = %user.id, role = %user.role, "Session resolved");
    Ok(CurrentSession {
        session: session_for(user, &state.role_sets),
        token,
    })
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;
        resolve(state, token).await
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts) {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(MaybeSession(SessionState::Anonymous)),
            Err(err) if err.is_unauthorized() => return Ok(MaybeSession(SessionState::Anonymous)),
            Err(err) => return Err(err),
        };

        match resolve(state, token).await {
            Ok(current) => Ok(MaybeSession(current.session.into())),
            Err(err) if err.is_unauthorized() => Ok(MaybeSession(SessionState::Anonymous)),
            Err(err) => Err(err),
        }
    }
}

/// Declares an extractor that requires one permission. Admins always pass.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::CurrentSession);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = dancehub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let current = <$crate::middleware::auth::CurrentSession as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if !current.session.evaluator().has_permission($permission) {
                    return Err(dancehub_core::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(current))
            }
        }
    };
}

require_permission!(RequireEventsRead, dancehub_core::permissions::EVENTS_READ);
require_permission!(
    RequireEventsAssignAcademies,
    dancehub_core::permissions::EVENTS_ASSIGN_ACADEMIES
);
require_permission!(
    RequireRegistrationsReview,
    dancehub_core::permissions::REGISTRATIONS_REVIEW
);
require_permission!(
    RequireManagePermissions,
    dancehub_core::permissions::USERS_MANAGE_PERMISSIONS
);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use dancehub_core::permissions as p;
    use dancehub_models::{Role, UserId};

    fn user(role: Role, permissions: &[&str]) -> User {
        User {
            id: UserId::from_u128(9),
            email: "user@example.com".into(),
            name: None,
            role,
            permissions: permissions.iter().map(|c| (*c).to_string()).collect(),
            academy_id: None,
            academy: None,
        }
    }

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/session");
        if let Some(value) = header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_session_trusts_backend_permissions() {
        let session = session_for(
            user(Role::Teacher, &[p::REPORTS_VIEW]),
            &RolePermissionSet::builtin(),
        );
        assert!(session.evaluator().has_permission(p::REPORTS_VIEW));
        assert!(!session.evaluator().has_permission(p::EVENTS_READ));
    }

    #[test]
    fn test_session_falls_back_to_role_defaults() {
        let session = session_for(user(Role::Dancer, &[]), &RolePermissionSet::builtin());
        assert!(session.evaluator().has_permission(p::EVENTS_READ));
    }

    #[test]
    fn test_admin_session_holds_catalog() {
        let sets = RolePermissionSet::builtin();
        let session = session_for(user(Role::Admin, &[p::EVENTS_READ]), &sets);
        assert_eq!(session.effective_permissions(), sets.catalog());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert!(bearer_token(&parts(None)).unwrap().is_none());
        assert_eq!(
            bearer_token(&parts(Some("Bearer abc"))).unwrap().unwrap().as_str(),
            "abc"
        );
        assert!(bearer_token(&parts(Some("Basic abc"))).is_err());
        assert!(bearer_token(&parts(Some("Bearer  "))).is_err());
    }
}
