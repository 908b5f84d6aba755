//! Session snapshot passed explicitly to every evaluation.

use std::collections::BTreeSet;

use dancehub_models::{PermissionOverride, Role, User};

use crate::evaluator::{PermissionEvaluator, resolve_effective_permissions};
use crate::role_sets::RolePermissionSet;

/// An authenticated user together with the resolved effective permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
    effective: BTreeSet<String>,
}

impl Session {
    /// Trusts `user.permissions` as the backend-resolved effective set.
    #[must_use]
    pub fn new(user: User) -> Self {
        let effective = user.permissions.iter().cloned().collect();
        Self { user, effective }
    }

    /// Resolves the effective set locally from role defaults and overrides.
    #[must_use]
    pub fn resolve(
        user: User,
        role_sets: &RolePermissionSet,
        overrides: &[PermissionOverride],
    ) -> Self {
        let effective = resolve_effective_permissions(user.role, role_sets, overrides);
        Self { user, effective }
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role
    }

    #[must_use]
    pub fn effective_permissions(&self) -> &BTreeSet<String> {
        &self.effective
    }

    #[must_use]
    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        PermissionEvaluator::new(Some(self))
    }
}

/// Where the session currently stands. Evaluation never waits on it: a
/// `Loading` or `Anonymous` state simply evaluates as "no user".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    Loading,
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Loading | SessionState::Anonymous => None,
        }
    }

    #[must_use]
    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        PermissionEvaluator::new(self.session())
    }
}

impl From<Session> for SessionState {
    fn from(session: Session) -> Self {
        SessionState::Authenticated(session)
    }
}
