//! Permission evaluation.
//!
//! [`PermissionEvaluator`] answers access queries against a session snapshot.
//! It fails closed: with no authenticated user every query returns `false`.
//!
//! ```ignore
//! let evaluator = session_state.evaluator();
//!
//! if evaluator.has_permission(permissions::USERS_MANAGE_PERMISSIONS) {
//!     // Show the permission editor
//! }
//!
//! if evaluator.has_role(&[Role::Academy]) {
//!     // Academy-only invitation list
//! }
//! ```

use std::collections::{BTreeSet, HashMap};

use dancehub_models::{PermissionOverride, Role};

use crate::role_sets::RolePermissionSet;
use crate::session::Session;

/// Computes `(defaults[role] \ revoked) ∪ granted`.
///
/// Admins always get the full catalog.
#[must_use]
pub fn resolve_effective_permissions(
    role: Role,
    role_sets: &RolePermissionSet,
    overrides: &[PermissionOverride],
) -> BTreeSet<String> {
    let defaults = role_sets.defaults_for(role);
    if role.is_admin() {
        return defaults;
    }
    apply_overrides(defaults, overrides)
}

/// Applies `overrides` on top of `defaults`. When several overrides target the
/// same code the last one wins.
#[must_use]
pub fn apply_overrides(
    mut defaults: BTreeSet<String>,
    overrides: &[PermissionOverride],
) -> BTreeSet<String> {
    let mut latest: HashMap<&str, bool> = HashMap::with_capacity(overrides.len());
    for ovr in overrides {
        latest.insert(ovr.code.as_str(), ovr.granted);
    }

    for (code, granted) in latest {
        if granted {
            defaults.insert(code.to_string());
        } else {
            defaults.remove(code);
        }
    }

    defaults
}

/// Read-only access queries over an optional session.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    session: Option<&'a Session>,
}

impl<'a> PermissionEvaluator<'a> {
    #[must_use]
    pub fn new(session: Option<&'a Session>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session.map(Session::role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    /// Check if the user holds `code`. Admins hold everything.
    #[must_use]
    pub fn has_permission(&self, code: &str) -> bool {
        match self.session {
            None => false,
            Some(session) if session.role().is_admin() => true,
            Some(session) => session.effective_permissions().contains(code),
        }
    }

    /// Check if the user holds at least one of `codes`. An empty list is never satisfied.
    #[must_use]
    pub fn has_any_permission<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        if codes.is_empty() || self.session.is_none() {
            return false;
        }
        if self.is_admin() {
            return true;
        }
        codes.iter().any(|c| self.has_permission(c.as_ref()))
    }

    /// Check if the user holds every one of `codes`. An empty list is never satisfied.
    #[must_use]
    pub fn has_all_permissions<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        if codes.is_empty() || self.session.is_none() {
            return false;
        }
        if self.is_admin() {
            return true;
        }
        codes.iter().all(|c| self.has_permission(c.as_ref()))
    }

    /// Exact role membership. There is no admin bypass here.
    #[must_use]
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|role| roles.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dancehub_core::permissions::{self as p, CATALOG};
    use dancehub_models::{User, UserId};

    fn session_for(role: Role, overrides: &[PermissionOverride]) -> Session {
        let user = User {
            id: UserId::from_u128(42),
            email: "test@example.com".to_string(),
            name: None,
            role,
            permissions: vec![],
            academy_id: None,
            academy: None,
        };
        Session::resolve(user, &RolePermissionSet::builtin(), overrides)
    }

    #[test]
    fn test_non_admin_without_overrides_matches_role_defaults() {
        let sets = RolePermissionSet::builtin();
        for role in [Role::Academy, Role::Teacher, Role::Dancer] {
            let session = session_for(role, &[]);
            let evaluator = session.evaluator();
            for code in CATALOG {
                assert_eq!(
                    evaluator.has_permission(code),
                    sets.defaults_for(role).contains(*code),
                    "{role} / {code}"
                );
            }
        }
    }

    #[test]
    fn test_admin_has_every_permission_but_strict_roles() {
        let session = session_for(Role::Admin, &[PermissionOverride::revoke(p::USERS_READ)]);
        let evaluator = session.evaluator();

        for code in CATALOG {
            assert!(evaluator.has_permission(code));
        }
        assert!(evaluator.has_permission("not.in.catalog"));

        assert!(evaluator.has_role(&[Role::Admin]));
        for role in [Role::Academy, Role::Teacher, Role::Dancer] {
            assert!(!evaluator.has_role(&[role]));
        }
    }

    #[test]
    fn test_revoke_then_remove_restores_default() {
        let revoked = session_for(Role::Academy, &[PermissionOverride::revoke(p::EVENTS_READ)]);
        assert!(!revoked.evaluator().has_permission(p::EVENTS_READ));

        let restored = session_for(Role::Academy, &[]);
        assert!(restored.evaluator().has_permission(p::EVENTS_READ));
    }

    #[test]
    fn test_grant_override_adds_permission() {
        let session = session_for(Role::Dancer, &[PermissionOverride::grant(p::REPORTS_VIEW)]);
        assert!(session.evaluator().has_permission(p::REPORTS_VIEW));
        assert!(!session.evaluator().has_permission(p::REPORTS_EXPORT));
    }

    #[test]
    fn test_last_override_for_a_code_wins() {
        let session = session_for(
            Role::Teacher,
            &[
                PermissionOverride::grant(p::USERS_READ),
                PermissionOverride::revoke(p::USERS_READ),
            ],
        );
        assert!(!session.evaluator().has_permission(p::USERS_READ));
    }

    #[test]
    fn test_apply_overrides_on_backend_defaults() {
        let defaults: BTreeSet<String> = [p::EVENTS_READ, p::DANCERS_READ]
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        let effective = apply_overrides(
            defaults,
            &[
                PermissionOverride::revoke(p::DANCERS_READ),
                PermissionOverride::grant(p::REPORTS_VIEW),
            ],
        );
        assert_eq!(
            effective.into_iter().collect::<Vec<_>>(),
            vec![p::EVENTS_READ.to_string(), p::REPORTS_VIEW.to_string()]
        );
    }

    #[test]
    fn test_empty_lists_are_never_satisfied_for_non_admins() {
        let empty: [&str; 0] = [];
        for role in [Role::Academy, Role::Teacher, Role::Dancer] {
            let session = session_for(role, &[]);
            assert!(!session.evaluator().has_any_permission(&empty));
            assert!(!session.evaluator().has_all_permissions(&empty));
        }
    }

    #[test]
    fn test_has_any_permission() {
        let session = session_for(Role::Dancer, &[]);
        let evaluator = session.evaluator();
        assert!(evaluator.has_any_permission(&[p::EVENTS_READ, p::USERS_DELETE]));
        assert!(!evaluator.has_any_permission(&[p::USERS_CREATE, p::USERS_DELETE]));
    }

    #[test]
    fn test_has_all_permissions() {
        let session = session_for(Role::Teacher, &[]);
        let evaluator = session.evaluator();
        assert!(evaluator.has_all_permissions(&[p::EVENTS_READ, p::DANCERS_READ]));
        assert!(!evaluator.has_all_permissions(&[p::EVENTS_READ, p::DANCERS_DELETE]));
    }

    #[test]
    fn test_accepts_owned_codes() {
        let session = session_for(Role::Teacher, &[]);
        let codes = vec![p::EVENTS_READ.to_string()];
        assert!(session.evaluator().has_any_permission(&codes));
    }

    #[test]
    fn test_no_session_fails_closed() {
        let evaluator = PermissionEvaluator::new(None);
        assert!(!evaluator.has_permission(p::EVENTS_READ));
        assert!(!evaluator.has_any_permission(&[p::EVENTS_READ]));
        assert!(!evaluator.has_all_permissions(&[p::EVENTS_READ]));
        assert!(!evaluator.has_role(&Role::ALL));
        assert!(!evaluator.is_admin());
    }

    #[test]
    fn test_has_role_membership() {
        let session = session_for(Role::Teacher, &[]);
        assert!(session.evaluator().has_role(&[Role::Academy, Role::Teacher]));
        assert!(!session.evaluator().has_role(&[]));
    }
}
