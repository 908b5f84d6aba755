//! Composed role/permission requirements.
//!
//! Menus and routes read the same requirement differently:
//!
//! | Check | Menu item | Route |
//! |---|---|---|
//! | `roles` | exact match, admin must be listed | admin always passes |
//! | `permissions` | any-of, admin always passes | any-of or all-of, admin always passes |
//!
//! The menu's strict role check is relied on by admin-only section titles
//! gated with `roles: [admin]`.

use dancehub_models::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::evaluator::PermissionEvaluator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessRequirement {
    /// User must hold one of these roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    /// Permission codes; any-of unless the caller asks for all-of.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl AccessRequirement {
    /// No requirement at all.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn roles(roles: &[Role]) -> Self {
        Self {
            roles: roles.to_vec(),
            permissions: Vec::new(),
        }
    }

    #[must_use]
    pub fn permission(code: &str) -> Self {
        Self::permissions(&[code])
    }

    #[must_use]
    pub fn permissions(codes: &[&str]) -> Self {
        Self {
            roles: Vec::new(),
            permissions: codes.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn and_permission(mut self, code: &str) -> Self {
        self.permissions.push(code.to_string());
        self
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty()
    }

    /// Menu semantics: strict role gate, then any-of permission gate with an
    /// admin bypass.
    #[must_use]
    pub fn menu_allows(&self, evaluator: &PermissionEvaluator<'_>) -> bool {
        if !self.roles.is_empty() && !evaluator.has_role(&self.roles) {
            return false;
        }
        if self.permissions.is_empty() {
            return true;
        }
        evaluator.is_admin() || evaluator.has_any_permission(&self.permissions)
    }

    /// Route role gate: admins always pass.
    #[must_use]
    pub fn route_role_allows(&self, evaluator: &PermissionEvaluator<'_>) -> bool {
        self.roles.is_empty() || evaluator.is_admin() || evaluator.has_role(&self.roles)
    }

    /// Route permission gate: any-of or all-of per `require_all`, with an
    /// admin bypass.
    #[must_use]
    pub fn route_permission_allows(
        &self,
        evaluator: &PermissionEvaluator<'_>,
        require_all: bool,
    ) -> bool {
        if self.permissions.is_empty() || evaluator.is_admin() {
            return true;
        }
        if require_all {
            evaluator.has_all_permissions(&self.permissions)
        } else {
            evaluator.has_any_permission(&self.permissions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role_sets::RolePermissionSet;
    use crate::session::Session;
    use dancehub_core::permissions as p;
    use dancehub_models::{User, UserId};

    fn session(role: Role) -> Session {
        Session::resolve(
            User {
                id: UserId::from_u128(1),
                email: "a@example.com".into(),
                name: None,
                role,
                permissions: vec![],
                academy_id: None,
                academy: None,
            },
            &RolePermissionSet::builtin(),
            &[],
        )
    }

    #[test]
    fn test_open_requirement_allows_everyone() {
        let s = session(Role::Dancer);
        assert!(AccessRequirement::open().menu_allows(&s.evaluator()));
        assert!(AccessRequirement::open().is_open());
    }

    #[test]
    fn test_menu_role_gate_has_no_admin_bypass() {
        let admin = session(Role::Admin);
        let academy_only = AccessRequirement::roles(&[Role::Academy]);
        assert!(!academy_only.menu_allows(&admin.evaluator()));
        assert!(AccessRequirement::roles(&[Role::Admin]).menu_allows(&admin.evaluator()));
    }

    #[test]
    fn test_route_role_gate_admin_bypass() {
        let admin = session(Role::Admin);
        let academy_only = AccessRequirement::roles(&[Role::Academy]);
        assert!(academy_only.route_role_allows(&admin.evaluator()));

        let teacher = session(Role::Teacher);
        assert!(!academy_only.route_role_allows(&teacher.evaluator()));
    }

    #[test]
    fn test_menu_role_failure_denies_regardless_of_permission() {
        let academy = session(Role::Academy);
        let req = AccessRequirement::roles(&[Role::Admin]).and_permission(p::EVENTS_READ);
        assert!(!req.menu_allows(&academy.evaluator()));
    }

    #[test]
    fn test_menu_permission_any_of() {
        let academy = session(Role::Academy);
        let req = AccessRequirement::permissions(&[p::USERS_READ, p::EVENTS_READ]);
        assert!(req.menu_allows(&academy.evaluator()));

        let dancer = session(Role::Dancer);
        assert!(!AccessRequirement::permission(p::USERS_READ).menu_allows(&dancer.evaluator()));
    }

    #[test]
    fn test_route_permission_all_of() {
        let teacher = session(Role::Teacher);
        let req = AccessRequirement::permissions(&[p::EVENTS_READ, p::DANCERS_CREATE]);
        assert!(req.route_permission_allows(&teacher.evaluator(), false));
        assert!(!req.route_permission_allows(&teacher.evaluator(), true));
    }
}
