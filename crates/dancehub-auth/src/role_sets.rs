//! Default permission sets per role.
//!
//! The backend owns the authoritative mapping (`getPermissionsByRole`); the
//! built-in table mirrors it for offline tooling and tests.

use std::collections::{BTreeSet, HashMap};

use dancehub_core::permissions::{self as p, CATALOG};
use dancehub_models::Role;

/// Role -> default grant set, plus the catalog an admin implicitly holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionSet {
    catalog: BTreeSet<String>,
    defaults: HashMap<Role, BTreeSet<String>>,
}

impl Default for RolePermissionSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn codes(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|c| (*c).to_string()).collect()
}

impl RolePermissionSet {
    /// Empty role table over the built-in catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            catalog: codes(CATALOG),
            defaults: HashMap::new(),
        }
    }

    /// The dashboard's shipped defaults.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_role(
                Role::Academy,
                [
                    p::ACADEMIES_READ,
                    p::EVENTS_READ,
                    p::REGISTRATIONS_READ,
                    p::REGISTRATIONS_MANAGE,
                    p::DANCERS_READ,
                    p::DANCERS_CREATE,
                    p::DANCERS_UPDATE,
                    p::DANCERS_DELETE,
                    p::COACHES_READ,
                    p::COACHES_CREATE,
                    p::COACHES_UPDATE,
                    p::COACHES_DELETE,
                    p::CHOREOGRAPHIES_READ,
                    p::CHOREOGRAPHIES_CREATE,
                    p::CHOREOGRAPHIES_UPDATE,
                    p::CHOREOGRAPHIES_DELETE,
                    p::APPAREL_READ,
                    p::APPAREL_MANAGE,
                    p::REPORTS_VIEW,
                ],
            )
            .with_role(
                Role::Teacher,
                [
                    p::EVENTS_READ,
                    p::REGISTRATIONS_READ,
                    p::DANCERS_READ,
                    p::COACHES_READ,
                    p::CHOREOGRAPHIES_READ,
                    p::CHOREOGRAPHIES_CREATE,
                    p::CHOREOGRAPHIES_UPDATE,
                    p::APPAREL_READ,
                ],
            )
            .with_role(Role::Dancer, [p::EVENTS_READ, p::CHOREOGRAPHIES_READ])
    }

    /// Replaces the default set of `role`. Admin entries are ignored: admins
    /// always hold the whole catalog.
    #[must_use]
    pub fn with_role<I, S>(mut self, role: Role, grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if role.is_admin() {
            return self;
        }
        let set: BTreeSet<String> = grants.into_iter().map(Into::into).collect();
        self.catalog.extend(set.iter().cloned());
        self.defaults.insert(role, set);
        self
    }

    /// Adds codes known to the backend catalog but not to the built-in list.
    #[must_use]
    pub fn with_catalog<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog.extend(extra.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &BTreeSet<String> {
        &self.catalog
    }

    /// Default grants of `role`; the full catalog for admins.
    #[must_use]
    pub fn defaults_for(&self, role: Role) -> BTreeSet<String> {
        if role.is_admin() {
            return self.catalog.clone();
        }
        self.defaults.get(&role).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn role_grants(&self, role: Role, code: &str) -> bool {
        role.is_admin() || self.defaults.get(&role).is_some_and(|set| set.contains(code))
    }
}
