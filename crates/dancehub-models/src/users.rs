//! Session user as exposed by the backend's auth endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{AcademyId, UserId};
use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademySummary {
    pub id: AcademyId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Authenticated user. `permissions` is the effective set already resolved by
/// the backend (role defaults plus overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub academy_id: Option<AcademyId>,
    #[serde(default)]
    pub academy: Option<AcademySummary>,
}

impl User {
    /// Academy the user acts for, from either the id field or the embedded academy.
    #[must_use]
    pub fn academy_id(&self) -> Option<AcademyId> {
        self.academy_id.or_else(|| self.academy.as_ref().map(|a| a.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_with_defaults() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000010",
            "email": "academia@example.com",
            "role": "academy",
            "academy": { "id": "00000000-0000-0000-0000-000000000020", "name": "Ritmo" }
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.role, Role::Academy);
        assert!(user.permissions.is_empty());
        assert_eq!(user.academy_id(), Some(AcademyId::from_u128(0x20)));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000010",
            "email": "x@example.com",
            "role": "root"
        });
        assert!(serde_json::from_value::<User>(json).is_err());
    }
}
