use std::collections::BTreeSet;

use dancehub_auth::apply_overrides;
use dancehub_auth::overrides::{ModuleGroup, group_by_module};
use dancehub_models::{PermissionOverride, Role, UserId, UserPermissionsDetail};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Permission editor state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionsView {
    pub user_id: UserId,
    pub role: Option<Role>,
    /// Admin targets always hold the whole catalog and cannot be edited.
    pub editable: bool,
    pub role_permissions: Vec<String>,
    pub overrides: Vec<PermissionOverride>,
    pub effective_permissions: Vec<String>,
    pub modules: Vec<ModuleGroup>,
}

impl UserPermissionsView {
    pub fn build(
        user_id: UserId,
        detail: &UserPermissionsDetail,
        catalog: &BTreeSet<String>,
    ) -> Self {
        let role_codes: BTreeSet<String> = detail.role_codes().into_iter().collect();
        let overrides = detail.domain_overrides();
        let is_admin = detail.role.is_some_and(Role::is_admin);

        let effective = if is_admin {
            catalog.clone()
        } else {
            apply_overrides(role_codes.clone(), &overrides)
        };

        Self {
            user_id,
            role: detail.role,
            editable: !is_admin,
            role_permissions: role_codes.into_iter().collect(),
            overrides,
            modules: group_by_module(&effective),
            effective_permissions: effective.into_iter().collect(),
        }
    }
}

/// Flip one permission of a user relative to their role default.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TogglePermissionDto {
    #[validate(length(min = 3, max = 100, message = "Permission code must be 3-100 characters"))]
    pub code: String,
}
