use std::collections::BTreeSet;

use anyhow::anyhow;
use dancehub_auth::apply_overrides;
use dancehub_auth::overrides::toggle_override;
use dancehub_client::{BearerToken, SubmissionPermit};
use dancehub_core::AppError;
use dancehub_models::{
    Permission, PermissionModule, Role, SyncUserPermissionsDto, UserId, UserPermissionsDetail,
};
use tracing::instrument;

use crate::state::AppState;

use super::model::UserPermissionsView;

const ADMIN_NOT_EDITABLE: &str = "admin_not_editable";
const ROLE_MISMATCH: &str = "role_mismatch";

fn claim(state: &AppState, user_id: UserId) -> Result<SubmissionPermit, AppError> {
    state
        .gate
        .try_acquire(format!("permissions:{user_id}"))
        .ok_or_else(|| {
            AppError::conflict(
                "A permission change for this user is already in progress".to_string(),
            )
        })
}

fn admin_not_editable() -> AppError {
    AppError::conflict("Administrator permissions cannot be edited".to_string())
        .with_reason(ADMIN_NOT_EDITABLE)
}

#[instrument(skip(state, token))]
pub async fn list_permissions(
    state: &AppState,
    token: &BearerToken,
) -> Result<Vec<Permission>, AppError> {
    Ok(state.backend.list_permissions(token).await?)
}

#[instrument(skip(state, token))]
pub async fn list_permission_modules(
    state: &AppState,
    token: &BearerToken,
) -> Result<Vec<PermissionModule>, AppError> {
    Ok(state.backend.list_permission_modules(token).await?)
}

#[instrument(skip(state, token))]
pub async fn get_role_permissions(
    state: &AppState,
    token: &BearerToken,
    role: Role,
) -> Result<Vec<Permission>, AppError> {
    Ok(state.backend.get_permissions_by_role(token, role).await?)
}

#[instrument(skip(state, token))]
pub async fn get_user_permissions(
    state: &AppState,
    token: &BearerToken,
    user_id: UserId,
) -> Result<UserPermissionsView, AppError> {
    let detail = state
        .backend
        .get_user_permissions_detail(token, user_id)
        .await?;
    Ok(UserPermissionsView::build(
        user_id,
        &detail,
        state.role_sets.catalog(),
    ))
}

/// Role of the target user as the backend reports it. Admin targets are
/// refused.
async fn editable_target(
    state: &AppState,
    token: &BearerToken,
    user_id: UserId,
) -> Result<(Role, UserPermissionsDetail), AppError> {
    let detail = state
        .backend
        .get_user_permissions_detail(token, user_id)
        .await?;
    let role = detail.role.ok_or_else(|| {
        AppError::bad_gateway("Backend did not report the user's role".to_string())
    })?;
    if role.is_admin() {
        return Err(admin_not_editable());
    }
    Ok((role, detail))
}

/// Codes the backend lists plus the built-in catalog.
async fn known_codes(
    state: &AppState,
    token: &BearerToken,
) -> Result<BTreeSet<String>, AppError> {
    let listed = state.backend.list_permissions(token).await?;
    let mut codes = state.role_sets.catalog().clone();
    codes.extend(listed.into_iter().map(|permission| permission.code));
    Ok(codes)
}

/// Replaces the user's effective set, then returns the re-fetched view.
#[instrument(skip(state, token, dto), fields(code_count = dto.permission_codes.len()))]
pub async fn sync_user_permissions(
    state: &AppState,
    token: &BearerToken,
    user_id: UserId,
    dto: SyncUserPermissionsDto,
) -> Result<UserPermissionsView, AppError> {
    if dto.role.is_admin() {
        return Err(admin_not_editable());
    }

    let _permit = claim(state, user_id)?;
    let (role, _) = editable_target(state, token, user_id).await?;
    if dto.role != role {
        return Err(AppError::conflict(format!(
            "User has role {role}; permissions were submitted for {}",
            dto.role
        ))
        .with_reason(ROLE_MISMATCH));
    }

    state
        .backend
        .sync_user_permissions(token, user_id, &dto)
        .await?;

    tracing::info!(user_id = %user_id, role = %dto.role, "User permissions synced");
    get_user_permissions(state, token, user_id).await
}

/// Flips one code relative to the role default and syncs the result.
#[instrument(skip(state, token))]
pub async fn toggle_user_permission(
    state: &AppState,
    token: &BearerToken,
    user_id: UserId,
    code: &str,
) -> Result<UserPermissionsView, AppError> {
    if !known_codes(state, token).await?.contains(code) {
        return Err(AppError::bad_request(anyhow!("Unknown permission code: {code}")));
    }

    let _permit = claim(state, user_id)?;
    let (role, detail) = editable_target(state, token, user_id).await?;

    let defaults: BTreeSet<String> = detail.role_codes().into_iter().collect();
    let overrides = toggle_override(&defaults, &detail.domain_overrides(), code);
    let desired = apply_overrides(defaults, &overrides);

    let dto = SyncUserPermissionsDto {
        role,
        permission_codes: desired.into_iter().collect(),
    };
    state
        .backend
        .sync_user_permissions(token, user_id, &dto)
        .await?;

    tracing::info!(user_id = %user_id, code = %code, "User permission toggled");
    get_user_permissions(state, token, user_id).await
}

/// Drops every override so the user falls back to the role defaults.
#[instrument(skip(state, token))]
pub async fn remove_all_overrides(
    state: &AppState,
    token: &BearerToken,
    user_id: UserId,
) -> Result<UserPermissionsView, AppError> {
    let _permit = claim(state, user_id)?;
    editable_target(state, token, user_id).await?;
    state
        .backend
        .remove_all_permission_overrides(token, user_id)
        .await?;

    tracing::info!(user_id = %user_id, "User permission overrides removed");
    get_user_permissions(state, token, user_id).await
}
