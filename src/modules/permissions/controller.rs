use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
};
use dancehub_core::AppError;
use dancehub_models::{Permission, PermissionModule, Role, SyncUserPermissionsDto, UserId};

use crate::middleware::auth::RequireManagePermissions;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{TogglePermissionDto, UserPermissionsView};
use super::service;

#[utoipa::path(
    get,
    path = "/api/permissions",
    responses(
        (status = 200, description = "Permission catalog", body = Vec<Permission>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_permissions(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
) -> Result<Json<Vec<Permission>>, AppError> {
    let permissions = service::list_permissions(&state, &current.token).await?;
    Ok(Json(permissions))
}

#[utoipa::path(
    get,
    path = "/api/permissions/modules",
    responses(
        (status = 200, description = "Permission catalog grouped by module", body = Vec<PermissionModule>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_permission_modules(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
) -> Result<Json<Vec<PermissionModule>>, AppError> {
    let modules = service::list_permission_modules(&state, &current.token).await?;
    Ok(Json(modules))
}

#[utoipa::path(
    get,
    path = "/api/permissions/roles/{role}",
    params(
        ("role" = String, Path, description = "admin, academy, teacher or dancer")
    ),
    responses(
        (status = 200, description = "Default permissions of the role", body = Vec<Permission>),
        (status = 400, description = "Unknown role"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_role_permissions(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
    Path(role): Path<String>,
) -> Result<Json<Vec<Permission>>, AppError> {
    let role: Role = role.parse().map_err(|e| AppError::bad_request(anyhow!("{e}")))?;
    let permissions = service::get_role_permissions(&state, &current.token, role).await?;
    Ok(Json(permissions))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/permissions",
    params(
        ("user_id" = UserId, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Role defaults, overrides and effective permissions", body = UserPermissionsView),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_user_permissions(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserPermissionsView>, AppError> {
    let view = service::get_user_permissions(&state, &current.token, user_id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/permissions",
    params(
        ("user_id" = UserId, Path, description = "User ID")
    ),
    request_body = SyncUserPermissionsDto,
    responses(
        (status = 200, description = "Permissions replaced; returns the refreshed view", body = UserPermissionsView),
        (status = 409, description = "Administrator target, role mismatch or a change already in progress"),
        (status = 422, description = "Validation error")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn sync_user_permissions(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
    Path(user_id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<SyncUserPermissionsDto>,
) -> Result<Json<UserPermissionsView>, AppError> {
    let view = service::sync_user_permissions(&state, &current.token, user_id, dto).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/permissions/toggle",
    params(
        ("user_id" = UserId, Path, description = "User ID")
    ),
    request_body = TogglePermissionDto,
    responses(
        (status = 200, description = "Permission flipped; returns the refreshed view", body = UserPermissionsView),
        (status = 400, description = "Unknown permission code"),
        (status = 409, description = "Administrator target or a change already in progress")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn toggle_user_permission(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
    Path(user_id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<TogglePermissionDto>,
) -> Result<Json<UserPermissionsView>, AppError> {
    let view = service::toggle_user_permission(&state, &current.token, user_id, &dto.code).await?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/permissions/overrides",
    params(
        ("user_id" = UserId, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Overrides removed; returns the refreshed view", body = UserPermissionsView),
        (status = 409, description = "Administrator target or a change already in progress")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn remove_permission_overrides(
    State(state): State<AppState>,
    RequireManagePermissions(current): RequireManagePermissions,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserPermissionsView>, AppError> {
    let view = service::remove_all_overrides(&state, &current.token, user_id).await?;
    Ok(Json(view))
}
