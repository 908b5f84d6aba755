use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    get_permission_modules, get_permissions, get_role_permissions, get_user_permissions,
    remove_permission_overrides, sync_user_permissions, toggle_user_permission,
};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_permissions))
        .route("/modules", get(get_permission_modules))
        .route("/roles/{role}", get(get_role_permissions))
}

pub fn init_user_permissions_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}/permissions",
            get(get_user_permissions).put(sync_user_permissions),
        )
        .route("/{user_id}/permissions/toggle", post(toggle_user_permission))
        .route(
            "/{user_id}/permissions/overrides",
            delete(remove_permission_overrides),
        )
}
