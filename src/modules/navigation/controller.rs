use axum::{Json, extract::State};

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

use super::model::NavigationResponse;
use super::service::filter_navigation;

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Sidebar entries visible to the current user", body = NavigationResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Navigation",
    security(("bearer_auth" = []))
)]
pub async fn get_navigation(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Json<NavigationResponse> {
    let items = filter_navigation(&state.navigation, &current.session.evaluator());
    Json(NavigationResponse { items })
}
