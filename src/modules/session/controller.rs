use axum::Json;

use crate::middleware::auth::CurrentSession;

use super::model::SessionResponse;

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Resolved session", body = SessionResponse),
        (status = 401, description = "Missing or expired token")
    ),
    tag = "Session",
    security(("bearer_auth" = []))
)]
pub async fn get_session(current: CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse::from(&current.session))
}
