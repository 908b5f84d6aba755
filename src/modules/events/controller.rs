use axum::{
    Json,
    extract::{Path, Query, State},
};
use dancehub_core::AppError;
use dancehub_models::{EventId, EventQuery};

use crate::middleware::auth::RequireEventsRead;
use crate::state::AppState;

use super::model::{EventView, PaginatedEventViews};
use super::service;

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventQuery),
    responses(
        (status = 200, description = "Events with their effective status", body = PaginatedEventViews),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
pub async fn get_events(
    State(state): State<AppState>,
    RequireEventsRead(current): RequireEventsRead,
    Query(query): Query<EventQuery>,
) -> Result<Json<PaginatedEventViews>, AppError> {
    let page = service::list_events(&state, &current.token, &query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    params(
        ("event_id" = EventId, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details", body = EventView),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found")
    ),
    tag = "Events",
    security(("bearer_auth" = []))
)]
pub async fn get_event(
    State(state): State<AppState>,
    RequireEventsRead(current): RequireEventsRead,
    Path(event_id): Path<EventId>,
) -> Result<Json<EventView>, AppError> {
    let event = service::get_event(&state, &current.token, event_id).await?;
    Ok(Json(event))
}
