use chrono::Utc;
use dancehub_client::BearerToken;
use dancehub_core::AppError;
use dancehub_models::{EventId, EventQuery};
use tracing::instrument;

use crate::state::AppState;

use super::model::{EventView, PaginatedEventViews};

#[instrument(skip(state, token))]
pub async fn list_events(
    state: &AppState,
    token: &BearerToken,
    query: &EventQuery,
) -> Result<PaginatedEventViews, AppError> {
    let page = state.backend.list_events(token, query).await?;
    Ok(PaginatedEventViews::build(page, Utc::now()))
}

#[instrument(skip(state, token))]
pub async fn get_event(
    state: &AppState,
    token: &BearerToken,
    event_id: EventId,
) -> Result<EventView, AppError> {
    let event = state.backend.get_event(token, event_id).await?;
    Ok(EventView::build(event, Utc::now()))
}
