use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    assign_academy, get_academy_events, get_event_registrations, transition_registration,
};

/// Registration routes under `/events`; merged with the events router.
pub fn init_event_registrations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{event_id}/academies",
            get(get_event_registrations).post(assign_academy),
        )
        .route(
            "/{event_id}/academies/{academy_id}/{action}",
            post(transition_registration),
        )
}

pub fn init_academy_router() -> Router<AppState> {
    Router::new().route("/events", get(get_academy_events))
}
