use chrono::{DateTime, Utc};
use dancehub_core::PaginationMeta;
use dancehub_models::{Event, EventStatus, PaginatedEvents};
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::registrations::state_machine::{effective_event_status, is_soon};

/// An event with its status resolved against the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub effective_status: EventStatus,
    pub registration_ending_soon: bool,
}

impl EventView {
    pub fn build(event: Event, now: DateTime<Utc>) -> Self {
        Self {
            effective_status: effective_event_status(&event, now),
            registration_ending_soon: is_soon(event.registration_end_date, now),
            event,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEventViews {
    pub data: Vec<EventView>,
    pub meta: PaginationMeta,
}

impl PaginatedEventViews {
    pub fn build(page: PaginatedEvents, now: DateTime<Utc>) -> Self {
        Self {
            data: page
                .data
                .into_iter()
                .map(|event| EventView::build(event, now))
                .collect(),
            meta: page.meta,
        }
    }
}
