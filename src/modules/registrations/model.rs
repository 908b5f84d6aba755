use chrono::{DateTime, Utc};
use dancehub_models::{Event, EventAcademyRegistration, EventStatus};
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::events::model::EventView;

use super::state_machine::{
    ActionAvailability, Actor, RegistrationFlags, available_actions, completeness,
    effective_event_status, is_submittable, registration_flags,
};

/// A registration annotated with everything the dashboard needs to render
/// its buttons and warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationView {
    #[serde(flatten)]
    pub registration: EventAcademyRegistration,
    pub event_status: EventStatus,
    /// Percentage in `0..=100`.
    pub completeness: u8,
    pub submittable: bool,
    pub flags: RegistrationFlags,
    /// Empty when the viewer cannot act on registrations.
    pub actions: Vec<ActionAvailability>,
}

impl RegistrationView {
    pub fn build(
        registration: EventAcademyRegistration,
        event: &Event,
        actor: Option<Actor>,
        now: DateTime<Utc>,
    ) -> Self {
        let actions = actor
            .map(|actor| available_actions(&registration, event, actor, now))
            .unwrap_or_default();

        Self {
            event_status: effective_event_status(event, now),
            completeness: completeness(&registration.stats),
            submittable: is_submittable(&registration.stats),
            flags: registration_flags(registration.status, event, now),
            actions,
            registration,
        }
    }
}

/// One row of the academy's invitation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AcademyEventView {
    pub event: EventView,
    pub registration: RegistrationView,
}

impl AcademyEventView {
    pub fn build(event: Event, registration: EventAcademyRegistration, now: DateTime<Utc>) -> Self {
        let registration = RegistrationView::build(registration, &event, Some(Actor::Academy), now);
        Self {
            event: EventView::build(event, now),
            registration,
        }
    }
}
