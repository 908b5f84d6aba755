//! Academy participation records.
//!
//! A registration is keyed by `(event_id, academy_id)`. It is created by the
//! backend when an admin invites an academy and is never deleted from here.

use std::fmt;

use chrono::{DateTime, Utc};
use dancehub_core::serde::deserialize_optional_datetime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::events::Event;
use crate::ids::{AcademyId, EventId};
use crate::users::AcademySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Invited,
    Accepted,
    Rejected,
    Registered,
    Completed,
}

impl RegistrationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Invited => "invited",
            RegistrationStatus::Accepted => "accepted",
            RegistrationStatus::Rejected => "rejected",
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate counts supplied by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationStats {
    pub choreographies: u32,
    pub dancers: u32,
    pub coaches: u32,
    pub apparel: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventAcademyRegistration {
    pub event_id: EventId,
    pub academy_id: AcademyId,
    #[serde(default)]
    pub academy: Option<AcademySummary>,
    pub status: RegistrationStatus,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stats: RegistrationStats,
}

/// One entry of an academy's invitation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademyEventEntry {
    pub event: Event,
    pub registration: EventAcademyRegistration,
}

/// Body of the backend's admin status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateRegistrationStatusDto {
    pub status: RegistrationStatus,
}
