//! Event models.
//!
//! The event's own lifecycle (`draft|open|closed|finished`) is independent of
//! any academy's registration status.

use chrono::{DateTime, Utc};
use dancehub_core::serde::deserialize_optional_datetime;
use dancehub_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AcademyId, EventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Open,
    Closed,
    Finished,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Open => "open",
            EventStatus::Closed => "closed",
            EventStatus::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Backend status. Older events omit it; see the status fallback.
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub registration_start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub registration_end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub update_deadline_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Filters for the events list, forwarded as query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct EventQuery {
    pub search: Option<String>,
    pub status: Option<EventStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl EventQuery {
    /// Query pairs in a stable order; empty filters are omitted.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.pagination.to_query();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedEvents {
    pub data: Vec<Event>,
    pub meta: PaginationMeta,
}

/// Admin request to invite an academy to an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignAcademyDto {
    pub academy_id: AcademyId,
    #[validate(length(max = 1000, message = "Message must not exceed 1000 characters"))]
    pub message: Option<String>,
}
