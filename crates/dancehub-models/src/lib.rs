//! # DanceHub Models
//!
//! Domain models and DTOs shared by the gateway, the REST client and the CLI.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed identifiers
//! - [`roles`]: Roles, catalog entries and permission overrides
//! - [`users`]: The session user and academy summary
//! - [`events`]: Events, event status and list filters
//! - [`registrations`]: Academy registrations and their stats

pub mod events;
pub mod ids;
pub mod registrations;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use events::{AssignAcademyDto, Event, EventQuery, EventStatus, PaginatedEvents};
pub use ids::{AcademyId, EventId, PermissionId, UserId};
pub use registrations::{
    AcademyEventEntry, EventAcademyRegistration, RegistrationStats, RegistrationStatus,
    UpdateRegistrationStatusDto,
};
pub use roles::{
    OverrideRecord, Permission, PermissionModule, PermissionOverride, PermissionRef, Role,
    RoleParseError, SyncUserPermissionsDto, UserPermissionsDetail,
};
pub use users::{AcademySummary, User};
