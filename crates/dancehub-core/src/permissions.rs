//! Permission constants for the DanceHub dashboard.
//!
//! Codes have the shape `<module>.<action>`. Using these constants instead of
//! string literals keeps navigation, route tables and role defaults in sync
//! with the backend catalog.
//!
//! # Example
//!
//! ```ignore
//! use dancehub_core::permissions;
//!
//! if evaluator.has_permission(permissions::EVENTS_READ) {
//!     // Show the events list
//! }
//! ```

// =============================================================================
// Users permissions
// =============================================================================

/// Permission to list and view users
pub const USERS_READ: &str = "users.read";
/// Permission to create users
pub const USERS_CREATE: &str = "users.create";
/// Permission to update users
pub const USERS_UPDATE: &str = "users.update";
/// Permission to delete users
pub const USERS_DELETE: &str = "users.delete";
/// Permission to edit per-user permission overrides
pub const USERS_MANAGE_PERMISSIONS: &str = "users.manage_permissions";

// =============================================================================
// Academies permissions
// =============================================================================

pub const ACADEMIES_READ: &str = "academies.read";
pub const ACADEMIES_CREATE: &str = "academies.create";
pub const ACADEMIES_UPDATE: &str = "academies.update";
pub const ACADEMIES_DELETE: &str = "academies.delete";

// =============================================================================
// Dancers permissions
// =============================================================================

pub const DANCERS_READ: &str = "dancers.read";
pub const DANCERS_CREATE: &str = "dancers.create";
pub const DANCERS_UPDATE: &str = "dancers.update";
pub const DANCERS_DELETE: &str = "dancers.delete";

// =============================================================================
// Coaches permissions
// =============================================================================

pub const COACHES_READ: &str = "coaches.read";
pub const COACHES_CREATE: &str = "coaches.create";
pub const COACHES_UPDATE: &str = "coaches.update";
pub const COACHES_DELETE: &str = "coaches.delete";

// =============================================================================
// Events permissions
// =============================================================================

pub const EVENTS_READ: &str = "events.read";
pub const EVENTS_CREATE: &str = "events.create";
pub const EVENTS_UPDATE: &str = "events.update";
pub const EVENTS_DELETE: &str = "events.delete";
/// Permission to invite academies to an event
pub const EVENTS_ASSIGN_ACADEMIES: &str = "events.assign_academies";

// =============================================================================
// Registrations permissions
// =============================================================================

pub const REGISTRATIONS_READ: &str = "registrations.read";
/// Permission to accept, reject and submit an academy's own registration
pub const REGISTRATIONS_MANAGE: &str = "registrations.manage";
/// Permission to validate or reactivate registrations
pub const REGISTRATIONS_REVIEW: &str = "registrations.review";

// =============================================================================
// Choreographies permissions
// =============================================================================

pub const CHOREOGRAPHIES_READ: &str = "choreographies.read";
pub const CHOREOGRAPHIES_CREATE: &str = "choreographies.create";
pub const CHOREOGRAPHIES_UPDATE: &str = "choreographies.update";
pub const CHOREOGRAPHIES_DELETE: &str = "choreographies.delete";

// =============================================================================
// Apparel permissions
// =============================================================================

pub const APPAREL_READ: &str = "apparel.read";
pub const APPAREL_MANAGE: &str = "apparel.manage";

// =============================================================================
// Reports permissions
// =============================================================================

pub const REPORTS_VIEW: &str = "reports.view";
pub const REPORTS_EXPORT: &str = "reports.export";

/// Every code the dashboard knows about. Admins implicitly hold all of them.
pub const CATALOG: &[&str] = &[
    USERS_READ,
    USERS_CREATE,
    USERS_UPDATE,
    USERS_DELETE,
    USERS_MANAGE_PERMISSIONS,
    ACADEMIES_READ,
    ACADEMIES_CREATE,
    ACADEMIES_UPDATE,
    ACADEMIES_DELETE,
    DANCERS_READ,
    DANCERS_CREATE,
    DANCERS_UPDATE,
    DANCERS_DELETE,
    COACHES_READ,
    COACHES_CREATE,
    COACHES_UPDATE,
    COACHES_DELETE,
    EVENTS_READ,
    EVENTS_CREATE,
    EVENTS_UPDATE,
    EVENTS_DELETE,
    EVENTS_ASSIGN_ACADEMIES,
    REGISTRATIONS_READ,
    REGISTRATIONS_MANAGE,
    REGISTRATIONS_REVIEW,
    CHOREOGRAPHIES_READ,
    CHOREOGRAPHIES_CREATE,
    CHOREOGRAPHIES_UPDATE,
    CHOREOGRAPHIES_DELETE,
    APPAREL_READ,
    APPAREL_MANAGE,
    REPORTS_VIEW,
    REPORTS_EXPORT,
];

/// Returns the module part of a permission code (`"users.create"` -> `"users"`).
///
/// Codes without a dot are their own module.
#[must_use]
pub fn module_of(code: &str) -> &str {
    code.split_once('.').map_or(code, |(module, _)| module)
}
