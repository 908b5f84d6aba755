//! # DanceHub Auth
//!
//! Session model and permission evaluation for the DanceHub dashboard.
//!
//! Everything in this crate is pure: callers pass the session snapshot in and
//! get a decision back. Nothing here performs I/O or keeps global state.
//!
//! - [`session`]: [`SessionState`] and the authenticated [`Session`]
//! - [`role_sets`]: Default permission sets per role
//! - [`evaluator`]: [`PermissionEvaluator`] and effective-set resolution
//! - [`access`]: Composed role/permission requirements for menus and routes
//! - [`overrides`]: Editing helpers for per-user overrides
//!
//! # Role gates vs permission gates
//!
//! Role checks are exact matches with no admin bypass. Permission checks
//! always pass for admins. Menus and routes combine the two differently; see
//! [`access::AccessRequirement`].

pub mod access;
pub mod evaluator;
pub mod overrides;
pub mod role_sets;
pub mod session;

pub use access::AccessRequirement;
pub use evaluator::{PermissionEvaluator, apply_overrides, resolve_effective_permissions};
pub use role_sets::RolePermissionSet;
pub use session::{Session, SessionState};
