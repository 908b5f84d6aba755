//! # DanceHub Core
//!
//! Core types, errors, and utilities for the DanceHub dashboard gateway.
//!
//! This crate provides foundational types used throughout the workspace:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination parameters forwarded to the backend
//! - [`permissions`]: The permission catalog as string constants
//! - [`serde`]: Lenient deserializers for backend payloads
//!
//! # Example
//!
//! ```ignore
//! use dancehub_core::errors::AppError;
//! use dancehub_core::permissions;
//!
//! let error = AppError::forbidden(format!(
//!     "Missing required permission: {}",
//!     permissions::USERS_MANAGE_PERMISSIONS
//! ));
//! ```

pub mod errors;
pub mod pagination;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
