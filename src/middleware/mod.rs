//! Request extractors for authentication and authorization.
//!
//! - [`auth`]: session extractors and permission-based access control
//! - [`role`]: strict role checks
//!
//! # Authentication Flow
//!
//! 1. The SPA sends `Authorization: Bearer <token>`
//! 2. [`auth::CurrentSession`] forwards the token to the backend's `/auth/me`
//! 3. Permission extractors check the resolved session (admins always pass)
//! 4. The handler runs if all checks pass
//!
//! ```ignore
//! use crate::middleware::auth::RequireEventsRead;
//!
//! async fn list_events(RequireEventsRead(current): RequireEventsRead) -> impl IntoResponse {
//!     // Only executes if the user holds "events.read"
//! }
//! ```

pub mod auth;
pub mod role;
