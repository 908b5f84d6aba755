//! # DanceHub Dashboard
//!
//! Role-aware gateway between the DanceHub single-page dashboard and its REST
//! backend. The backend owns the data; this crate decides what each signed-in
//! user may see and do, and refuses registration changes that the lifecycle
//! rules do not allow before they ever reach the backend.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session extractors and role/permission gates
//! ├── modules/          # Feature modules
//! │   ├── session/      # Signed-in user and effective permissions
//! │   ├── navigation/   # Sidebar catalog and per-user filtering
//! │   ├── routes/       # Route table and guard decisions
//! │   ├── permissions/  # Catalog and per-user override editor
//! │   ├── events/       # Events with resolved status
//! │   └── registrations/# Academy registration lifecycle
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Main application router
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Backend calls and business rules
//! - `model.rs`: Response views and DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Roles
//!
//! | Role | Acts on registrations | Notes |
//! |------|-----------------------|-------|
//! | Admin | validate, reactivate, complete | Holds every permission |
//! | Academy | accept, reject, submit | Only for its own academy |
//! | Teacher | no | Read-mostly |
//! | Dancer | no | Read-only |
//!
//! ## Configuration
//!
//! ```bash
//! BACKEND_BASE_URL=http://localhost:8000/api
//! BACKEND_TIMEOUT_SECS=15
//! SERVER_PORT=3000
//! ALLOWED_ORIGINS=http://localhost:5173
//! ```
//!
//! When the server is running, API documentation is available at
//! `/swagger-ui` and `/scalar`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use dancehub_auth;
pub use dancehub_client;
pub use dancehub_config;
pub use dancehub_core;
pub use dancehub_models;
