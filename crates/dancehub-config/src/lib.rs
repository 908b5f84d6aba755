//! # DanceHub Config
//!
//! Configuration types for the DanceHub dashboard gateway.
//!
//! Each structure is loaded from environment variables with defaults:
//!
//! - [`backend`]: REST backend base URL and request timeout
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`guard`]: Route guard behaviour (access-denied view vs redirect)
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use dancehub_config::{BackendConfig, CorsConfig, GuardConfig, ServerConfig};
//!
//! let backend = BackendConfig::from_env();
//! let guard = GuardConfig::from_env();
//! ```

pub mod backend;
pub mod cors;
pub mod guard;
pub mod server;

mod env;

// Re-export commonly used types at crate root
pub use backend::BackendConfig;
pub use cors::CorsConfig;
pub use guard::GuardConfig;
pub use server::ServerConfig;
