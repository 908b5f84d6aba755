//! Backend access for the dashboard gateway.
//!
//! [`api`] defines the collaborator traits, [`http`] implements them with
//! `reqwest`, and [`gate`] keeps concurrent status mutations apart.

pub mod api;
pub mod error;
pub mod gate;
pub mod http;

pub use api::{AuthProvider, Backend, BearerToken, ClientResult, EventsApi, PermissionsApi};
pub use error::{ClientError, GENERIC_FAILURE_MESSAGE};
pub use gate::{SubmissionGate, SubmissionPermit};
pub use http::HttpBackend;
