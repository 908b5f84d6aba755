//! Academy participation in events.
//!
//! Every status change is checked by [`state_machine::apply`] before it is
//! forwarded to the backend.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod state_machine;
