pub mod events;
pub mod navigation;
pub mod permissions;
pub mod registrations;
pub mod routes;
pub mod session;
