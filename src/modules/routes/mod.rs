pub mod controller;
pub mod guard;
pub mod model;
pub mod router;
pub mod table;
