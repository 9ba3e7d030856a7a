pub mod api;
pub mod errors;
pub mod routes;
pub mod startup;

pub use routes::{build_router, SharedStore};
pub use startup::{run, serve, ServerSettings};
