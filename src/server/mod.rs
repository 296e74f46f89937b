//! Server module: shared state, routes and the builder that wires them to a
//! database and view cache

pub mod builder;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use state::AppState;
