//! API layer for the Documents domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::DocumentsState;
pub use routes::routes;
