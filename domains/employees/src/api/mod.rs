//! API layer for the Employees domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::EmployeesState;
pub use routes::routes;
