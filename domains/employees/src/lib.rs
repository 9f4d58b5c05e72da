//! Employees domain: sign-in, employee records, admin bootstrap,
//! fire/rehire and contract events

pub mod api;
pub mod services;

// Re-export service types
pub use services::{
    AdminEmployeesService, AuthService, ContractChange, ContractEventChanges,
    ContractEventsService, EmployeeChanges, EmployeesService, HumanResourcesService, NewEmployee,
};

// Re-export API types
pub use api::routes;
pub use api::EmployeesState;
