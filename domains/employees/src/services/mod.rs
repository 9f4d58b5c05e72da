//! Business services for the Employees domain
//!
//! Every service is generic over the injected [`hrdocs_db::Store`] and runs
//! its multi-step writes through [`hrdocs_db::transactional`].

mod admin_employees;
mod auth;
mod contract_events;
mod employees;
mod human_resources;

pub use admin_employees::AdminEmployeesService;
pub use auth::{AuthService, INVALID_CREDENTIALS_MESSAGE};
pub use contract_events::{ContractEventChanges, ContractEventsService};
pub use employees::{EmployeeChanges, EmployeesService, NewEmployee, HIRED_REASON};
pub use human_resources::{ContractChange, HumanResourcesService};

pub(crate) use employees::employee_not_found;
