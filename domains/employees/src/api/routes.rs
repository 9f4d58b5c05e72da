//! Route definitions for Employees domain API
//!
//! Paths are relative; the application nests them under `/api/v1`.

use axum::{
    routing::{get, post},
    Router,
};

use hrdocs_db::Store;

use super::handlers::{admin_employees, auth, contract_events, employees, human_resources};
use super::middleware::EmployeesState;

/// Create sign-in routes
fn auth_routes<S: Store>() -> Router<EmployeesState<S>> {
    Router::new()
        .route("/auth/sign-in", post(auth::sign_in::<S>))
        .route("/auth/me", get(auth::me::<S>))
        .route("/admin-employees", post(admin_employees::create_admin::<S>))
}

/// Create employee management routes
fn employee_routes<S: Store>() -> Router<EmployeesState<S>> {
    Router::new()
        .route(
            "/employees",
            get(employees::list_employees::<S>).post(employees::create_employee::<S>),
        )
        .route(
            "/employees/cpf/{cpf}",
            get(employees::get_employee_by_cpf::<S>),
        )
        .route(
            "/employees/{id}",
            get(employees::get_employee::<S>)
                .patch(employees::update_employee::<S>)
                .delete(employees::delete_employee::<S>),
        )
}

/// Create fire/rehire routes
fn human_resources_routes<S: Store>() -> Router<EmployeesState<S>> {
    Router::new()
        .route("/human-resources/fire/{id}", post(human_resources::fire::<S>))
        .route(
            "/human-resources/rehire/{id}",
            post(human_resources::re_hire::<S>),
        )
}

/// Create contract event routes
fn contract_event_routes<S: Store>() -> Router<EmployeesState<S>> {
    Router::new()
        .route(
            "/contract-events",
            get(contract_events::list_contract_events::<S>),
        )
        .route(
            "/contract-events/employee/{id}",
            get(contract_events::list_employee_contract_events::<S>),
        )
        .route(
            "/contract-events/{id}",
            get(contract_events::get_contract_event::<S>)
                .patch(contract_events::update_contract_event::<S>)
                .delete(contract_events::delete_contract_event::<S>),
        )
}

/// Create all Employees domain API routes
pub fn routes<S: Store>() -> Router<EmployeesState<S>> {
    Router::new()
        .merge(auth_routes())
        .merge(employee_routes())
        .merge(human_resources_routes())
        .merge(contract_event_routes())
}
