//! Employees domain state and auth backend integration

use axum::extract::FromRef;
use hrdocs_auth::AuthBackend;
use hrdocs_db::Store;

use crate::services::{
    AdminEmployeesService, AuthService, ContractEventsService, EmployeesService,
    HumanResourcesService,
};

pub use hrdocs_auth::{AdminUser, AuthUser, ManagerOrAdminUser};

/// Application state for the Employees domain
#[derive(Clone)]
pub struct EmployeesState<S> {
    pub auth: AuthBackend,
    pub sign_in: AuthService<S>,
    pub employees: EmployeesService<S>,
    pub admin_employees: AdminEmployeesService<S>,
    pub human_resources: HumanResourcesService<S>,
    pub contract_events: ContractEventsService<S>,
}

impl<S: Store> EmployeesState<S> {
    pub fn new(store: S, auth: AuthBackend) -> Self {
        Self {
            sign_in: AuthService::new(store.clone(), auth.clone()),
            employees: EmployeesService::new(store.clone()),
            admin_employees: AdminEmployeesService::new(store.clone()),
            human_resources: HumanResourcesService::new(store.clone()),
            contract_events: ContractEventsService::new(store),
            auth,
        }
    }
}

impl<S> FromRef<EmployeesState<S>> for AuthBackend {
    fn from_ref(state: &EmployeesState<S>) -> Self {
        state.auth.clone()
    }
}
