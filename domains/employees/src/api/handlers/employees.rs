//! Employee management API handlers
//!
//! - GET /employees, GET /employees/cpf/{cpf} - manager or admin
//! - GET /employees/{id} - manager, admin, or the employee themself
//! - POST /employees, PATCH /employees/{id} - manager or admin
//! - DELETE /employees/{id} - admin

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use hrdocs_common::{Cpf, CpfPath, Error, IdPath, Pagination, Result, ValidatedJson};
use hrdocs_db::Store;
use hrdocs_domain::validation::validate_username;
use hrdocs_domain::{ContractStatus, Employee, Role};

use crate::api::middleware::{AdminUser, AuthUser, EmployeesState, ManagerOrAdminUser};
use crate::services::{EmployeeChanges, NewEmployee};

/// Employee as returned by the API; the password hash is never included
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub username: String,
    pub contract_status: ContractStatus,
    pub role: Role,
    pub cpf: Cpf,
    pub contract_events: Vec<Uuid>,
    pub document_types: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            full_name: employee.full_name(),
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            username: employee.username,
            contract_status: employee.contract_status,
            role: employee.role,
            cpf: employee.cpf,
            contract_events: employee.contract_events,
            document_types: employee.document_types,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

pub(crate) fn validate_username_format(
    username: &str,
) -> std::result::Result<(), validator::ValidationError> {
    if validate_username(username) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_format"))
    }
}

/// Request for creating an employee
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(custom(function = "validate_username_format", message = "Invalid username format"))]
    pub username: String,

    #[validate(length(min = 8))]
    pub password: String,

    /// Bare or formatted; canonicalised on deserialization
    pub cpf: Cpf,

    pub role: Option<Role>,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            password: request.password,
            cpf: request.cpf,
            role: request.role,
        }
    }
}

/// Request for updating an employee
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(custom(function = "validate_username_format", message = "Invalid username format"))]
    pub username: Option<String>,

    #[validate(length(min = 8))]
    pub password: Option<String>,

    pub cpf: Option<Cpf>,

    pub role: Option<Role>,
}

impl From<UpdateEmployeeRequest> for EmployeeChanges {
    fn from(request: UpdateEmployeeRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            password: request.password,
            role: request.role,
            cpf: request.cpf,
        }
    }
}

/// GET /employees
pub async fn list_employees<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<EmployeeResponse>>> {
    let employees = state.employees.find_all(pagination).await?;
    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

/// GET /employees/cpf/{cpf}
pub async fn get_employee_by_cpf<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    CpfPath(cpf): CpfPath,
) -> Result<Json<EmployeeResponse>> {
    let employee = state.employees.find_by_cpf(&cpf).await?;
    Ok(Json(employee.into()))
}

/// GET /employees/{id}
///
/// Common employees may only read their own record.
pub async fn get_employee<S: Store>(
    AuthUser(payload): AuthUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
) -> Result<Json<EmployeeResponse>> {
    if payload.role.is_common() && payload.employee_id() != id {
        return Err(Error::Authorization(
            "You can only view your own employee record".to_string(),
        ));
    }

    let employee = state.employees.find_by_id(id).await?;
    Ok(Json(employee.into()))
}

/// POST /employees
pub async fn create_employee<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>)> {
    let employee = state.employees.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// PATCH /employees/{id}
pub async fn update_employee<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>> {
    let employee = state.employees.update(id, request.into()).await?;
    Ok(Json(employee.into()))
}

/// DELETE /employees/{id}
pub async fn delete_employee<S: Store>(
    _user: AdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
