//! POST /admin-employees - unauthenticated bootstrap of the first admin

use axum::{extract::State, http::StatusCode, Json};

use hrdocs_common::{Result, ValidatedJson};
use hrdocs_db::Store;

use super::employees::{CreateEmployeeRequest, EmployeeResponse};
use crate::api::middleware::EmployeesState;

/// POST /admin-employees
///
/// Any `role` in the body is ignored; the employee is always an admin.
pub async fn create_admin<S: Store>(
    State(state): State<EmployeesState<S>>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>)> {
    let admin = state.admin_employees.create_admin(request.into()).await?;
    Ok((StatusCode::CREATED, Json(admin.into())))
}
