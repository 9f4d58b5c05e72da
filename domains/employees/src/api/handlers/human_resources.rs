//! Fire and rehire handlers (manager or admin)
//!
//! - POST /human-resources/fire/{id}
//! - POST /human-resources/rehire/{id}

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use hrdocs_common::{IdPath, Result, ValidatedJson};
use hrdocs_db::Store;
use hrdocs_domain::ContractEvent;

use super::employees::EmployeeResponse;
use crate::api::middleware::{EmployeesState, ManagerOrAdminUser};
use crate::services::ContractChange;

#[derive(Debug, Deserialize, Validate)]
pub struct ContractActionRequest {
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ContractChangeResponse {
    pub employee: EmployeeResponse,
    pub contract_event: ContractEvent,
}

impl From<ContractChange> for ContractChangeResponse {
    fn from(change: ContractChange) -> Self {
        Self {
            employee: change.employee.into(),
            contract_event: change.event,
        }
    }
}

/// POST /human-resources/fire/{id}
pub async fn fire<S: Store>(
    user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ContractActionRequest>,
) -> Result<Json<ContractChangeResponse>> {
    let change = state
        .human_resources
        .fire(id, &user.payload, request.reason)
        .await?;
    Ok(Json(change.into()))
}

/// POST /human-resources/rehire/{id}
pub async fn re_hire<S: Store>(
    user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ContractActionRequest>,
) -> Result<Json<ContractChangeResponse>> {
    let change = state
        .human_resources
        .re_hire(id, &user.payload, request.reason)
        .await?;
    Ok(Json(change.into()))
}
