//! Contract event handlers
//!
//! - GET /contract-events, GET /contract-events/{id},
//!   GET /contract-events/employee/{id} - manager or admin
//! - PATCH /contract-events/{id}, DELETE /contract-events/{id} - admin

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use hrdocs_common::{IdPath, Pagination, Result, ValidatedJson};
use hrdocs_db::Store;
use hrdocs_domain::ContractEvent;

use crate::api::middleware::{AdminUser, EmployeesState, ManagerOrAdminUser};
use crate::services::ContractEventChanges;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContractEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub reason: Option<String>,

    pub date: Option<DateTime<Utc>>,
}

/// GET /contract-events
pub async fn list_contract_events<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ContractEvent>>> {
    Ok(Json(state.contract_events.find_all(pagination).await?))
}

/// GET /contract-events/{id}
pub async fn get_contract_event<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
) -> Result<Json<ContractEvent>> {
    Ok(Json(state.contract_events.find_by_id(id).await?))
}

/// GET /contract-events/employee/{id}
pub async fn list_employee_contract_events<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(employee_id): IdPath,
) -> Result<Json<Vec<ContractEvent>>> {
    Ok(Json(
        state.contract_events.find_by_employee(employee_id).await?,
    ))
}

/// PATCH /contract-events/{id}
pub async fn update_contract_event<S: Store>(
    _user: AdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateContractEventRequest>,
) -> Result<Json<ContractEvent>> {
    let changes = ContractEventChanges {
        reason: request.reason,
        date: request.date,
    };
    Ok(Json(state.contract_events.update(id, changes).await?))
}

/// DELETE /contract-events/{id}
pub async fn delete_contract_event<S: Store>(
    _user: AdminUser,
    State(state): State<EmployeesState<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.contract_events.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
