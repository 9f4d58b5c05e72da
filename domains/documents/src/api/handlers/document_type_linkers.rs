//! Document type linking handlers (manager or admin)
//!
//! - POST /document-type-linkers/{employeeId}/link
//! - POST /document-type-linkers/{employeeId}/unlink

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use hrdocs_common::{IdPath, Result, ValidatedJson};
use hrdocs_db::Store;

use crate::api::middleware::{DocumentsState, ManagerOrAdminUser};
use crate::services::{LinkOutcome, UnlinkOutcome};

#[derive(Debug, Deserialize, Validate)]
pub struct DocumentTypeIdsRequest {
    #[validate(length(min = 1))]
    pub document_type_ids: Vec<Uuid>,
}

/// POST /document-type-linkers/{employeeId}/link
pub async fn link_document_types<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    IdPath(employee_id): IdPath,
    ValidatedJson(request): ValidatedJson<DocumentTypeIdsRequest>,
) -> Result<Json<LinkOutcome>> {
    let outcome = state
        .linkers
        .link_document_types(employee_id, request.document_type_ids)
        .await?;
    Ok(Json(outcome))
}

/// POST /document-type-linkers/{employeeId}/unlink
pub async fn unlink_document_types<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    IdPath(employee_id): IdPath,
    ValidatedJson(request): ValidatedJson<DocumentTypeIdsRequest>,
) -> Result<Json<UnlinkOutcome>> {
    let outcome = state
        .linkers
        .unlink_document_types(employee_id, request.document_type_ids)
        .await?;
    Ok(Json(outcome))
}
