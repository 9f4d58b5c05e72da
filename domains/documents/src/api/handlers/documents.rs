//! Document handlers
//!
//! - GET /documents, PATCH /documents/{id} - manager or admin
//! - GET /documents/{id}, GET /documents/employee/{id} - manager, admin, or owner

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use hrdocs_common::{Error, IdPath, Pagination, Result, ValidatedJson};
use hrdocs_db::Store;
use hrdocs_domain::{Document, DocumentStatus, DocumentTypeName};

use crate::api::middleware::{AuthUser, DocumentsState, ManagerOrAdminUser};
use crate::services::EmployeeDocument;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDocumentStatusRequest {
    pub status: DocumentStatus,
}

/// Document with the names of its employee and type
#[derive(Debug, Serialize)]
pub struct DocumentDetailResponse {
    #[serde(flatten)]
    pub document: Document,
    pub employee_full_name: String,
    pub document_type_name: DocumentTypeName,
}

impl From<EmployeeDocument> for DocumentDetailResponse {
    fn from(loaded: EmployeeDocument) -> Self {
        Self {
            employee_full_name: loaded.employee.full_name(),
            document_type_name: loaded.document_type.name,
            document: loaded.document,
        }
    }
}

/// GET /documents
pub async fn list_documents<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Document>>> {
    Ok(Json(state.documents.find_all(pagination).await?))
}

/// GET /documents/{id}
pub async fn get_document<S: Store>(
    AuthUser(payload): AuthUser,
    State(state): State<DocumentsState<S>>,
    IdPath(id): IdPath,
) -> Result<Json<DocumentDetailResponse>> {
    let loaded = state.employee_documents.find(id, &payload).await?;
    Ok(Json(loaded.into()))
}

/// GET /documents/employee/{id}
pub async fn list_employee_documents<S: Store>(
    AuthUser(payload): AuthUser,
    State(state): State<DocumentsState<S>>,
    IdPath(employee_id): IdPath,
) -> Result<Json<Vec<Document>>> {
    if payload.role.is_common() && payload.employee_id() != employee_id {
        return Err(Error::Authorization(
            "You can only access your own documents".to_string(),
        ));
    }
    Ok(Json(state.documents.find_by_employee(employee_id).await?))
}

/// PATCH /documents/{id}
pub async fn update_document_status<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateDocumentStatusRequest>,
) -> Result<Json<Document>> {
    Ok(Json(state.documents.update_status(id, request.status).await?))
}
