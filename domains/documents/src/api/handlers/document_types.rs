//! Document type handlers
//!
//! - GET /document-types, GET /document-types/{id} - any authenticated
//! - POST /document-types, PATCH/DELETE /document-types/{id} - manager or admin

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use validator::Validate;

use hrdocs_common::{IdPath, Result, ValidatedJson};
use hrdocs_db::Store;
use hrdocs_domain::{DocumentType, DocumentTypeName};

use crate::api::middleware::{AuthUser, DocumentsState, ManagerOrAdminUser};

/// Request for creating or renaming a document type
#[derive(Debug, Deserialize, Validate)]
pub struct DocumentTypeRequest {
    pub name: DocumentTypeName,
}

/// GET /document-types
pub async fn list_document_types<S: Store>(
    _user: AuthUser,
    State(state): State<DocumentsState<S>>,
) -> Result<Json<Vec<DocumentType>>> {
    Ok(Json(state.document_types.find_all().await?))
}

/// GET /document-types/{id}
pub async fn get_document_type<S: Store>(
    _user: AuthUser,
    State(state): State<DocumentsState<S>>,
    IdPath(id): IdPath,
) -> Result<Json<DocumentType>> {
    Ok(Json(state.document_types.find_by_id(id).await?))
}

/// POST /document-types
pub async fn create_document_type<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    ValidatedJson(request): ValidatedJson<DocumentTypeRequest>,
) -> Result<(StatusCode, Json<DocumentType>)> {
    let document_type = state.document_types.create(request.name).await?;
    Ok((StatusCode::CREATED, Json(document_type)))
}

/// PATCH /document-types/{id}
pub async fn update_document_type<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<DocumentTypeRequest>,
) -> Result<Json<DocumentType>> {
    Ok(Json(state.document_types.update(id, request.name).await?))
}

/// DELETE /document-types/{id}
pub async fn delete_document_type<S: Store>(
    _user: ManagerOrAdminUser,
    State(state): State<DocumentsState<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.document_types.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
