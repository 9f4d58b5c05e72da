//! Document file handlers (any authenticated employee; common employees
//! only on their own documents)
//!
//! - POST /document-files/{documentId} - the request's Content-Type picks
//!   the stored file extension
//! - DELETE /document-files/{documentId}

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};

use hrdocs_common::{IdPath, Result};
use hrdocs_db::Store;
use hrdocs_domain::Document;

use crate::api::middleware::{AuthUser, DocumentsState};

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// POST /document-files/{documentId}
pub async fn send_document_file<S: Store>(
    AuthUser(payload): AuthUser,
    State(state): State<DocumentsState<S>>,
    IdPath(document_id): IdPath,
    headers: HeaderMap,
) -> Result<Json<Document>> {
    let document = state
        .document_files
        .send_document_file(document_id, &payload, content_type(&headers))
        .await?;
    Ok(Json(document))
}

/// DELETE /document-files/{documentId}
pub async fn delete_document_file<S: Store>(
    AuthUser(payload): AuthUser,
    State(state): State<DocumentsState<S>>,
    IdPath(document_id): IdPath,
) -> Result<Json<Document>> {
    let document = state
        .document_files
        .delete_document_file(document_id, &payload)
        .await?;
    Ok(Json(document))
}
