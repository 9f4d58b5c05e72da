//! Route definitions for Documents domain API
//!
//! Paths are relative; the application nests them under `/api/v1`.

use axum::{
    routing::{get, post},
    Router,
};

use hrdocs_db::Store;

use super::handlers::{document_files, document_type_linkers, document_types, documents};
use super::middleware::DocumentsState;

/// Create document type routes
fn document_type_routes<S: Store>() -> Router<DocumentsState<S>> {
    Router::new()
        .route(
            "/document-types",
            get(document_types::list_document_types::<S>)
                .post(document_types::create_document_type::<S>),
        )
        .route(
            "/document-types/{id}",
            get(document_types::get_document_type::<S>)
                .patch(document_types::update_document_type::<S>)
                .delete(document_types::delete_document_type::<S>),
        )
}

/// Create document routes
fn document_routes<S: Store>() -> Router<DocumentsState<S>> {
    Router::new()
        .route("/documents", get(documents::list_documents::<S>))
        .route(
            "/documents/employee/{id}",
            get(documents::list_employee_documents::<S>),
        )
        .route(
            "/documents/{id}",
            get(documents::get_document::<S>).patch(documents::update_document_status::<S>),
        )
}

/// Create document file routes
fn document_file_routes<S: Store>() -> Router<DocumentsState<S>> {
    Router::new().route(
        "/document-files/{id}",
        post(document_files::send_document_file::<S>)
            .delete(document_files::delete_document_file::<S>),
    )
}

/// Create document type linking routes
fn linker_routes<S: Store>() -> Router<DocumentsState<S>> {
    Router::new()
        .route(
            "/document-type-linkers/{id}/link",
            post(document_type_linkers::link_document_types::<S>),
        )
        .route(
            "/document-type-linkers/{id}/unlink",
            post(document_type_linkers::unlink_document_types::<S>),
        )
}

/// Create all Documents domain API routes
pub fn routes<S: Store>() -> Router<DocumentsState<S>> {
    Router::new()
        .merge(document_type_routes())
        .merge(document_routes())
        .merge(document_file_routes())
        .merge(linker_routes())
}
