//! Documents domain state and auth backend integration

use axum::extract::FromRef;
use hrdocs_auth::AuthBackend;
use hrdocs_db::Store;

use crate::services::{
    DocumentFilesService, DocumentTypeLinkersService, DocumentTypesService, DocumentsService,
    EmployeeDocumentService,
};

pub use hrdocs_auth::{AuthUser, ManagerOrAdminUser};

/// Application state for the Documents domain
#[derive(Clone)]
pub struct DocumentsState<S> {
    pub auth: AuthBackend,
    pub document_types: DocumentTypesService<S>,
    pub documents: DocumentsService<S>,
    pub employee_documents: EmployeeDocumentService<S>,
    pub document_files: DocumentFilesService<S>,
    pub linkers: DocumentTypeLinkersService<S>,
}

impl<S: Store> DocumentsState<S> {
    pub fn new(store: S, auth: AuthBackend, storage_base_url: impl Into<String>) -> Self {
        Self {
            auth,
            document_types: DocumentTypesService::new(store.clone()),
            documents: DocumentsService::new(store.clone()),
            employee_documents: EmployeeDocumentService::new(store.clone()),
            document_files: DocumentFilesService::new(store.clone(), storage_base_url),
            linkers: DocumentTypeLinkersService::new(store),
        }
    }
}

impl<S> FromRef<DocumentsState<S>> for AuthBackend {
    fn from_ref(state: &DocumentsState<S>) -> Self {
        state.auth.clone()
    }
}
