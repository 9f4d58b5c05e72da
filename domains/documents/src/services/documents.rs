//! Per-employee documents
//!
//! Documents are created and deleted only by linking and unlinking document
//! types; this service reads them and adjusts their status.

use uuid::Uuid;

use hrdocs_common::{Pagination, Result};
use hrdocs_db::{transactional, DocumentRepository, EmployeeRepository, Store};
use hrdocs_domain::{Document, DocumentStatus};

use super::{document_not_found, employee_not_found};

#[derive(Clone)]
pub struct DocumentsService<S> {
    store: S,
}

impl<S: Store> DocumentsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, pagination: Pagination) -> Result<Vec<Document>> {
        let mut session = self.store.begin().await?;
        session
            .list_documents(pagination.offset(), pagination.limit())
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Document> {
        let mut session = self.store.begin().await?;
        session.find_document(id).await?.ok_or_else(document_not_found)
    }

    pub async fn find_by_employee(&self, employee_id: Uuid) -> Result<Vec<Document>> {
        let mut session = self.store.begin().await?;
        if session.find_employee(employee_id).await?.is_none() {
            return Err(employee_not_found());
        }
        session.list_documents_by_employee(employee_id).await
    }

    pub async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<Document> {
        let document = transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut document = s.find_document(id).await?.ok_or_else(document_not_found)?;
                document.set_status(status)?;
                s.update_document(&document).await?;
                Ok(document)
            })
        })
        .await?;

        tracing::info!(document_id = %id, status = %status, "Document status updated");
        Ok(document)
    }
}
