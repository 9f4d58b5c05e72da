//! Document together with its owning employee and document type

use serde::Serialize;
use uuid::Uuid;

use hrdocs_auth::AuthPayload;
use hrdocs_common::{Error, Result};
use hrdocs_db::{DocumentRepository, DocumentTypeRepository, EmployeeRepository, Session, Store};
use hrdocs_domain::{Document, DocumentType, Employee};

use super::{document_not_found, document_type_not_found, employee_not_found};

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDocument {
    pub document: Document,
    pub employee: Employee,
    pub document_type: DocumentType,
}

/// Common employees may only act on their own documents
pub fn check_document_access(actor: &AuthPayload, document: &Document) -> Result<()> {
    if actor.role.is_common() && !document.belongs_to(actor.employee_id()) {
        tracing::debug!(
            actor_id = %actor.sub,
            document_id = %document.id,
            "Rejected access to another employee's document"
        );
        return Err(Error::Authorization(
            "You can only access your own documents".to_string(),
        ));
    }
    Ok(())
}

/// Load a document with its employee and type within `session`
pub(crate) async fn load_employee_document<Sess: Session>(
    session: &mut Sess,
    document_id: Uuid,
) -> Result<EmployeeDocument> {
    let document = session
        .find_document(document_id)
        .await?
        .ok_or_else(document_not_found)?;
    let employee = session
        .find_employee(document.employee_id)
        .await?
        .ok_or_else(employee_not_found)?;
    let document_type = session
        .find_document_type(document.document_type_id)
        .await?
        .ok_or_else(document_type_not_found)?;

    Ok(EmployeeDocument {
        document,
        employee,
        document_type,
    })
}

#[derive(Clone)]
pub struct EmployeeDocumentService<S> {
    store: S,
}

impl<S: Store> EmployeeDocumentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load a document for `actor`, enforcing ownership for common employees
    pub async fn find(&self, document_id: Uuid, actor: &AuthPayload) -> Result<EmployeeDocument> {
        let mut session = self.store.begin().await?;
        let loaded = load_employee_document(&mut session, document_id).await?;
        check_document_access(actor, &loaded.document)?;
        Ok(loaded)
    }
}
