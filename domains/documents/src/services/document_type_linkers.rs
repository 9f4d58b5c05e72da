//! Document type linking workflow
//!
//! Linking a document type to an employee records it on the employee and
//! provisions one missing Document for the pair; unlinking removes both.
//! Each call is all-or-nothing: every requested id must resolve, and either
//! none of them may be linked yet (link) or all of them must be (unlink).

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use hrdocs_common::{Error, Result};
use hrdocs_db::{
    transactional, DocumentRepository, DocumentTypeRepository, EmployeeRepository, Session, Store,
};
use hrdocs_domain::{Document, DocumentType, Employee};

use super::employee_not_found;

/// Result of a successful link
#[derive(Debug, Clone, Serialize)]
pub struct LinkOutcome {
    pub employee_id: Uuid,
    /// Document type ids linked by this call
    pub linked_document_types: Vec<Uuid>,
    /// Placeholder documents created, one per linked type
    pub created_documents: Vec<Uuid>,
    /// Every document type now linked to the employee
    pub document_types: Vec<Uuid>,
}

/// Result of a successful unlink
#[derive(Debug, Clone, Serialize)]
pub struct UnlinkOutcome {
    pub employee_id: Uuid,
    pub unlinked_document_types: Vec<Uuid>,
    pub deleted_documents: Vec<Uuid>,
    /// Document types still linked to the employee
    pub document_types: Vec<Uuid>,
}

/// Drop repeated ids, keeping first occurrences in order
fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Requested ids with no matching document type
fn unresolved(requested: &[Uuid], found: &[DocumentType]) -> Vec<Uuid> {
    let found: HashSet<Uuid> = found.iter().map(|t| t.id).collect();
    requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect()
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(", ")
}

/// Deduplicate, resolve every id, and load the employee
async fn resolve<Sess: Session>(
    session: &mut Sess,
    employee_id: Uuid,
    document_type_ids: &[Uuid],
) -> Result<(Employee, Vec<Uuid>)> {
    let ids = dedupe(document_type_ids);
    if ids.is_empty() {
        return Err(Error::Validation(
            "At least one document type id is required".to_string(),
        ));
    }

    let found = session.find_document_types(&ids).await?;
    let missing = unresolved(&ids, &found);
    if !missing.is_empty() {
        return Err(Error::NotFound(format!(
            "Document types not found: {}",
            join_ids(&missing)
        )));
    }

    let employee = session
        .find_employee(employee_id)
        .await?
        .ok_or_else(employee_not_found)?;

    Ok((employee, ids))
}

async fn link<Sess: Session>(
    session: &mut Sess,
    employee_id: Uuid,
    document_type_ids: Vec<Uuid>,
) -> Result<LinkOutcome> {
    let (mut employee, ids) = resolve(session, employee_id, &document_type_ids).await?;

    employee.link_document_types(&ids)?;

    let mut created_documents = Vec::with_capacity(ids.len());
    for document_type_id in &ids {
        let document = Document::placeholder(employee.id, *document_type_id);
        session.insert_document(&document).await?;
        created_documents.push(document.id);
    }
    session.update_employee(&employee).await?;

    Ok(LinkOutcome {
        employee_id: employee.id,
        linked_document_types: ids,
        created_documents,
        document_types: employee.document_types,
    })
}

async fn unlink<Sess: Session>(
    session: &mut Sess,
    employee_id: Uuid,
    document_type_ids: Vec<Uuid>,
) -> Result<UnlinkOutcome> {
    let (mut employee, ids) = resolve(session, employee_id, &document_type_ids).await?;

    employee.unlink_document_types(&ids)?;

    let mut deleted_documents = Vec::with_capacity(ids.len());
    for document_type_id in &ids {
        let document = session
            .find_document_by_pair(employee.id, *document_type_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "Document for document type {} not found",
                    document_type_id
                ))
            })?;
        session.delete_document(document.id).await?;
        deleted_documents.push(document.id);
    }
    session.update_employee(&employee).await?;

    Ok(UnlinkOutcome {
        employee_id: employee.id,
        unlinked_document_types: ids,
        deleted_documents,
        document_types: employee.document_types,
    })
}

#[derive(Clone)]
pub struct DocumentTypeLinkersService<S> {
    store: S,
}

impl<S: Store> DocumentTypeLinkersService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn link_document_types(
        &self,
        employee_id: Uuid,
        document_type_ids: Vec<Uuid>,
    ) -> Result<LinkOutcome> {
        let outcome = transactional(&self.store, move |s| {
            Box::pin(link(s, employee_id, document_type_ids))
        })
        .await?;

        tracing::info!(
            employee_id = %employee_id,
            linked = outcome.linked_document_types.len(),
            "Document types linked"
        );
        Ok(outcome)
    }

    pub async fn unlink_document_types(
        &self,
        employee_id: Uuid,
        document_type_ids: Vec<Uuid>,
    ) -> Result<UnlinkOutcome> {
        let outcome = transactional(&self.store, move |s| {
            Box::pin(unlink(s, employee_id, document_type_ids))
        })
        .await?;

        tracing::info!(
            employee_id = %employee_id,
            unlinked = outcome.unlinked_document_types.len(),
            "Document types unlinked"
        );
        Ok(outcome)
    }
}
