//! In-memory store adapter
//!
//! Each session reads from its own snapshot of the published tables and
//! records every write. On commit the writes are replayed against the
//! current published tables under one lock, re-checking the unique
//! constraints; either every write is published or none is. Concurrent
//! read-modify-write of the same record is last-commit-wins.

use async_trait::async_trait;
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use hrdocs_common::{Cpf, Error, RepositoryError, Result};
use hrdocs_domain::{ContractEvent, Document, DocumentType, Employee, Role};

use crate::repositories::{
    ContractEventRepository, DocumentRepository, DocumentTypeRepository, EmployeeRepository,
};
use crate::store::{Session, Store, CLOSED_HANDLE_MESSAGE};

#[derive(Debug, Clone, Default)]
struct Tables {
    employees: HashMap<Uuid, Employee>,
    document_types: HashMap<Uuid, DocumentType>,
    documents: HashMap<Uuid, Document>,
    contract_events: HashMap<Uuid, ContractEvent>,
}

/// A staged write
#[derive(Debug, Clone)]
enum Write {
    InsertEmployee(Employee),
    UpdateEmployee(Employee),
    DeleteEmployee(Uuid),
    InsertDocumentType(DocumentType),
    UpdateDocumentType(DocumentType),
    DeleteDocumentType(Uuid),
    InsertDocument(Document),
    UpdateDocument(Document),
    DeleteDocument(Uuid),
    InsertContractEvent(ContractEvent),
    UpdateContractEvent(ContractEvent),
    DeleteContractEvent(Uuid),
}

fn conflict(field: &str) -> Error {
    RepositoryError::AlreadyExists(field.to_string()).into()
}

fn not_found(what: &str) -> Error {
    Error::NotFound(format!("{} not found", what))
}

fn upsert<T: Clone>(
    table: &mut HashMap<Uuid, T>,
    id: Uuid,
    row: &T,
    insert: bool,
    what: &str,
) -> Result<()> {
    match (insert, table.contains_key(&id)) {
        (true, true) => Err(conflict("id")),
        (false, false) => Err(not_found(what)),
        _ => {
            table.insert(id, row.clone());
            Ok(())
        }
    }
}

fn remove<T>(table: &mut HashMap<Uuid, T>, id: Uuid, what: &str) -> Result<()> {
    table.remove(&id).map(|_| ()).ok_or_else(|| not_found(what))
}

impl Tables {
    fn apply(&mut self, write: &Write) -> Result<()> {
        match write {
            Write::InsertEmployee(e) | Write::UpdateEmployee(e) => {
                let others = self.employees.values().filter(|other| other.id != e.id);
                for other in others {
                    if other.username == e.username {
                        return Err(conflict("username"));
                    }
                    if other.cpf == e.cpf {
                        return Err(conflict("cpf"));
                    }
                }
                let insert = matches!(write, Write::InsertEmployee(_));
                upsert(&mut self.employees, e.id, e, insert, "Employee")
            }
            Write::DeleteEmployee(id) => remove(&mut self.employees, *id, "Employee"),

            Write::InsertDocumentType(t) | Write::UpdateDocumentType(t) => {
                if self
                    .document_types
                    .values()
                    .any(|other| other.id != t.id && other.name == t.name)
                {
                    return Err(conflict("name"));
                }
                let insert = matches!(write, Write::InsertDocumentType(_));
                upsert(&mut self.document_types, t.id, t, insert, "Document type")
            }
            Write::DeleteDocumentType(id) => {
                remove(&mut self.document_types, *id, "Document type")
            }

            Write::InsertDocument(d) | Write::UpdateDocument(d) => {
                if self.documents.values().any(|other| {
                    other.id != d.id
                        && other.employee_id == d.employee_id
                        && other.document_type_id == d.document_type_id
                }) {
                    return Err(conflict("document"));
                }
                let insert = matches!(write, Write::InsertDocument(_));
                upsert(&mut self.documents, d.id, d, insert, "Document")
            }
            Write::DeleteDocument(id) => remove(&mut self.documents, *id, "Document"),

            Write::InsertContractEvent(c) | Write::UpdateContractEvent(c) => {
                let insert = matches!(write, Write::InsertContractEvent(_));
                upsert(&mut self.contract_events, c.id, c, insert, "Contract event")
            }
            Write::DeleteContractEvent(id) => {
                remove(&mut self.contract_events, *id, "Contract event")
            }
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    tables: Mutex<Tables>,
    closed: AtomicBool,
}

/// In-process store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Result<Tables> {
        self.inner
            .tables
            .lock()
            .map(|tables| tables.clone())
            .map_err(|_| Error::Internal("Memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    type Session = MemorySession;

    async fn begin(&self) -> Result<MemorySession> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(Error::Internal(CLOSED_HANDLE_MESSAGE.to_string()));
        }
        Ok(MemorySession {
            store: self.inner.clone(),
            tables: self.snapshot()?,
            writes: Vec::new(),
        })
    }

    async fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }
}

/// Session over a private snapshot of the tables
#[derive(Debug)]
pub struct MemorySession {
    store: Arc<Inner>,
    tables: Tables,
    writes: Vec<Write>,
}

impl MemorySession {
    fn stage(&mut self, write: Write) -> Result<()> {
        self.tables.apply(&write)?;
        self.writes.push(write);
        Ok(())
    }
}

/// Creation order, then id for a stable tie-break
fn by_creation<T>(
    key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, Uuid),
) -> impl Fn(&T, &T) -> CmpOrdering {
    move |a, b| key(a).cmp(&key(b))
}

fn page<T>(rows: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    rows.into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl Session for MemorySession {
    async fn commit(self) -> Result<()> {
        let mut published = self
            .store
            .tables
            .lock()
            .map_err(|_| Error::Internal("Memory store lock poisoned".to_string()))?;

        let mut next = published.clone();
        for write in &self.writes {
            next.apply(write)?;
        }
        *published = next;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for MemorySession {
    async fn find_employee(&mut self, id: Uuid) -> Result<Option<Employee>> {
        Ok(self.tables.employees.get(&id).cloned())
    }

    async fn find_employee_by_username(&mut self, username: &str) -> Result<Option<Employee>> {
        Ok(self
            .tables
            .employees
            .values()
            .find(|e| e.username == username)
            .cloned())
    }

    async fn find_employee_by_cpf(&mut self, cpf: &Cpf) -> Result<Option<Employee>> {
        Ok(self
            .tables
            .employees
            .values()
            .find(|e| &e.cpf == cpf)
            .cloned())
    }

    async fn list_employees(&mut self, offset: i64, limit: i64) -> Result<Vec<Employee>> {
        let mut rows: Vec<Employee> = self.tables.employees.values().cloned().collect();
        rows.sort_by(by_creation(|e: &Employee| (e.created_at, e.id)));
        Ok(page(rows, offset, limit))
    }

    async fn insert_employee(&mut self, employee: &Employee) -> Result<()> {
        self.stage(Write::InsertEmployee(employee.clone()))
    }

    async fn update_employee(&mut self, employee: &Employee) -> Result<()> {
        self.stage(Write::UpdateEmployee(employee.clone()))
    }

    async fn delete_employee(&mut self, id: Uuid) -> Result<()> {
        self.stage(Write::DeleteEmployee(id))
    }

    async fn count_employees_with_role(&mut self, role: Role) -> Result<i64> {
        Ok(self
            .tables
            .employees
            .values()
            .filter(|e| e.role == role)
            .count() as i64)
    }

    async fn count_employees_with_document_type(&mut self, document_type_id: Uuid) -> Result<i64> {
        Ok(self
            .tables
            .employees
            .values()
            .filter(|e| e.has_document_type(document_type_id))
            .count() as i64)
    }
}

#[async_trait]
impl DocumentTypeRepository for MemorySession {
    async fn find_document_type(&mut self, id: Uuid) -> Result<Option<DocumentType>> {
        Ok(self.tables.document_types.get(&id).cloned())
    }

    async fn find_document_types(&mut self, ids: &[Uuid]) -> Result<Vec<DocumentType>> {
        let mut rows: Vec<DocumentType> = ids
            .iter()
            .filter_map(|id| self.tables.document_types.get(id).cloned())
            .collect();
        rows.sort_by(by_creation(|t: &DocumentType| (t.created_at, t.id)));
        rows.dedup_by_key(|t| t.id);
        Ok(rows)
    }

    async fn list_document_types(&mut self) -> Result<Vec<DocumentType>> {
        let mut rows: Vec<DocumentType> = self.tables.document_types.values().cloned().collect();
        rows.sort_by(by_creation(|t: &DocumentType| (t.created_at, t.id)));
        Ok(rows)
    }

    async fn insert_document_type(&mut self, document_type: &DocumentType) -> Result<()> {
        self.stage(Write::InsertDocumentType(document_type.clone()))
    }

    async fn update_document_type(&mut self, document_type: &DocumentType) -> Result<()> {
        self.stage(Write::UpdateDocumentType(document_type.clone()))
    }

    async fn delete_document_type(&mut self, id: Uuid) -> Result<()> {
        self.stage(Write::DeleteDocumentType(id))
    }
}

#[async_trait]
impl DocumentRepository for MemorySession {
    async fn find_document(&mut self, id: Uuid) -> Result<Option<Document>> {
        Ok(self.tables.documents.get(&id).cloned())
    }

    async fn find_document_by_pair(
        &mut self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<Option<Document>> {
        Ok(self
            .tables
            .documents
            .values()
            .find(|d| d.employee_id == employee_id && d.document_type_id == document_type_id)
            .cloned())
    }

    async fn list_documents(&mut self, offset: i64, limit: i64) -> Result<Vec<Document>> {
        let mut rows: Vec<Document> = self.tables.documents.values().cloned().collect();
        rows.sort_by(by_creation(|d: &Document| (d.created_at, d.id)));
        Ok(page(rows, offset, limit))
    }

    async fn list_documents_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Document>> {
        let mut rows: Vec<Document> = self
            .tables
            .documents
            .values()
            .filter(|d| d.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by(by_creation(|d: &Document| (d.created_at, d.id)));
        Ok(rows)
    }

    async fn insert_document(&mut self, document: &Document) -> Result<()> {
        self.stage(Write::InsertDocument(document.clone()))
    }

    async fn update_document(&mut self, document: &Document) -> Result<()> {
        self.stage(Write::UpdateDocument(document.clone()))
    }

    async fn delete_document(&mut self, id: Uuid) -> Result<()> {
        self.stage(Write::DeleteDocument(id))
    }
}

#[async_trait]
impl ContractEventRepository for MemorySession {
    async fn find_contract_event(&mut self, id: Uuid) -> Result<Option<ContractEvent>> {
        Ok(self.tables.contract_events.get(&id).cloned())
    }

    async fn list_contract_events(
        &mut self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ContractEvent>> {
        let mut rows: Vec<ContractEvent> = self.tables.contract_events.values().cloned().collect();
        rows.sort_by(by_creation(|c: &ContractEvent| (c.created_at, c.id)));
        Ok(page(rows, offset, limit))
    }

    async fn list_contract_events_by_employee(
        &mut self,
        employee_id: Uuid,
    ) -> Result<Vec<ContractEvent>> {
        let mut rows: Vec<ContractEvent> = self
            .tables
            .contract_events
            .values()
            .filter(|c| c.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by(by_creation(|c: &ContractEvent| (c.created_at, c.id)));
        Ok(rows)
    }

    async fn insert_contract_event(&mut self, event: &ContractEvent) -> Result<()> {
        self.stage(Write::InsertContractEvent(event.clone()))
    }

    async fn update_contract_event(&mut self, event: &ContractEvent) -> Result<()> {
        self.stage(Write::UpdateContractEvent(event.clone()))
    }

    async fn delete_contract_event(&mut self, id: Uuid) -> Result<()> {
        self.stage(Write::DeleteContractEvent(id))
    }
}
