//! Collection operations available on a session
//!
//! Every method runs inside the session's transaction. Updates and deletes
//! of a missing record return `Error::NotFound`; unique constraint
//! violations return `Error::Conflict` naming the field.

use async_trait::async_trait;
use uuid::Uuid;

use hrdocs_common::{Cpf, Result};
use hrdocs_domain::{ContractEvent, Document, DocumentType, Employee, Role};

#[async_trait]
pub trait EmployeeRepository: Send {
    async fn find_employee(&mut self, id: Uuid) -> Result<Option<Employee>>;

    async fn find_employee_by_username(&mut self, username: &str) -> Result<Option<Employee>>;

    async fn find_employee_by_cpf(&mut self, cpf: &Cpf) -> Result<Option<Employee>>;

    /// Employees ordered by creation time
    async fn list_employees(&mut self, offset: i64, limit: i64) -> Result<Vec<Employee>>;

    async fn insert_employee(&mut self, employee: &Employee) -> Result<()>;

    async fn update_employee(&mut self, employee: &Employee) -> Result<()>;

    async fn delete_employee(&mut self, id: Uuid) -> Result<()>;

    async fn count_employees_with_role(&mut self, role: Role) -> Result<i64>;

    /// Number of employees with `document_type_id` in their linked types
    async fn count_employees_with_document_type(&mut self, document_type_id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait DocumentTypeRepository: Send {
    async fn find_document_type(&mut self, id: Uuid) -> Result<Option<DocumentType>>;

    /// Resolve many ids at once; ids that do not exist are simply absent
    async fn find_document_types(&mut self, ids: &[Uuid]) -> Result<Vec<DocumentType>>;

    async fn list_document_types(&mut self) -> Result<Vec<DocumentType>>;

    async fn insert_document_type(&mut self, document_type: &DocumentType) -> Result<()>;

    async fn update_document_type(&mut self, document_type: &DocumentType) -> Result<()>;

    async fn delete_document_type(&mut self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait DocumentRepository: Send {
    async fn find_document(&mut self, id: Uuid) -> Result<Option<Document>>;

    async fn find_document_by_pair(
        &mut self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<Option<Document>>;

    async fn list_documents(&mut self, offset: i64, limit: i64) -> Result<Vec<Document>>;

    async fn list_documents_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Document>>;

    async fn insert_document(&mut self, document: &Document) -> Result<()>;

    async fn update_document(&mut self, document: &Document) -> Result<()>;

    async fn delete_document(&mut self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ContractEventRepository: Send {
    async fn find_contract_event(&mut self, id: Uuid) -> Result<Option<ContractEvent>>;

    async fn list_contract_events(&mut self, offset: i64, limit: i64)
        -> Result<Vec<ContractEvent>>;

    async fn list_contract_events_by_employee(
        &mut self,
        employee_id: Uuid,
    ) -> Result<Vec<ContractEvent>>;

    async fn insert_contract_event(&mut self, event: &ContractEvent) -> Result<()>;

    async fn update_contract_event(&mut self, event: &ContractEvent) -> Result<()>;

    async fn delete_contract_event(&mut self, id: Uuid) -> Result<()>;
}
