//! PostgreSQL store adapter
//!
//! One `PgSession` wraps one `sqlx` transaction. Queries are runtime-checked
//! `query_as` calls so the crate builds without a live database.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use hrdocs_common::{Cpf, Error, RepositoryError, Result};
use hrdocs_domain::{ContractEvent, Document, DocumentType, Employee, Role};

use crate::repositories::{
    ContractEventRepository, DocumentRepository, DocumentTypeRepository, EmployeeRepository,
};
use crate::store::{Session, Store, CLOSED_HANDLE_MESSAGE};

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, username, password_hash, \
     contract_status, role, cpf, contract_events, document_types, created_at, updated_at";

const DOCUMENT_TYPE_COLUMNS: &str = "id, name, created_at, updated_at";

const DOCUMENT_COLUMNS: &str =
    "id, status, employee_id, document_type_id, document_url, created_at, updated_at";

const CONTRACT_EVENT_COLUMNS: &str = "id, type, date, reason, employee_full_name, \
     employee_cpf, employee_id, created_at, updated_at";

/// Map a unique-constraint name from the migrations to the offending field
fn constraint_field(constraint: &str) -> &'static str {
    match constraint {
        "employees_username_key" => "username",
        "employees_cpf_key" => "cpf",
        "document_types_name_key" => "name",
        "documents_employee_id_document_type_id_key" => "document",
        _ => "record",
    }
}

/// Translate unique violations into `AlreadyExists`, everything else into a database error
fn map_write_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err.constraint().map(constraint_field).unwrap_or("record");
            return RepositoryError::AlreadyExists(field.to_string()).into();
        }
    }
    RepositoryError::from(err).into()
}

fn expect_one_row(rows_affected: u64, what: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(Error::NotFound(format!("{} not found", what)));
    }
    Ok(())
}

/// Pooled PostgreSQL handle
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the SQL migrations shipped with the workspace
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    type Session = PgSession;

    async fn begin(&self) -> Result<PgSession> {
        if self.pool.is_closed() {
            return Err(Error::Internal(CLOSED_HANDLE_MESSAGE.to_string()));
        }
        let tx = self.pool.begin().await?;
        Ok(PgSession { tx })
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Session backed by one PostgreSQL transaction
pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl Session for PgSession {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for PgSession {
    async fn find_employee(&mut self, id: Uuid) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(employee)
    }

    async fn find_employee_by_username(&mut self, username: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE username = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(employee)
    }

    async fn find_employee_by_cpf(&mut self, cpf: &Cpf) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE cpf = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(cpf.as_str())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(employee)
    }

    async fn list_employees(&mut self, offset: i64, limit: i64) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees ORDER BY created_at, id OFFSET $1 LIMIT $2",
            EMPLOYEE_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(employees)
    }

    async fn insert_employee(&mut self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (
                id, first_name, last_name, username, password_hash,
                contract_status, role, cpf, contract_events, document_types,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.username)
        .bind(&employee.password_hash)
        .bind(employee.contract_status)
        .bind(employee.role)
        .bind(employee.cpf.as_str())
        .bind(employee.contract_events.as_slice())
        .bind(employee.document_types.as_slice())
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_employee(&mut self, employee: &Employee) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                first_name = $2,
                last_name = $3,
                username = $4,
                password_hash = $5,
                contract_status = $6,
                role = $7,
                cpf = $8,
                contract_events = $9,
                document_types = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.username)
        .bind(&employee.password_hash)
        .bind(employee.contract_status)
        .bind(employee.role)
        .bind(employee.cpf.as_str())
        .bind(employee.contract_events.as_slice())
        .bind(employee.document_types.as_slice())
        .bind(employee.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        expect_one_row(result.rows_affected(), "Employee")
    }

    async fn delete_employee(&mut self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        expect_one_row(result.rows_affected(), "Employee")
    }

    async fn count_employees_with_role(&mut self, role: Role) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE role = $1")
            .bind(role)
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(count)
    }

    async fn count_employees_with_document_type(&mut self, document_type_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE $1 = ANY(document_types)",
        )
        .bind(document_type_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl DocumentTypeRepository for PgSession {
    async fn find_document_type(&mut self, id: Uuid) -> Result<Option<DocumentType>> {
        let document_type = sqlx::query_as::<_, DocumentType>(&format!(
            "SELECT {} FROM document_types WHERE id = $1",
            DOCUMENT_TYPE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(document_type)
    }

    async fn find_document_types(&mut self, ids: &[Uuid]) -> Result<Vec<DocumentType>> {
        let document_types = sqlx::query_as::<_, DocumentType>(&format!(
            "SELECT {} FROM document_types WHERE id = ANY($1) ORDER BY created_at, id",
            DOCUMENT_TYPE_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(document_types)
    }

    async fn list_document_types(&mut self) -> Result<Vec<DocumentType>> {
        let document_types = sqlx::query_as::<_, DocumentType>(&format!(
            "SELECT {} FROM document_types ORDER BY created_at, id",
            DOCUMENT_TYPE_COLUMNS
        ))
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(document_types)
    }

    async fn insert_document_type(&mut self, document_type: &DocumentType) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO document_types (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(document_type.id)
        .bind(document_type.name)
        .bind(document_type.created_at)
        .bind(document_type.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_document_type(&mut self, document_type: &DocumentType) -> Result<()> {
        let result = sqlx::query(
            "UPDATE document_types SET name = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(document_type.id)
        .bind(document_type.name)
        .bind(document_type.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        expect_one_row(result.rows_affected(), "Document type")
    }

    async fn delete_document_type(&mut self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM document_types WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        expect_one_row(result.rows_affected(), "Document type")
    }
}

#[async_trait]
impl DocumentRepository for PgSession {
    async fn find_document(&mut self, id: Uuid) -> Result<Option<Document>> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE id = $1",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(document)
    }

    async fn find_document_by_pair(
        &mut self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<Option<Document>> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE employee_id = $1 AND document_type_id = $2",
            DOCUMENT_COLUMNS
        ))
        .bind(employee_id)
        .bind(document_type_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(document)
    }

    async fn list_documents(&mut self, offset: i64, limit: i64) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents ORDER BY created_at, id OFFSET $1 LIMIT $2",
            DOCUMENT_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(documents)
    }

    async fn list_documents_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {} FROM documents WHERE employee_id = $1 ORDER BY created_at, id",
            DOCUMENT_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(documents)
    }

    async fn insert_document(&mut self, document: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (
                id, status, employee_id, document_type_id, document_url,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(document.id)
        .bind(document.status)
        .bind(document.employee_id)
        .bind(document.document_type_id)
        .bind(document.document_url.as_deref())
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_document(&mut self, document: &Document) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET
                status = $2,
                document_url = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(document.id)
        .bind(document.status)
        .bind(document.document_url.as_deref())
        .bind(document.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        expect_one_row(result.rows_affected(), "Document")
    }

    async fn delete_document(&mut self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        expect_one_row(result.rows_affected(), "Document")
    }
}

#[async_trait]
impl ContractEventRepository for PgSession {
    async fn find_contract_event(&mut self, id: Uuid) -> Result<Option<ContractEvent>> {
        let event = sqlx::query_as::<_, ContractEvent>(&format!(
            "SELECT {} FROM contract_events WHERE id = $1",
            CONTRACT_EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(event)
    }

    async fn list_contract_events(
        &mut self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ContractEvent>> {
        let events = sqlx::query_as::<_, ContractEvent>(&format!(
            "SELECT {} FROM contract_events ORDER BY created_at, id OFFSET $1 LIMIT $2",
            CONTRACT_EVENT_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(events)
    }

    async fn list_contract_events_by_employee(
        &mut self,
        employee_id: Uuid,
    ) -> Result<Vec<ContractEvent>> {
        let events = sqlx::query_as::<_, ContractEvent>(&format!(
            "SELECT {} FROM contract_events WHERE employee_id = $1 ORDER BY created_at, id",
            CONTRACT_EVENT_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(events)
    }

    async fn insert_contract_event(&mut self, event: &ContractEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contract_events (
                id, type, date, reason, employee_full_name, employee_cpf,
                employee_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(event.id)
        .bind(event.event_type)
        .bind(event.date)
        .bind(&event.reason)
        .bind(&event.employee_full_name)
        .bind(event.employee_cpf.as_str())
        .bind(event.employee_id)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_contract_event(&mut self, event: &ContractEvent) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE contract_events SET
                reason = $2,
                date = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(event.id)
        .bind(&event.reason)
        .bind(event.date)
        .bind(event.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_write_error)?;

        expect_one_row(result.rows_affected(), "Contract event")
    }

    async fn delete_contract_event(&mut self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM contract_events WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        expect_one_row(result.rows_affected(), "Contract event")
    }
}
