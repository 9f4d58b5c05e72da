//! Employee records
//!
//! Creation hashes the password, enforces username/CPF uniqueness and
//! appends the HIRED contract event in the same transaction as the insert.
//! Deletion removes the employee together with its documents and contract
//! events.

use uuid::Uuid;

use hrdocs_auth::hash_password;
use hrdocs_common::{Cpf, Error, Pagination, Result};
use hrdocs_db::{
    transactional, ContractEventRepository, DocumentRepository, EmployeeRepository, Session,
    Store,
};
use hrdocs_domain::validation::{validate_name, validate_username, PASSWORD_MIN_LEN};
use hrdocs_domain::{ContractEvent, ContractEventType, Employee, Role};

/// Reason recorded on the contract event appended when an employee is created
pub const HIRED_REASON: &str = "Hired";

/// Input for creating an employee
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// Plaintext; hashed before it reaches the store
    pub password: String,
    pub cpf: Cpf,
    /// Defaults to `common`
    pub role: Option<Role>,
}

/// Partial update of an employee
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub cpf: Option<Cpf>,
}

pub(crate) fn employee_not_found() -> Error {
    Error::NotFound("Employee not found".to_string())
}

fn check_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(Error::Validation(format!(
            "password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }
    Ok(())
}

/// Reject a username or CPF already held by an employee other than `except`
async fn ensure_unique<Sess: Session>(
    session: &mut Sess,
    username: Option<&str>,
    cpf: Option<&Cpf>,
    except: Option<Uuid>,
) -> Result<()> {
    if let Some(username) = username {
        if let Some(existing) = session.find_employee_by_username(username).await? {
            if Some(existing.id) != except {
                return Err(Error::Conflict("username already exists".to_string()));
            }
        }
    }

    if let Some(cpf) = cpf {
        if let Some(existing) = session.find_employee_by_cpf(cpf).await? {
            if Some(existing.id) != except {
                return Err(Error::Conflict("cpf already exists".to_string()));
            }
        }
    }

    Ok(())
}

/// Insert a new active employee and its HIRED event within `session`
pub(crate) async fn insert_hired_employee<Sess: Session>(
    session: &mut Sess,
    draft: NewEmployee,
    password_hash: String,
    role: Role,
) -> Result<Employee> {
    ensure_unique(session, Some(&draft.username), Some(&draft.cpf), None).await?;

    let mut employee = Employee::new(
        draft.first_name,
        draft.last_name,
        draft.username,
        password_hash,
        draft.cpf,
        role,
    )?;
    let hired = ContractEvent::record(
        ContractEventType::Hired,
        &employee,
        HIRED_REASON.to_string(),
    )?;
    employee.record_contract_event(hired.id);

    session.insert_employee(&employee).await?;
    session.insert_contract_event(&hired).await?;

    Ok(employee)
}

/// Validate the plaintext password and hash it
pub(crate) fn prepare_password(password: &str) -> Result<String> {
    check_password(password)?;
    hash_password(password)
}

#[derive(Clone)]
pub struct EmployeesService<S> {
    store: S,
}

impl<S: Store> EmployeesService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Employees ordered by creation time
    pub async fn find_all(&self, pagination: Pagination) -> Result<Vec<Employee>> {
        let mut session = self.store.begin().await?;
        session
            .list_employees(pagination.offset(), pagination.limit())
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Employee> {
        let mut session = self.store.begin().await?;
        session
            .find_employee(id)
            .await?
            .ok_or_else(employee_not_found)
    }

    pub async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Employee> {
        let mut session = self.store.begin().await?;
        session
            .find_employee_by_cpf(cpf)
            .await?
            .ok_or_else(employee_not_found)
    }

    pub async fn create(&self, draft: NewEmployee) -> Result<Employee> {
        let password_hash = prepare_password(&draft.password)?;
        let role = draft.role.unwrap_or_default();

        let employee = transactional(&self.store, move |s| {
            Box::pin(insert_hired_employee(s, draft, password_hash, role))
        })
        .await?;

        tracing::info!(
            employee_id = %employee.id,
            role = %employee.role,
            "Employee created"
        );
        Ok(employee)
    }

    pub async fn update(&self, id: Uuid, changes: EmployeeChanges) -> Result<Employee> {
        let password_hash = changes
            .password
            .as_deref()
            .map(prepare_password)
            .transpose()?;

        let employee = transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut employee = s.find_employee(id).await?.ok_or_else(employee_not_found)?;

                let username = changes.username.filter(|u| *u != employee.username);
                let cpf = changes.cpf.filter(|c| *c != employee.cpf);
                ensure_unique(s, username.as_deref(), cpf.as_ref(), Some(id)).await?;

                if let Some(first_name) = changes.first_name {
                    validate_name("first_name", &first_name)?;
                    employee.first_name = first_name;
                }
                if let Some(last_name) = changes.last_name {
                    validate_name("last_name", &last_name)?;
                    employee.last_name = last_name;
                }
                if let Some(username) = username {
                    if !validate_username(&username) {
                        return Err(Error::Validation(
                            "username must be 3-30 characters of letters, digits, '.', '_' or '-'"
                                .to_string(),
                        ));
                    }
                    employee.username = username;
                }
                if let Some(cpf) = cpf {
                    employee.cpf = cpf;
                }
                if let Some(password_hash) = password_hash {
                    employee.password_hash = password_hash;
                }
                if let Some(role) = changes.role {
                    employee.role = role;
                }
                employee.touch();

                s.update_employee(&employee).await?;
                Ok(employee)
            })
        })
        .await?;

        tracing::info!(employee_id = %employee.id, "Employee updated");
        Ok(employee)
    }

    /// Remove the employee with its documents and contract events
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let (documents, events) = transactional(&self.store, move |s| {
            Box::pin(async move {
                if s.find_employee(id).await?.is_none() {
                    return Err(employee_not_found());
                }

                let documents = s.list_documents_by_employee(id).await?;
                for document in &documents {
                    s.delete_document(document.id).await?;
                }

                let events = s.list_contract_events_by_employee(id).await?;
                for event in &events {
                    s.delete_contract_event(event.id).await?;
                }

                s.delete_employee(id).await?;
                Ok((documents.len(), events.len()))
            })
        })
        .await?;

        tracing::info!(
            employee_id = %id,
            documents,
            contract_events = events,
            "Employee deleted"
        );
        Ok(())
    }
}
