//! Bootstrap of the first admin employee

use hrdocs_common::{Error, Result};
use hrdocs_db::{transactional, EmployeeRepository, Store};
use hrdocs_domain::{Employee, Role};

use super::employees::{insert_hired_employee, prepare_password, NewEmployee};

#[derive(Clone)]
pub struct AdminEmployeesService<S> {
    store: S,
}

impl<S: Store> AdminEmployeesService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an admin employee; only allowed while no admin exists.
    ///
    /// The requested role on `draft` is ignored.
    pub async fn create_admin(&self, draft: NewEmployee) -> Result<Employee> {
        let password_hash = prepare_password(&draft.password)?;

        let admin = transactional(&self.store, move |s| {
            Box::pin(async move {
                if s.count_employees_with_role(Role::Admin).await? > 0 {
                    return Err(Error::Conflict(
                        "An admin employee already exists".to_string(),
                    ));
                }
                insert_hired_employee(s, draft, password_hash, Role::Admin).await
            })
        })
        .await?;

        tracing::info!(employee_id = %admin.id, "Admin employee bootstrapped");
        Ok(admin)
    }

    pub async fn admin_exists(&self) -> Result<bool> {
        let mut session = self.store.begin().await?;
        Ok(session.count_employees_with_role(Role::Admin).await? > 0)
    }

    /// Create the admin unless one already exists (`Ok(None)`).
    ///
    /// Any other failure, such as a username or CPF clash, is an error.
    pub async fn ensure_admin(&self, draft: NewEmployee) -> Result<Option<Employee>> {
        if self.admin_exists().await? {
            return Ok(None);
        }
        self.create_admin(draft).await.map(Some)
    }
}
