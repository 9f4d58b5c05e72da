//! Contract event audit trail
//!
//! Events are created only by hiring, firing and rehiring. This service
//! reads them and supports explicit corrections and removal.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use hrdocs_common::{Error, Pagination, Result};
use hrdocs_db::{transactional, ContractEventRepository, EmployeeRepository, Store};
use hrdocs_domain::ContractEvent;

use super::employee_not_found;

/// Explicit correction of an event
#[derive(Debug, Clone, Default)]
pub struct ContractEventChanges {
    pub reason: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

fn contract_event_not_found() -> Error {
    Error::NotFound("Contract event not found".to_string())
}

#[derive(Clone)]
pub struct ContractEventsService<S> {
    store: S,
}

impl<S: Store> ContractEventsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, pagination: Pagination) -> Result<Vec<ContractEvent>> {
        let mut session = self.store.begin().await?;
        session
            .list_contract_events(pagination.offset(), pagination.limit())
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ContractEvent> {
        let mut session = self.store.begin().await?;
        session
            .find_contract_event(id)
            .await?
            .ok_or_else(contract_event_not_found)
    }

    /// Events of one employee, oldest first
    pub async fn find_by_employee(&self, employee_id: Uuid) -> Result<Vec<ContractEvent>> {
        let mut session = self.store.begin().await?;
        if session.find_employee(employee_id).await?.is_none() {
            return Err(employee_not_found());
        }
        session.list_contract_events_by_employee(employee_id).await
    }

    pub async fn update(&self, id: Uuid, changes: ContractEventChanges) -> Result<ContractEvent> {
        transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut event = s
                    .find_contract_event(id)
                    .await?
                    .ok_or_else(contract_event_not_found)?;
                event.amend(changes.reason, changes.date)?;
                s.update_contract_event(&event).await?;
                Ok(event)
            })
        })
        .await
    }

    /// Remove an event and drop it from its employee's event list
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        transactional(&self.store, move |s| {
            Box::pin(async move {
                let event = s
                    .find_contract_event(id)
                    .await?
                    .ok_or_else(contract_event_not_found)?;

                if let Some(mut employee) = s.find_employee(event.employee_id).await? {
                    employee.forget_contract_event(event.id);
                    s.update_employee(&employee).await?;
                }

                s.delete_contract_event(event.id).await
            })
        })
        .await?;

        tracing::info!(contract_event_id = %id, "Contract event deleted");
        Ok(())
    }
}
