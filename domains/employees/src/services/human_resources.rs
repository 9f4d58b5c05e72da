//! Fire and rehire
//!
//! Each action flips the contract status and appends exactly one contract
//! event in a single transaction. Self-targeting and acting on an employee
//! already in the target state are rejected.

use uuid::Uuid;

use hrdocs_auth::AuthPayload;
use hrdocs_common::Result;
use hrdocs_db::{transactional, ContractEventRepository, EmployeeRepository, Store};
use hrdocs_domain::{ContractAction, ContractEvent, Employee, Role};

use super::employee_not_found;

/// Employee after a contract action, with the event it produced
#[derive(Debug, Clone)]
pub struct ContractChange {
    pub employee: Employee,
    pub event: ContractEvent,
}

#[derive(Clone)]
pub struct HumanResourcesService<S> {
    store: S,
}

impl<S: Store> HumanResourcesService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn fire(
        &self,
        employee_id: Uuid,
        actor: &AuthPayload,
        reason: String,
    ) -> Result<ContractChange> {
        self.apply(ContractAction::Fire, employee_id, actor, reason)
            .await
    }

    pub async fn re_hire(
        &self,
        employee_id: Uuid,
        actor: &AuthPayload,
        reason: String,
    ) -> Result<ContractChange> {
        self.apply(ContractAction::Rehire, employee_id, actor, reason)
            .await
    }

    async fn apply(
        &self,
        action: ContractAction,
        employee_id: Uuid,
        actor: &AuthPayload,
        reason: String,
    ) -> Result<ContractChange> {
        if actor.role != Role::Manager {
            tracing::warn!(
                actor_id = %actor.sub,
                actor_role = %actor.role,
                %action,
                "Contract action performed by a non-manager"
            );
        }

        let actor_id = actor.employee_id();
        let change = transactional(&self.store, move |s| {
            Box::pin(async move {
                let mut employee = s
                    .find_employee(employee_id)
                    .await?
                    .ok_or_else(employee_not_found)?;

                employee.apply_contract_action(action, actor_id)?;
                let event = ContractEvent::record(action.event_type(), &employee, reason)?;
                employee.record_contract_event(event.id);

                s.insert_contract_event(&event).await?;
                s.update_employee(&employee).await?;

                Ok(ContractChange { employee, event })
            })
        })
        .await?;

        tracing::info!(
            employee_id = %employee_id,
            actor_id = %actor_id,
            %action,
            status = %change.employee.contract_status,
            "Contract status changed"
        );
        Ok(change)
    }
}
