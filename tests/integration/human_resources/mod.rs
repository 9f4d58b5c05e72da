//! Fire/rehire and contract event tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::assertions::assert_error;
use crate::common::{EmployeeFixture, TestApp, JANE_CPF, MANAGER_CPF};

async fn fire(app: &TestApp, actor: &EmployeeFixture, target: uuid::Uuid) -> (StatusCode, Value) {
    app.post(
        &format!("/human-resources/fire/{}", target),
        &actor.token,
        json!({ "reason": "Restructuring" }),
    )
    .await
}

async fn rehire(app: &TestApp, actor: &EmployeeFixture, target: uuid::Uuid) -> (StatusCode, Value) {
    app.post(
        &format!("/human-resources/rehire/{}", target),
        &actor.token,
        json!({ "reason": "Back from leave" }),
    )
    .await
}

mod test_fire_and_rehire {
    use super::*;

    #[tokio::test]
    async fn test_fire_then_rehire_records_events() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let manager = app
            .hire(&admin.token, "Mary", "Manager", "mary", MANAGER_CPF, "manager")
            .await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, body) = fire(&app, &manager, jane.id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee"]["contract_status"], "inactive");
        assert_eq!(body["contract_event"]["type"], "fired");
        assert_eq!(body["contract_event"]["reason"], "Restructuring");

        let (status, body) = rehire(&app, &manager, jane.id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee"]["contract_status"], "active");
        assert_eq!(body["contract_event"]["type"], "rehired");
        assert_eq!(body["employee"]["contract_events"].as_array().unwrap().len(), 3);

        let (status, events) = app
            .get(&format!("/contract-events/employee/{}", jane.id), &manager.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        let types: Vec<&str> = events
            .as_array()
            .unwrap()
            .iter()
            .map(|event| event["type"].as_str().unwrap())
            .collect();
        assert_eq!(types.len(), 3);
        assert!(types.contains(&"hired"));
        assert!(types.contains(&"fired"));
        assert!(types.contains(&"rehired"));
    }

    #[tokio::test]
    async fn test_firing_twice_is_rejected() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, _) = fire(&app, &admin, jane.id).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = fire(&app, &admin, jane.id).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rehiring_active_employee_is_rejected() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, body) = rehire(&app, &admin, jane.id).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");

        fire(&app, &admin, jane.id).await;
        let (status, _) = rehire(&app, &admin, jane.id).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = rehire(&app, &admin, jane.id).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_acting_on_self_is_rejected() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, body) = fire(&app, &admin, admin.id).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "You cannot fire yourself");

        let (status, body) = rehire(&app, &admin, admin.id).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "You cannot rehire yourself");

        let (_, me) = app.get("/auth/me", &admin.token).await;
        assert_eq!(me["contract_status"], "active");
        assert_eq!(me["contract_events"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_employee_is_not_found() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, _) = fire(&app, &admin, uuid::Uuid::new_v4()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_common_employee_cannot_fire() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, _) = fire(&app, &jane, admin.id).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod test_contract_events {
    use super::*;

    #[tokio::test]
    async fn test_admin_amends_and_deletes_event() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;
        let (_, change) = fire(&app, &admin, jane.id).await;
        let event_id = change["contract_event"]["id"].as_str().unwrap().to_string();

        let (status, body) = app
            .patch(
                &format!("/contract-events/{}", event_id),
                &admin.token,
                json!({ "reason": "Position eliminated" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reason"], "Position eliminated");
        assert_eq!(body["type"], "fired");

        let (status, _) = app
            .delete(&format!("/contract-events/{}", event_id), &admin.token)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .get(&format!("/contract-events/{}", event_id), &admin.token)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, employee) = app
            .get(&format!("/employees/{}", jane.id), &admin.token)
            .await;
        let remaining = employee["contract_events"].as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|id| id.as_str().unwrap() != event_id));
    }

    #[tokio::test]
    async fn test_manager_cannot_amend_events() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let manager = app
            .hire(&admin.token, "Mary", "Manager", "mary", MANAGER_CPF, "manager")
            .await;
        let (_, events) = app
            .get(&format!("/contract-events/employee/{}", manager.id), &manager.token)
            .await;
        let event_id = events[0]["id"].as_str().unwrap().to_string();

        let (status, _) = app
            .patch(
                &format!("/contract-events/{}", event_id),
                &manager.token,
                json!({ "reason": "Edited" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
