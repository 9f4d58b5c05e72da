//! Employee management tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::assertions::assert_error;
use crate::common::{employee_body, TestApp, ADMIN_CPF, COMMON_CPF, JANE_CPF, MANAGER_CPF};

mod test_admin_bootstrap {
    use super::*;

    #[tokio::test]
    async fn test_second_admin_is_rejected() {
        let app = TestApp::new();
        app.admin().await;

        let (status, body) = app
            .request(
                Method::POST,
                "/admin-employees",
                None,
                Some(employee_body("Other", "Admin", "other.admin", JANE_CPF, None)),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_error(&body, "CONFLICT");
    }

    #[tokio::test]
    async fn test_requested_role_is_ignored() {
        let app = TestApp::new();

        let (status, body) = app
            .request(
                Method::POST,
                "/admin-employees",
                None,
                Some(employee_body("Ada", "Admin", "admin", ADMIN_CPF, Some("common"))),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "admin");
        assert_eq!(body["contract_status"], "active");
    }
}

mod test_create_employee {
    use super::*;

    #[tokio::test]
    async fn test_create_defaults_to_common_and_records_hire() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, body) = app
            .post(
                "/employees",
                &admin.token,
                employee_body("Jane", "Doe", "jane.doe", JANE_CPF, None),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "common");
        assert_eq!(body["full_name"], "Jane Doe");
        assert_eq!(body["contract_events"].as_array().unwrap().len(), 1);
        assert!(body.get("password_hash").is_none());

        let id = body["id"].as_str().unwrap();
        let (status, events) = app
            .get(&format!("/contract-events/employee/{}", id), &admin.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        let events = events.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "hired");
        assert_eq!(events[0]["employee_full_name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_duplicate_username_or_cpf_conflicts() {
        let app = TestApp::new();
        let admin = app.admin().await;
        app.hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, body) = app
            .post(
                "/employees",
                &admin.token,
                employee_body("Jane", "Again", "jane.doe", COMMON_CPF, None),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "username already exists");

        let (status, body) = app
            .post(
                "/employees",
                &admin.token,
                employee_body("John", "Doe", "john.doe", "987.654.321-00", None),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "cpf already exists");
    }

    #[tokio::test]
    async fn test_invalid_cpf_is_rejected() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, _) = app
            .post(
                "/employees",
                &admin.token,
                employee_body("Jane", "Doe", "jane.doe", "12345678900", None),
            )
            .await;
        assert!(status.is_client_error());
        assert_ne!(status, StatusCode::CREATED);
    }
}

mod test_read_employee {
    use super::*;

    #[tokio::test]
    async fn test_common_employee_reads_only_self() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, body) = app
            .get(&format!("/employees/{}", jane.id), &jane.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "jane.doe");

        let (status, body) = app
            .get(&format!("/employees/{}", admin.id), &jane.token)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_error(&body, "AUTHORIZATION_ERROR");
    }

    #[tokio::test]
    async fn test_find_by_formatted_cpf() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, body) = app
            .get("/employees/cpf/987.654.321-00", &admin.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], jane.id.to_string());
    }

    #[tokio::test]
    async fn test_unknown_employee_is_not_found() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, body) = app
            .get(&format!("/employees/{}", Uuid::new_v4()), &admin.token)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_is_paginated() {
        let app = TestApp::new();
        let admin = app.admin().await;
        app.hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;
        app.hire(&admin.token, "Mary", "Manager", "mary", MANAGER_CPF, "manager")
            .await;

        let (status, body) = app.get("/employees", &admin.token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (status, body) = app.get("/employees?offset=1&limit=1", &admin.token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}

mod test_update_and_delete {
    use super::*;

    #[tokio::test]
    async fn test_update_changes_fields_and_password() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, body) = app
            .patch(
                &format!("/employees/{}", jane.id),
                &admin.token,
                json!({ "last_name": "Smith", "password": "another-pass" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["full_name"], "Jane Smith");

        let (status, _) = app.sign_in("jane.doe", "another-pass").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_to_taken_username_conflicts() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, _) = app
            .patch(
                &format!("/employees/{}", jane.id),
                &admin.token,
                json!({ "username": "admin" }),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_removes_employee() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;

        let (status, _) = app
            .delete(&format!("/employees/{}", jane.id), &admin.token)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .get(&format!("/employees/{}", jane.id), &admin.token)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, events) = app.get("/contract-events", &admin.token).await;
        assert_eq!(status, StatusCode::OK);
        assert!(events
            .as_array()
            .unwrap()
            .iter()
            .all(|event| event["employee_id"] != jane.id.to_string()));
    }
}
