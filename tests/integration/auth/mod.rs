//! Sign-in and route guard tests

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
};
use uuid::Uuid;

use hrdocs_auth::AuthPayload;
use hrdocs_domain::{ContractStatus, Role};

use crate::common::assertions::assert_error;
use crate::common::{TestApp, COMMON_CPF, PASSWORD};

mod test_sign_in {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_returns_bearer_token() {
        let app = TestApp::new();
        app.admin().await;

        let (status, body) = app.sign_in("admin", PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        assert!(body["access_token"].as_str().unwrap().len() > 20);
        assert_eq!(body["payload"]["username"], "admin");
        assert_eq!(body["payload"]["role"], "admin");
        assert_eq!(body["payload"]["contract_status"], "active");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let app = TestApp::new();
        app.admin().await;

        let (unknown_status, unknown_body) = app.sign_in("nobody", PASSWORD).await;
        let (wrong_status, wrong_body) = app.sign_in("admin", "not-the-password").await;

        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_body, wrong_body);
        assert_eq!(unknown_body["error"]["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_fired_employee_cannot_sign_in() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", COMMON_CPF, "common")
            .await;

        let (status, _) = app
            .post(
                &format!("/human-resources/fire/{}", jane.id),
                &admin.token,
                serde_json::json!({ "reason": "Restructuring" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app.sign_in("jane.doe", PASSWORD).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Employee contract is inactive");
    }

    #[tokio::test]
    async fn test_me_returns_caller_without_password_hash() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, body) = app.get("/auth/me", &admin.token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], admin.id.to_string());
        assert_eq!(body["full_name"], "Ada Admin");
        assert!(body.get("password_hash").is_none());
        assert!(body.get("password").is_none());
    }
}

mod test_guard {
    use super::*;

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let app = TestApp::new();

        let (status, body) = app.request(Method::GET, "/employees", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error(&body, "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        let app = TestApp::new();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/employees")
            .header(AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();

        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error(&body, "INVALID_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = TestApp::new();

        let (status, body) = app.get("/employees", "not.a.token").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error(&body, "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_inactive_token_is_unauthorized_before_role_check() {
        let app = TestApp::new();
        let token = app.token_for(&AuthPayload {
            sub: Uuid::new_v4(),
            username: "ghost".to_string(),
            role: Role::Common,
            contract_status: ContractStatus::Inactive,
        });

        // Admin-only route: inactive wins over the missing role
        let (status, body) = app
            .delete(&format!("/employees/{}", Uuid::new_v4()), &token)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error(&body, "INACTIVE_CONTRACT");
    }

    #[tokio::test]
    async fn test_common_role_is_forbidden_on_manager_routes() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", COMMON_CPF, "common")
            .await;

        let (status, body) = app.get("/employees", &jane.token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_error(&body, "INSUFFICIENT_ROLE");

        // Authenticated-only routes stay open to her
        let (status, _) = app.get("/document-types", &jane.token).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_manager_is_forbidden_on_admin_routes() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let manager = app
            .hire(
                &admin.token,
                "Mary",
                "Manager",
                "mary.manager",
                crate::common::MANAGER_CPF,
                "manager",
            )
            .await;

        let (status, body) = app
            .delete(&format!("/employees/{}", admin.id), &manager.token)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_error(&body, "INSUFFICIENT_ROLE");
    }

    #[tokio::test]
    async fn test_public_routes_need_no_token() {
        let app = TestApp::new();

        let (status, body) = app.sign_in("nobody", PASSWORD).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error(&body, "AUTHENTICATION_ERROR");

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, _) = app.send(request).await;
        assert_eq!(status, StatusCode::OK);
    }
}
