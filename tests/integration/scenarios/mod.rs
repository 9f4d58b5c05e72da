//! End-to-end onboarding flow

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
};
use serde_json::json;

use crate::common::{id_of, ids, TestApp, JANE_CPF, MANAGER_CPF, PASSWORD};

mod test_onboarding {
    use super::*;

    #[tokio::test]
    async fn test_jane_doe_onboarding() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let manager = app
            .hire(&admin.token, "Mary", "Manager", "mary", MANAGER_CPF, "manager")
            .await;

        // Hire Jane with a formatted CPF
        let jane = app
            .hire(&manager.token, "Jane", "Doe", "jane.doe", "987.654.321-00", "common")
            .await;
        let (_, found) = app.get(&format!("/employees/cpf/{}", JANE_CPF), &manager.token).await;
        assert_eq!(found["id"], jane.id.to_string());

        // Link CPF and RG
        let cpf_type = app.document_type(&admin.token, "CPF").await;
        let rg_type = app.document_type(&admin.token, "RG").await;
        let (status, linked) = app
            .post(
                &format!("/document-type-linkers/{}/link", jane.id),
                &manager.token,
                json!({ "document_type_ids": [cpf_type, rg_type] }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&linked["document_types"]), vec![cpf_type, rg_type]);

        // Jane sends her CPF scan
        let (_, documents) = app
            .get(&format!("/documents/employee/{}", jane.id), &jane.token)
            .await;
        let cpf_document = documents
            .as_array()
            .unwrap()
            .iter()
            .find(|doc| doc["document_type_id"] == cpf_type.to_string())
            .cloned()
            .unwrap();
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!(
                "/api/v1/document-files/{}",
                cpf_document["id"].as_str().unwrap()
            ))
            .header(AUTHORIZATION, format!("Bearer {}", jane.token))
            .header(CONTENT_TYPE, "application/pdf")
            .body(Body::from("%PDF-1.4"))
            .unwrap();
        let (status, sent) = app.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sent["status"], "available");
        assert!(sent["document_url"].as_str().unwrap().ends_with(".pdf"));

        // Unlink CPF: its document goes, RG stays
        let (status, unlinked) = app
            .post(
                &format!("/document-type-linkers/{}/unlink", jane.id),
                &manager.token,
                json!({ "document_type_ids": [cpf_type] }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&unlinked["deleted_documents"]), vec![id_of(&cpf_document)]);
        assert_eq!(ids(&unlinked["document_types"]), vec![rg_type]);

        let (_, remaining) = app
            .get(&format!("/documents/employee/{}", jane.id), &jane.token)
            .await;
        let remaining = remaining.as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["document_type_id"], rg_type.to_string());
        assert_eq!(remaining[0]["status"], "missing");

        let (status, _) = app
            .get(
                &format!("/documents/{}", cpf_document["id"].as_str().unwrap()),
                &manager.token,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fired_employee_keeps_records_and_returns_on_rehire() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;
        let rg_type = app.document_type(&admin.token, "RG").await;
        app.post(
            &format!("/document-type-linkers/{}/link", jane.id),
            &admin.token,
            json!({ "document_type_ids": [rg_type] }),
        )
        .await;

        let (status, _) = app
            .post(
                &format!("/human-resources/fire/{}", jane.id),
                &admin.token,
                json!({ "reason": "Contract ended" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.sign_in(&jane.username, PASSWORD).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, documents) = app
            .get(&format!("/documents/employee/{}", jane.id), &admin.token)
            .await;
        assert_eq!(documents.as_array().unwrap().len(), 1);

        let (status, _) = app
            .post(
                &format!("/human-resources/rehire/{}", jane.id),
                &admin.token,
                json!({ "reason": "Returned" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.sign_in(&jane.username, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
    }
}

