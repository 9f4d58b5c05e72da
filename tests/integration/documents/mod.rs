//! Document type, linking and document file tests

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::assertions::assert_error;
use crate::common::{ids, EmployeeFixture, TestApp, COMMON_CPF, JANE_CPF};

async fn link(
    app: &TestApp,
    token: &str,
    employee: Uuid,
    types: &[Uuid],
) -> (StatusCode, Value) {
    app.post(
        &format!("/document-type-linkers/{}/link", employee),
        token,
        json!({ "document_type_ids": types }),
    )
    .await
}

async fn unlink(
    app: &TestApp,
    token: &str,
    employee: Uuid,
    types: &[Uuid],
) -> (StatusCode, Value) {
    app.post(
        &format!("/document-type-linkers/{}/unlink", employee),
        token,
        json!({ "document_type_ids": types }),
    )
    .await
}

async fn send_file(
    app: &TestApp,
    actor: &EmployeeFixture,
    document: &str,
    mime: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/document-files/{}", document))
        .header(AUTHORIZATION, format!("Bearer {}", actor.token))
        .header(CONTENT_TYPE, mime)
        .body(Body::from("file-bytes"))
        .unwrap();
    app.send(request).await
}

/// Admin plus a common employee with CPF and RG linked
struct Linked {
    app: TestApp,
    admin: EmployeeFixture,
    jane: EmployeeFixture,
    cpf_type: Uuid,
    rg_type: Uuid,
}

impl Linked {
    async fn new() -> Self {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;
        let cpf_type = app.document_type(&admin.token, "CPF").await;
        let rg_type = app.document_type(&admin.token, "RG").await;

        let (status, _) = link(&app, &admin.token, jane.id, &[cpf_type, rg_type]).await;
        assert_eq!(status, StatusCode::OK);

        Self {
            app,
            admin,
            jane,
            cpf_type,
            rg_type,
        }
    }

    /// Jane's document of the given type
    async fn document(&self, document_type: Uuid) -> Value {
        let (status, documents) = self
            .app
            .get(&format!("/documents/employee/{}", self.jane.id), &self.jane.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        documents
            .as_array()
            .unwrap()
            .iter()
            .find(|doc| doc["document_type_id"] == document_type.to_string())
            .cloned()
            .unwrap()
    }
}

mod test_document_types {
    use super::*;

    #[tokio::test]
    async fn test_crud_and_unique_names() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let cpf = app.document_type(&admin.token, "CPF").await;

        let (status, body) = app
            .post("/document-types", &admin.token, json!({ "name": "CPF" }))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_error(&body, "CONFLICT");

        let (status, body) = app
            .patch(
                &format!("/document-types/{}", cpf),
                &admin.token,
                json!({ "name": "FOTO_3X4" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "FOTO_3X4");

        let (status, body) = app.get("/document-types", &admin.token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "FOTO_3X4");

        let (status, _) = app
            .delete(&format!("/document-types/{}", cpf), &admin.token)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = app.get("/document-types", &admin.token).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_name_is_rejected() {
        let app = TestApp::new();
        let admin = app.admin().await;

        let (status, _) = app
            .post("/document-types", &admin.token, json!({ "name": "PASSPORT" }))
            .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_linked_type_cannot_be_deleted() {
        let linked = Linked::new().await;

        let (status, _) = linked
            .app
            .delete(
                &format!("/document-types/{}", linked.cpf_type),
                &linked.admin.token,
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}

mod test_linkers {
    use super::*;

    #[tokio::test]
    async fn test_link_creates_missing_documents() {
        let app = TestApp::new();
        let admin = app.admin().await;
        let jane = app
            .hire(&admin.token, "Jane", "Doe", "jane.doe", JANE_CPF, "common")
            .await;
        let cpf_type = app.document_type(&admin.token, "CPF").await;
        let rg_type = app.document_type(&admin.token, "RG").await;

        let (status, body) = link(&app, &admin.token, jane.id, &[cpf_type, rg_type]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["linked_document_types"]), vec![cpf_type, rg_type]);
        assert_eq!(body["created_documents"].as_array().unwrap().len(), 2);

        let (_, documents) = app
            .get(&format!("/documents/employee/{}", jane.id), &admin.token)
            .await;
        let documents = documents.as_array().unwrap();
        assert_eq!(documents.len(), 2);
        for document in documents {
            assert_eq!(document["status"], "missing");
            assert!(document["document_url"].is_null());
        }

        let (_, employee) = app
            .get(&format!("/employees/{}", jane.id), &admin.token)
            .await;
        assert_eq!(ids(&employee["document_types"]), vec![cpf_type, rg_type]);
    }

    #[tokio::test]
    async fn test_overlapping_link_rejects_whole_batch() {
        let linked = Linked::new().await;
        let app = &linked.app;
        let cnh_type = app.document_type(&linked.admin.token, "CNH").await;

        let (status, body) = link(
            app,
            &linked.admin.token,
            linked.jane.id,
            &[cnh_type, linked.cpf_type],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");

        let (_, employee) = app
            .get(&format!("/employees/{}", linked.jane.id), &linked.admin.token)
            .await;
        assert_eq!(
            ids(&employee["document_types"]),
            vec![linked.cpf_type, linked.rg_type]
        );

        let (_, documents) = app
            .get(
                &format!("/documents/employee/{}", linked.jane.id),
                &linked.admin.token,
            )
            .await;
        assert_eq!(documents.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unlink_of_unlinked_type_rejects_whole_batch() {
        let linked = Linked::new().await;
        let app = &linked.app;
        let cnh_type = app.document_type(&linked.admin.token, "CNH").await;

        let (status, _) = unlink(
            app,
            &linked.admin.token,
            linked.jane.id,
            &[linked.cpf_type, cnh_type],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, documents) = app
            .get(
                &format!("/documents/employee/{}", linked.jane.id),
                &linked.admin.token,
            )
            .await;
        assert_eq!(documents.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_type_and_empty_list_are_rejected() {
        let linked = Linked::new().await;
        let app = &linked.app;

        let (status, _) = link(app, &linked.admin.token, linked.jane.id, &[Uuid::new_v4()]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = link(app, &linked.admin.token, linked.jane.id, &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = link(app, &linked.admin.token, Uuid::new_v4(), &[linked.cpf_type]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_common_employee_cannot_link() {
        let linked = Linked::new().await;
        let cnh_type = linked.app.document_type(&linked.admin.token, "CNH").await;

        let (status, _) = link(&linked.app, &linked.jane.token, linked.jane.id, &[cnh_type]).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod test_document_files {
    use super::*;

    #[tokio::test]
    async fn test_send_attaches_file_with_extension_from_mime() {
        let linked = Linked::new().await;
        let document = linked.document(linked.cpf_type).await;
        let id = document["id"].as_str().unwrap();

        let (status, body) = send_file(&linked.app, &linked.jane, id, "application/pdf").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "available");
        let url = body["document_url"].as_str().unwrap();
        assert!(url.starts_with("http://localhost:3000/files/"));
        assert!(url.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_unknown_mime_falls_back_to_bin() {
        let linked = Linked::new().await;
        let document = linked.document(linked.rg_type).await;
        let id = document["id"].as_str().unwrap();

        let (status, body) =
            send_file(&linked.app, &linked.admin, id, "application/x-made-up").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["document_url"].as_str().unwrap().ends_with(".bin"));
    }

    #[tokio::test]
    async fn test_send_to_document_with_file_is_rejected() {
        let linked = Linked::new().await;
        let document = linked.document(linked.cpf_type).await;
        let id = document["id"].as_str().unwrap();

        let (status, first) = send_file(&linked.app, &linked.jane, id, "image/png").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send_file(&linked.app, &linked.jane, id, "application/pdf").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");

        let (_, current) = linked
            .app
            .get(&format!("/documents/{}", id), &linked.jane.token)
            .await;
        assert_eq!(current["document_url"], first["document_url"]);
    }

    #[tokio::test]
    async fn test_delete_without_file_is_rejected() {
        let linked = Linked::new().await;
        let document = linked.document(linked.cpf_type).await;
        let id = document["id"].as_str().unwrap();

        let (status, body) = linked
            .app
            .delete(&format!("/document-files/{}", id), &linked.jane.token)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_delete_resets_to_missing() {
        let linked = Linked::new().await;
        let document = linked.document(linked.cpf_type).await;
        let id = document["id"].as_str().unwrap();
        send_file(&linked.app, &linked.jane, id, "application/pdf").await;

        let (status, body) = linked
            .app
            .delete(&format!("/document-files/{}", id), &linked.jane.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "missing");
        assert!(body["document_url"].is_null());
    }

    #[tokio::test]
    async fn test_other_common_employee_cannot_touch_files() {
        let linked = Linked::new().await;
        let john = linked
            .app
            .hire(&linked.admin.token, "John", "Roe", "john.roe", COMMON_CPF, "common")
            .await;
        let document = linked.document(linked.cpf_type).await;
        let id = document["id"].as_str().unwrap();

        let (status, _) = send_file(&linked.app, &john, id, "application/pdf").await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = linked
            .app
            .get(&format!("/documents/{}", id), &john.token)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = linked
            .app
            .get(&format!("/documents/employee/{}", linked.jane.id), &john.token)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod test_documents {
    use super::*;

    #[tokio::test]
    async fn test_detail_includes_owner_and_type_names() {
        let linked = Linked::new().await;
        let document = linked.document(linked.rg_type).await;
        let id = document["id"].as_str().unwrap();

        let (status, body) = linked
            .app
            .get(&format!("/documents/{}", id), &linked.jane.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee_full_name"], "Jane Doe");
        assert_eq!(body["document_type_name"], "RG");
        assert_eq!(body["status"], "missing");
    }

    #[tokio::test]
    async fn test_status_update_cannot_contradict_file() {
        let linked = Linked::new().await;
        let document = linked.document(linked.rg_type).await;
        let id = document["id"].as_str().unwrap();
        let uri = format!("/documents/{}", id);

        let (status, body) = linked
            .app
            .patch(&uri, &linked.admin.token, json!({ "status": "available" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");

        let (_, current) = linked.app.get(&uri, &linked.admin.token).await;
        assert_eq!(current["status"], "missing");
        assert!(current["document_url"].is_null());

        let (status, sent) = send_file(&linked.app, &linked.jane, id, "application/pdf").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = linked
            .app
            .patch(&uri, &linked.admin.token, json!({ "status": "missing" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");

        let (status, body) = linked
            .app
            .patch(&uri, &linked.admin.token, json!({ "status": "available" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "available");
        assert_eq!(body["document_url"], sent["document_url"]);

        let (status, _) = linked
            .app
            .patch(&uri, &linked.jane.token, json!({ "status": "available" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_listing_all_documents_requires_manager() {
        let linked = Linked::new().await;

        let (status, body) = linked.app.get("/documents", &linked.admin.token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = linked.app.get("/documents", &linked.jane.token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
