//! # Document Service Module
//!
//! Generated documents: rendering a filled template to PDF, storing it, and serving or
//! removing it afterwards. Routes live under `/api/documents` and address documents by
//! their UUID, never by database id.

mod delete;
mod download;
mod get;
mod list;
pub mod pdf;
mod save;
pub mod signature;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/documents";

/// # Registered Routes:
///
/// *   **`POST /`**: `save::process`, renders and stores a document.
/// *   **`GET /`**: `list::process`.
/// *   **`GET /{uuid}`**: `get::process`.
/// *   **`GET /{uuid}/pdf`**: `download::process`, the PDF as an attachment.
/// *   **`DELETE /{uuid}`**: `delete::process`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(save::process))
        .route("", get().to(list::process))
        .route("/{uuid}", get().to(get::process))
        .route("/{uuid}", delete().to(delete::process))
        .route("/{uuid}/pdf", get().to(download::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{temp_state, RecordingRenderer, FAKE_PDF};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use common::model::document::GeneratedDocument;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    const SIGNATURE: &str = "data:image/png;base64,aGVsbG8=";

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn save_download_delete() {
        let renderer = Arc::new(RecordingRenderer::default());
        let (_db, _files, state) = temp_state(renderer.clone());
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/documents")
            .set_json(json!({
                "template_id": 1,
                "title": "Residential Lease",
                "content": "Pay $1200 by January 01, 2025.",
                "signature": SIGNATURE,
                "variables": {"rent_amount": "$1200"},
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let saved: GeneratedDocument = test::read_body_json(resp).await;

        assert!(saved.pdf_filename.starts_with("Residential_Lease_"));
        assert_eq!(saved.signature_data.as_deref(), Some(SIGNATURE));
        assert_eq!(saved.variables.unwrap()["rent_amount"], "$1200");
        assert!(state.files.exists(&saved.pdf_filename));
        {
            let rendered = renderer.rendered.lock().unwrap();
            assert_eq!(rendered.len(), 1);
            assert_eq!(rendered[0].body, "Pay $1200 by January 01, 2025.");
            assert!(rendered[0].signature.is_some());
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/documents/{}/pdf", saved.uuid))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains(&saved.pdf_filename));
        assert_eq!(test::read_body(resp).await.as_ref(), FAKE_PDF);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/documents/{}", saved.uuid))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(!state.files.exists(&saved.pdf_filename));

        let req = test::TestRequest::get()
            .uri(&format!("/api/documents/{}", saved.uuid))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_tolerates_a_missing_file() {
        let (_db, _files, state) = temp_state(Arc::new(RecordingRenderer::default()));
        let app = app!(state);

        let saved = save::save_document(
            &state,
            serde_json::from_value(json!({"template_id": 1, "content": "Body"})).unwrap(),
        )
        .unwrap();
        assert!(state.files.delete(&saved.pdf_filename).unwrap());

        let req = test::TestRequest::get()
            .uri(&format!("/api/documents/{}/pdf", saved.uuid))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/documents/{}", saved.uuid))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(state.store.document_by_uuid(&saved.uuid).unwrap(), None);
    }

    #[actix_web::test]
    async fn invalid_signatures_are_not_stored() {
        let renderer = Arc::new(RecordingRenderer::default());
        let (_db, _files, state) = temp_state(renderer.clone());

        let saved = save::save_document(
            &state,
            serde_json::from_value(json!({
                "template_id": 1,
                "content": "Body",
                "signature": "not-an-image",
            }))
            .unwrap(),
        )
        .unwrap();
        assert_eq!(saved.signature_data, None);
        assert_eq!(saved.title, "contract");
        assert_eq!(saved.variables, None);
        assert!(renderer.rendered.lock().unwrap()[0].signature.is_none());
    }

    #[actix_web::test]
    async fn failed_insert_removes_the_written_pdf() {
        let (_db, _files, state) = temp_state(Arc::new(RecordingRenderer::default()));
        state
            .store
            .connect()
            .unwrap()
            .execute_batch("DROP TABLE contracts")
            .unwrap();

        let result = save::save_document(
            &state,
            serde_json::from_value(json!({"template_id": 1, "content": "Body"})).unwrap(),
        );
        assert!(matches!(result, Err(crate::error::ServiceError::Store(_))));
        assert!(state
            .files
            .pdfs_older_than(std::time::Duration::ZERO)
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn renderer_failure_is_a_server_error() {
        let renderer = Arc::new(RecordingRenderer {
            fail: true,
            ..Default::default()
        });
        let (_db, _files, state) = temp_state(renderer);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/documents")
            .set_json(json!({"template_id": 1, "content": "Body"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.store.list_documents().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn longest_valid_title_saves() {
        let (_db, _files, state) = temp_state(Arc::new(RecordingRenderer::default()));
        let title = "é".repeat(common::error::MAX_TITLE_CHARS);
        let template = common::requests::SaveTemplateRequest {
            title: title.clone(),
            category: "Contracts".to_string(),
            content: "Body".to_string(),
            fields: Default::default(),
        };
        assert!(template.validate().is_ok());

        let saved = save::save_document(
            &state,
            serde_json::from_value(json!({
                "template_id": 1,
                "title": title,
                "content": "Body",
            }))
            .unwrap(),
        )
        .unwrap();
        assert_eq!(saved.title, title);
        assert!(saved.pdf_filename.len() <= 255);
        assert!(state.files.exists(&saved.pdf_filename));
    }

    #[actix_web::test]
    async fn empty_content_is_rejected() {
        let (_db, _files, state) = temp_state(Arc::new(RecordingRenderer::default()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/documents")
            .set_json(json!({"template_id": 1, "content": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
