//! # Document Save Service
//!
//! Backs `POST /api/documents`. Rendering and file I/O run on the blocking pool, as
//! they can take a while for documents with a signature image.
//!
//! ## Workflow
//!
//! 1.  The signature is kept only if it is a usable `data:image/` payload.
//! 2.  The text is rendered to PDF bytes by the configured `DocumentRenderer`.
//! 3.  The PDF is written to the contracts directory as `{title}_{uuid8}.pdf`.
//! 4.  The document row is inserted. If that fails the PDF just written is removed
//!     again, so a failed save leaves nothing behind.

use crate::error::ServiceError;
use crate::services::documents::pdf::DocumentMarkup;
use crate::services::documents::signature;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Local;
use common::error::ValidationError;
use common::model::document::{GeneratedDocument, NewDocument};
use common::requests::SaveDocumentRequest;
use log::{error, info};
use uuid::Uuid;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveDocumentRequest>,
) -> HttpResponse {
    let state = state.get_ref().clone();
    let request = payload.into_inner();
    match web::block(move || save_document(&state, request)).await {
        Ok(Ok(document)) => HttpResponse::Created().json(document),
        Ok(Err(e)) => e.error_response(),
        Err(e) => ServiceError::from(e).error_response(),
    }
}

pub fn save_document(
    state: &AppState,
    request: SaveDocumentRequest,
) -> Result<GeneratedDocument, ServiceError> {
    if request.content.trim().is_empty() {
        return Err(ValidationError::MissingFields.into());
    }

    let uuid = Uuid::new_v4().to_string();
    let signature = signature::accept(request.signature.as_deref());
    let markup = DocumentMarkup {
        title: request.title.clone(),
        body: request.content.clone(),
        signature,
        signed_at: Local::now(),
    };
    let bytes = state.renderer.render(&markup)?;

    let pdf_filename = NewDocument::pdf_filename_for(&request.title, &uuid);
    state.files.write(&pdf_filename, &bytes)?;

    let new_document = NewDocument {
        uuid,
        template_id: request.template_id,
        title: request.title,
        filled_content: request.content,
        signature_data: markup.signature.map(|s| s.data_uri().to_string()),
        variables: (!request.variables.is_empty()).then_some(request.variables),
        pdf_filename,
    };

    match state.store.insert_document(&new_document) {
        Ok(document) => {
            info!(
                "Saved document {} as {}",
                document.uuid, document.pdf_filename
            );
            Ok(document)
        }
        Err(e) => {
            if let Err(cleanup) = state.files.delete(&new_document.pdf_filename) {
                error!(
                    "Could not remove {} after a failed save: {}",
                    new_document.pdf_filename, cleanup
                );
            }
            Err(e.into())
        }
    }
}
