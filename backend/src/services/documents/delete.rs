//! Document removal.
//!
//! The row goes first, in its own transaction. The PDF is removed afterwards on a
//! best-effort basis: a file that is already gone is fine, and one that cannot be
//! removed is left for the orphan sweep.

use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use log::{error, info, warn};

pub async fn process(state: web::Data<AppState>, uuid: web::Path<String>) -> HttpResponse {
    match delete_document(&state, &uuid) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn delete_document(state: &AppState, uuid: &str) -> Result<(), ServiceError> {
    let document = state
        .store
        .delete_document(uuid)?
        .ok_or(ServiceError::NotFound("document"))?;

    match state.files.delete(&document.pdf_filename) {
        Ok(true) => {}
        Ok(false) => warn!(
            "PDF {} of document {} was already gone",
            document.pdf_filename, uuid
        ),
        Err(e) => error!(
            "Could not remove PDF {} of document {}: {}",
            document.pdf_filename, uuid, e
        ),
    }
    info!("Deleted document {}", uuid);
    Ok(())
}
