use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::document::GeneratedDocument;

/// Actix web handler for `GET /api/documents/{uuid}`.
pub async fn process(state: web::Data<AppState>, uuid: web::Path<String>) -> HttpResponse {
    match get_document(&state, &uuid) {
        Ok(document) => HttpResponse::Ok().json(document),
        Err(e) => e.error_response(),
    }
}

pub fn get_document(state: &AppState, uuid: &str) -> Result<GeneratedDocument, ServiceError> {
    state
        .store
        .document_by_uuid(uuid)?
        .ok_or(ServiceError::NotFound("document"))
}
