use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};

/// Actix web handler for `GET /api/documents`, newest first.
pub async fn process(state: web::Data<AppState>) -> HttpResponse {
    match state.store.list_documents() {
        Ok(documents) => HttpResponse::Ok().json(documents),
        Err(e) => ServiceError::from(e).error_response(),
    }
}
