use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use log::info;

/// Actix web handler for `DELETE /api/templates/{template_id}`.
pub async fn process(state: web::Data<AppState>, template_id: web::Path<i64>) -> HttpResponse {
    match delete_template(&state, template_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn delete_template(state: &AppState, template_id: i64) -> Result<(), ServiceError> {
    if !state.store.delete_template(template_id)? {
        return Err(ServiceError::NotFound("template"));
    }
    info!("Deleted template {}", template_id);
    Ok(())
}
