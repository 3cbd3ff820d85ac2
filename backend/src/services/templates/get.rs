//! # Template Retrieval Service
//!
//! Backs `GET /api/templates/{template_id}`. The response carries the stored template
//! plus its form: one entry per distinct placeholder with a readable label and the
//! kind used to interpret the input (declared, or guessed from the name).

use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::template::TemplateDetail;

pub async fn process(state: web::Data<AppState>, template_id: web::Path<i64>) -> HttpResponse {
    match get_template(&state, template_id.into_inner()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

pub fn get_template(state: &AppState, template_id: i64) -> Result<TemplateDetail, ServiceError> {
    state
        .store
        .template(template_id)?
        .map(TemplateDetail::from)
        .ok_or(ServiceError::NotFound("template"))
}
