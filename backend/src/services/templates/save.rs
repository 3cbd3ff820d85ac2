use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::template::Template;
use common::requests::SaveTemplateRequest;
use log::info;

/// Actix web handler for `POST /api/templates`.
pub async fn create(
    state: web::Data<AppState>,
    payload: web::Json<SaveTemplateRequest>,
) -> HttpResponse {
    match create_template(&state, &payload) {
        Ok(template) => HttpResponse::Created().json(template),
        Err(e) => e.error_response(),
    }
}

/// Actix web handler for `PUT /api/templates/{template_id}`.
pub async fn update(
    state: web::Data<AppState>,
    template_id: web::Path<i64>,
    payload: web::Json<SaveTemplateRequest>,
) -> HttpResponse {
    match update_template(&state, template_id.into_inner(), &payload) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => e.error_response(),
    }
}

pub fn create_template(
    state: &AppState,
    payload: &SaveTemplateRequest,
) -> Result<Template, ServiceError> {
    let draft = payload.validate()?;
    let template = state.store.create_template(&draft)?;
    info!("Created template {} '{}'", template.id, template.title);
    Ok(template)
}

pub fn update_template(
    state: &AppState,
    template_id: i64,
    payload: &SaveTemplateRequest,
) -> Result<Template, ServiceError> {
    let draft = payload.validate()?;
    let template = state
        .store
        .update_template(template_id, &draft)?
        .ok_or(ServiceError::NotFound("template"))?;
    info!("Updated template {} '{}'", template.id, template.title);
    Ok(template)
}
