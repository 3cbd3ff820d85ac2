//! # Template Preview Service
//!
//! Backs `POST /api/templates/{template_id}/preview`. The submitted form is resolved
//! field by field in the order the placeholders appear; the first invalid field aborts
//! the preview. Nothing is stored: the client saves the preview through
//! `POST /api/documents` once the user is happy with it.

use crate::error::ServiceError;
use crate::services::documents::signature;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::field::fill_template;
use common::model::document::DocumentPreview;
use common::requests::GenerateRequest;

pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<i64>,
    payload: web::Json<GenerateRequest>,
) -> HttpResponse {
    match preview(&state, template_id.into_inner(), &payload) {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => e.error_response(),
    }
}

pub fn preview(
    state: &AppState,
    template_id: i64,
    request: &GenerateRequest,
) -> Result<DocumentPreview, ServiceError> {
    let template = state
        .store
        .template(template_id)?
        .ok_or(ServiceError::NotFound("template"))?;

    let filled = fill_template(&template.content, &request.values, &template.fields)?;
    let signature = signature::accept(request.signature.as_deref());

    Ok(DocumentPreview {
        template_id: template.id,
        title: template.title,
        variables: filled.values(),
        content: filled.content,
        signature: signature.map(|s| s.data_uri().to_string()),
    })
}
