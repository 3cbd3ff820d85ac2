use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::template::{group_by_category, CategoryGroup};

/// Actix web handler for `GET /api/templates`.
pub async fn process(state: web::Data<AppState>) -> HttpResponse {
    match list_grouped(&state) {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(e) => e.error_response(),
    }
}

/// The catalogue as shown to users: categories in order, titles sorted inside each.
pub fn list_grouped(state: &AppState) -> Result<Vec<CategoryGroup>, ServiceError> {
    let templates = state.store.list_templates()?;
    Ok(group_by_category(templates))
}
