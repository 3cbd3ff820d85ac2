//! Serves a stored PDF as a download.
//!
//! A row whose file has gone missing is answered with 404, the same as an unknown
//! document.

use crate::error::ServiceError;
use crate::services::documents::get::get_document;
use crate::state::AppState;
use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use log::warn;

pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    uuid: web::Path<String>,
) -> HttpResponse {
    match open_pdf(&state, &uuid) {
        Ok(file) => file.into_response(&req),
        Err(e) => e.error_response(),
    }
}

fn open_pdf(state: &AppState, uuid: &str) -> Result<NamedFile, ServiceError> {
    let document = get_document(state, uuid)?;
    if !state.files.exists(&document.pdf_filename) {
        warn!(
            "Document {} refers to missing file {}",
            document.uuid, document.pdf_filename
        );
        return Err(ServiceError::NotFound("document file"));
    }

    let file = NamedFile::open(state.files.path_of(&document.pdf_filename))?;
    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(document.pdf_filename)],
    }))
}
