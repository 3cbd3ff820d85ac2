//! Errors returned by the HTTP services and how they map onto responses.
//!
//! Validation failures and missing records are answered precisely. Everything else
//! is an unclassified fault: logged in full, reported to the client generically.

use crate::services::documents::pdf::RenderError;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::error::ValidationError;
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
    #[error("file store failure: {0}")]
    Files(#[from] std::io::Error),
    #[error("renderer failure: {0}")]
    Render(#[from] RenderError),
    #[error("background task failed: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Validation(e) => HttpResponse::build(self.status_code()).json(json!({
                "error": e.to_string(),
                "field": e.variable(),
            })),
            ServiceError::NotFound(_) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
            }
            _ => {
                error!("{}", self);
                HttpResponse::build(self.status_code())
                    .json(json!({ "error": "Internal server error" }))
            }
        }
    }
}
