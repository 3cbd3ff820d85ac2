//! # Template Service Module
//!
//! Routes everything under `/api/templates` to its handler.
//!
//! ## Sub-modules:
//! - `list`: the catalogue, grouped by category.
//! - `get`: one template together with the form fields it produces.
//! - `save`: creation and update, both validated the same way.
//! - `delete`: removal of a template. Documents made from it keep their own text.
//! - `preview`: fills a template from submitted form values without storing anything.
//! - `seed`: the bundled sample catalogue inserted into an empty database.

mod delete;
mod get;
mod list;
mod preview;
mod save;
pub mod seed;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`, templates grouped by category.
/// *   **`POST /`**: `save::create`, validates and inserts a template.
/// *   **`GET /{template_id}`**: `get::process`, the template and its placeholders in
///     the order they first appear in the body.
/// *   **`PUT /{template_id}`**: `save::update`, validates and replaces a template.
/// *   **`DELETE /{template_id}`**: `delete::process`.
/// *   **`POST /{template_id}/preview`**: `preview::process`, resolves the submitted
///     values and returns the filled text. Invalid input is answered with 422 and the
///     offending field.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}", put().to(save::update))
        .route("/{template_id}", delete().to(delete::process))
        .route("/{template_id}/preview", post().to(preview::process))
}
