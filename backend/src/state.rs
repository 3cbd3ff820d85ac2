use crate::files::FileStore;
use crate::services::documents::pdf::DocumentRenderer;
use crate::store::Store;
use std::sync::Arc;

/// Collaborators shared by every request handler.
///
/// Registered once as `web::Data` in `main.rs`; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub files: FileStore,
    pub renderer: Arc<dyn DocumentRenderer>,
}

impl AppState {
    pub fn new(store: Store, files: FileStore, renderer: Arc<dyn DocumentRenderer>) -> Self {
        AppState {
            store,
            files,
            renderer,
        }
    }
}
