mod config;
mod error;
mod files;
mod maintenance;
mod services;
mod state;
mod store;

use crate::config::AppConfig;
use crate::files::FileStore;
use crate::services::documents::pdf::GenPdfRenderer;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load().map_err(io::Error::other)?;

    let store = Store::new(config.database_path.clone());
    store.init_schema().map_err(io::Error::other)?;
    let seeded = services::templates::seed::seed_if_empty(&store).map_err(io::Error::other)?;
    if seeded > 0 {
        info!("Database {} initialised", store.path().display());
    }

    let files = FileStore::new(config.contracts_dir.clone());
    files.ensure_dir()?;
    info!("Storing PDFs in {}", files.dir().display());

    let renderer = Arc::new(GenPdfRenderer::new(
        config.fonts_dir.clone(),
        config.font_families.clone(),
    ));
    let state = AppState::new(store, files, renderer);

    if config.sweep_interval_secs > 0 {
        let sweeper_state = state.clone();
        let interval = Duration::from_secs(config.sweep_interval_secs);
        tokio::spawn(async move {
            maintenance::run_orphan_sweeper(sweeper_state, interval).await;
        });
    } else {
        warn!("Orphaned PDF sweep disabled");
    }

    info!("Server running at {}", config.bind_url());

    let json_limit = config.json_limit_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .service(services::templates::configure_routes())
            .service(services::documents::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
