//! Periodic reconciliation of the contracts directory.
//!
//! Document deletion removes the row before the file, so a crash or an I/O failure in
//! between can leave a PDF no row points at. The sweep removes such files once they are
//! older than a grace period, which keeps it clear of saves still in flight (the file
//! is written before its row is inserted).

use crate::error::ServiceError;
use crate::files::FileStore;
use crate::state::AppState;
use crate::store::Store;
use log::{error, info, warn};
use std::time::Duration;

/// Unreferenced PDFs younger than this are left alone.
pub const ORPHAN_GRACE: Duration = Duration::from_secs(5 * 60);

/// Deletes unreferenced PDFs older than `grace`. Returns how many were removed.
pub fn sweep_orphans(store: &Store, files: &FileStore, grace: Duration) -> Result<usize, ServiceError> {
    let referenced = store.referenced_pdf_filenames()?;
    let mut removed = 0;
    for name in files.pdfs_older_than(grace)? {
        if referenced.contains(&name) {
            continue;
        }
        match files.delete(&name) {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(e) => warn!("Could not remove orphaned PDF {}: {}", name, e),
        }
    }
    if removed > 0 {
        info!("Removed {} orphaned PDF(s)", removed);
    }
    Ok(removed)
}

/// Runs the sweep immediately and then every `interval`, forever.
pub async fn run_orphan_sweeper(state: AppState, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let store = state.store.clone();
        let files = state.files.clone();
        match tokio::task::spawn_blocking(move || sweep_orphans(&store, &files, ORPHAN_GRACE)).await
        {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => error!("Orphan sweep failed: {}", e),
            Err(e) => error!("Orphan sweep task panicked: {}", e),
        }
    }
}
