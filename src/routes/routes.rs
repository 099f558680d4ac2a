//! Defines routes for the folder archiving service.
//!
//! ## Structure
//! - `POST /folders/{folder-name}/archive` — package a folder's objects into
//!   a zip and write it back to the store
//! - `GET /healthz` — liveness
//! - `GET /readyz` — readiness (store reachability)

use crate::{
    handlers::{
        archive_handlers::archive_folder,
        health_handlers::{healthz, readyz},
    },
    services::archive_service::ArchiveService,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for the service.
///
/// The router carries shared state (`ArchiveService`) to all handlers.
pub fn routes() -> Router<ArchiveService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // archiving operation
        .route("/folders/{folder-name}/archive", post(archive_folder))
}
