//! HTTP handler for the folder archiving operation. Extracts the folder name
//! from the path and delegates everything else to `ArchiveService`.

use crate::{errors::AppError, services::archive_service::ArchiveService};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub message: String,
    pub key: String,
    pub entries: usize,
    pub size_bytes: usize,
}

/// `POST /folders/{folder-name}/archive`
///
/// Packages every object under the folder's prefix into a zip and writes it
/// back to the store. Responds 200 with a summary on success; failures map
/// to 400/404/502/500 via `AppError`.
pub async fn archive_folder(
    State(service): State<ArchiveService>,
    Path(folder_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = service.archive_folder(&folder_name).await?;

    Ok((
        StatusCode::OK,
        Json(ArchiveResponse {
            message: outcome.message(),
            key: outcome.destination_key,
            entries: outcome.entry_count,
            size_bytes: outcome.size_bytes,
        }),
    ))
}
