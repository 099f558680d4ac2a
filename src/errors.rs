use crate::services::archive_service::ArchiveError;
use crate::services::zip_builder::BuildError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

/// Map pipeline failures to HTTP statuses: bad input is the caller's fault,
/// a missing folder is 404, store-side failures surface as 502, and a local
/// archive construction failure is a plain 500.
impl From<ArchiveError> for AppError {
    fn from(err: ArchiveError) -> Self {
        let status = match &err {
            ArchiveError::InvalidFolderName(_) => StatusCode::BAD_REQUEST,
            ArchiveError::FolderNotFound(_) => StatusCode::NOT_FOUND,
            ArchiveError::ListFailed { .. }
            | ArchiveError::ObjectReadFailed { .. }
            | ArchiveError::UploadFailed { .. } => StatusCode::BAD_GATEWAY,
            ArchiveError::Build(BuildError::DuplicateEntry(_)) => StatusCode::CONFLICT,
            ArchiveError::Build(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::new(status, err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}
