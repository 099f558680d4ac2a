//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the object store is reachable

use crate::services::archive_service::ArchiveService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
/// This endpoint should be cheap and never perform I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Readiness probe that asks the store for a single listing page under the
/// configured base path. Returns JSON describing the check. HTTP 200 when it
/// passes, HTTP 503 when it fails.
pub async fn readyz(State(service): State<ArchiveService>) -> impl IntoResponse {
    let base = service.base_path().trim_end_matches('/');
    let probe_prefix = if base.is_empty() {
        String::new()
    } else {
        format!("{}/", base)
    };
    let store_check = match service.store().list_page(&probe_prefix, None).await {
        Ok(_) => (true, None::<String>),
        Err(err) => (false, Some(format!("error: {}", err))),
    };

    let store_ok = store_check.0;
    let mut checks = HashMap::new();
    checks.insert(
        "store",
        CheckStatus {
            ok: store_ok,
            error: store_check.1,
        },
    );

    let body = ReadyResponse {
        status: if store_ok { "ok".into() } else { "error".into() },
        checks,
    };

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
