use anyhow::Result;
use axum::Router;
use std::{io::ErrorKind, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting folder-archiver with config: {:?}", cfg);

    // --- Initialize S3 client ---
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
    if let Some(endpoint) = &cfg.endpoint_url {
        tracing::info!("Using custom S3 endpoint {}", endpoint);
        // Path-style addressing keeps MinIO-style endpoints working.
        s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
    }
    let client = aws_sdk_s3::Client::from_conf(s3_config.build());

    // --- Initialize core service ---
    let s3_store = store::s3::S3Store::new(client, cfg.bucket.clone());
    let service = services::archive_service::ArchiveService::new(
        Arc::new(s3_store),
        cfg.base_path.clone(),
        cfg.fetch_concurrency,
    );

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(service);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
