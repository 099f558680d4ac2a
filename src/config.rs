use anyhow::{Context, Result};
use clap::Parser;
use std::env;

const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bucket: String,
    pub base_path: String,
    pub fetch_concurrency: usize,
    pub endpoint_url: Option<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Folder archiving service for S3 object stores")]
pub struct Args {
    /// Host to bind to (overrides FOLDER_ARCHIVER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides FOLDER_ARCHIVER_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Bucket holding the folders and receiving archives (overrides FOLDER_ARCHIVER_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Key prefix the folders live under (overrides FOLDER_ARCHIVER_BASE_PATH)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Number of object fetches kept in flight per request (overrides FOLDER_ARCHIVER_FETCH_CONCURRENCY)
    #[arg(long)]
    pub fetch_concurrency: Option<usize>,

    /// Custom S3 endpoint, e.g. a MinIO instance (overrides FOLDER_ARCHIVER_ENDPOINT_URL)
    #[arg(long)]
    pub endpoint_url: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("FOLDER_ARCHIVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("FOLDER_ARCHIVER_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing FOLDER_ARCHIVER_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading FOLDER_ARCHIVER_PORT"),
        };
        let env_bucket = env::var("FOLDER_ARCHIVER_BUCKET").ok();
        let env_base_path = env::var("FOLDER_ARCHIVER_BASE_PATH").unwrap_or_default();
        let env_fetch_concurrency = match env::var("FOLDER_ARCHIVER_FETCH_CONCURRENCY") {
            Ok(value) => Some(value.parse::<usize>().with_context(|| {
                format!("parsing FOLDER_ARCHIVER_FETCH_CONCURRENCY value `{}`", value)
            })?),
            Err(env::VarError::NotPresent) => None,
            Err(err) => return Err(err).context("reading FOLDER_ARCHIVER_FETCH_CONCURRENCY"),
        };
        let env_endpoint = env::var("FOLDER_ARCHIVER_ENDPOINT_URL").ok();

        // --- Merge ---
        let bucket = args
            .bucket
            .or(env_bucket)
            .context("FOLDER_ARCHIVER_BUCKET (or --bucket) is required")?;
        let fetch_concurrency = args
            .fetch_concurrency
            .or(env_fetch_concurrency)
            .unwrap_or(DEFAULT_FETCH_CONCURRENCY)
            .max(1);

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            bucket,
            base_path: args.base_path.unwrap_or(env_base_path),
            fetch_concurrency,
            endpoint_url: args.endpoint_url.or(env_endpoint),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
