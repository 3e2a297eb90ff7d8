mod config;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod pipeline;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::pipeline::analysis::LlmAnalyzer;
use crate::pipeline::extractor::S3PdfReader;
use crate::pipeline::notify::{Notifier, SmtpNotifier};
use crate::pipeline::ResumePipeline;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{PgCandidateStore, PgJobStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recruit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let candidates = Arc::new(PgCandidateStore::new(db.clone()));
    let jobs = Arc::new(PgJobStore::new(db));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize LLM-backed analyzer
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let notifier: Option<Arc<dyn Notifier>> = match &config.smtp {
        Some(smtp) => {
            info!("Reviewer notifications enabled (to: {})", smtp.reviewer);
            Some(Arc::new(SmtpNotifier::from_config(smtp)?))
        }
        None => {
            warn!("SMTP_SERVER / SMTP_FROM / HR_REVIEWER_EMAIL not set; reviewer notifications disabled");
            None
        }
    };

    let pipeline = ResumePipeline::new(
        Arc::new(S3PdfReader::new(s3)),
        Arc::new(LlmAnalyzer(llm)),
        candidates.clone(),
        notifier,
    );

    let state = AppState {
        pipeline,
        candidates,
        jobs,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "recruit-static",
    );

    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path, not virtual host.
    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
