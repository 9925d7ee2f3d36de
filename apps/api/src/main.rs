mod config;
mod db;
mod errors;
mod lifecycle;
mod locations;
mod models;
mod notify;
mod reviews;
mod routes;
mod session;
mod state;
mod taxonomy;
mod users;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::lifecycle::evidence::S3EvidenceStore;
use crate::notify::spawn_completion_listener;
use crate::routes::build_router;
use crate::state::AppState;
use crate::taxonomy::data::{CATEGORIES, CATEGORY_KEYWORDS, CATEGORY_TAGS};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Oficios API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Taxonomy loaded: {} categories, {} tags, {} keywords",
        CATEGORIES.len(),
        CATEGORY_TAGS.len(),
        CATEGORY_KEYWORDS.len()
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis (request-completion change feed)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO evidence store
    let s3 = build_s3_client(&config).await;
    let evidence = Arc::new(S3EvidenceStore::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_endpoint.clone(),
    ));
    info!("Evidence store initialized (bucket: {})", config.s3_bucket);

    // Background listener for externally-completed requests (best-effort)
    spawn_completion_listener(redis.clone());

    // Build app state
    let state = AppState {
        db,
        redis,
        evidence,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

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
        "oficios-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
