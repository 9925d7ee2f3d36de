use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::lifecycle::evidence::EvidenceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis client backing the request-completion change feed (pub/sub).
    pub redis: RedisClient,
    /// Pluggable evidence store. Default: S3/MinIO. Tests use an in-memory fake.
    pub evidence: Arc<dyn EvidenceStore>,
    /// Kept for handlers that need deploy-time settings (none currently;
    /// the evidence store already carries bucket and endpoint).
    #[allow(dead_code)]
    pub config: Config,
}
