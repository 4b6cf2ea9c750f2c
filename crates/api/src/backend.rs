//! Construction of the configured content backend.

use std::sync::Arc;

use vitrine_core::backend::{ContentBackend, InMemoryBackend};
use vitrine_supabase::{SupabaseBackend, SupabaseClient, SupabaseConfig};

use crate::config::BackendConfig;

/// Failures while connecting to the configured backend at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Build the backend selected by `config`.
///
/// The PostgreSQL backend is health-checked and migrated before it is
/// returned.
pub async fn connect(config: &BackendConfig) -> Result<Arc<dyn ContentBackend>, StartupError> {
    match config {
        BackendConfig::Memory => {
            tracing::warn!("Using in-memory content backend; content is lost on restart");
            Ok(Arc::new(InMemoryBackend::new()))
        }
        BackendConfig::Supabase { url, api_key } => {
            let client = SupabaseClient::new(SupabaseConfig::new(url.clone(), api_key.clone()));
            tracing::info!(%url, "Supabase content backend configured");
            Ok(Arc::new(SupabaseBackend::new(client)))
        }
        BackendConfig::Postgres { database_url } => {
            let pool = vitrine_db::create_pool(database_url).await?;
            tracing::info!("Database connection pool created");

            vitrine_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            vitrine_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(vitrine_db::PgContentBackend::new(pool)))
        }
    }
}
