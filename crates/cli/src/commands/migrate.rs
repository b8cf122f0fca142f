//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `FOODGRAM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Schema migrations live in `crates/api/migrations/` and are embedded at
//! compile time. The session table is created by the session store itself.

use std::collections::HashSet;

use foodgram_api::db::create_pool;
use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tower_sessions_sqlx_store::PostgresStore;

static MIGRATOR: Migrator = sqlx::migrate!("../api/migrations");

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run schema and session store migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!(count = MIGRATOR.iter().count(), "Running schema migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Running session store migrations...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Log applied and pending schema migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable.
pub async fn status() -> Result<(), MigrationError> {
    let pool = connect().await?;

    let applied: HashSet<i64> = sqlx::query_scalar::<_, i64>(
        "SELECT version FROM _sqlx_migrations WHERE success",
    )
    .fetch_all(&pool)
    .await
    .unwrap_or_default()
    .into_iter()
    .collect();

    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            state,
            "Migration"
        );
    }
    Ok(())
}

/// Connect using the same variables as the API server.
async fn connect() -> Result<PgPool, MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url(|key| std::env::var(key).ok())?;

    tracing::info!("Connecting to database...");
    Ok(create_pool(&database_url).await?)
}

fn database_url<F>(lookup: F) -> Result<SecretString, MigrationError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("FOODGRAM_DATABASE_URL")
        .or_else(|| lookup("DATABASE_URL"))
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("FOODGRAM_DATABASE_URL"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_embedded_migrations_are_ordered() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert!(!versions.is_empty());
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_database_url_fallback() {
        let url = database_url(|key| (key == "DATABASE_URL").then(|| "postgres://db".to_string()));
        assert_eq!(url.unwrap().expose_secret(), "postgres://db");
    }

    #[test]
    fn test_database_url_missing() {
        let err = database_url(|_| None).unwrap_err();
        assert!(matches!(err, MigrationError::MissingEnvVar("FOODGRAM_DATABASE_URL")));
    }
}
