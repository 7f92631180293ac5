// ABOUTME: Live-database reads for the preflight checker
// ABOUTME: Connection pool, observed engine version, applied-migration bookkeeping

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

use preflight_migrations::MigrationId;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Unexpected server_version_num value: {0}")]
    BadVersion(String),
}

/// Connects to the deployment's Postgres database. The checker performs a
/// handful of one-shot reads, so the pool stays small.
pub async fn connect(database_url: &str) -> Result<PgPool, DbError> {
    debug!("Connecting to database");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;

    info!("Database connection established");
    Ok(pool)
}

/// The server's major version, from `server_version_num` (e.g. 140011 → 14).
pub async fn server_major_version(pool: &PgPool) -> Result<u32, DbError> {
    let row = sqlx::query("SELECT current_setting('server_version_num') AS version_num")
        .fetch_one(pool)
        .await?;
    let raw: String = row.try_get("version_num")?;
    major_from_version_num(&raw)
}

/// The set of migrations the database records as already applied, read from
/// the `schema_migrations` bookkeeping table. Rows accumulate for the
/// lifetime of the deployment; they are never retracted when the codebase
/// later squashes migrations away.
pub async fn applied_migrations(pool: &PgPool) -> Result<BTreeSet<MigrationId>, DbError> {
    let rows = sqlx::query("SELECT app, name FROM schema_migrations")
        .fetch_all(pool)
        .await?;

    let mut applied = BTreeSet::new();
    for row in rows {
        let app: String = row.try_get("app")?;
        let name: String = row.try_get("name")?;
        applied.insert(MigrationId::new(app, name));
    }

    debug!(applied = applied.len(), "Read applied-migration bookkeeping");
    Ok(applied)
}

/// `server_version_num` is major * 10000 + minor (plus minor * 100 + patch
/// on 9.x-era servers); integer division recovers the major either way, so
/// an ancient server still reaches the version gate instead of erroring here.
fn major_from_version_num(raw: &str) -> Result<u32, DbError> {
    let num: u32 = raw
        .trim()
        .parse()
        .map_err(|_| DbError::BadVersion(raw.to_string()))?;
    let major = num / 10000;
    if major == 0 {
        return Err(DbError::BadVersion(raw.to_string()));
    }
    Ok(major)
}
