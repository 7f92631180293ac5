// ABOUTME: Error taxonomy for the preflight check
// ABOUTME: Every variant is fatal; nothing here is retried

use thiserror::Error;

use preflight_config::ConfigError;
use preflight_db::DbError;
use preflight_migrations::ManifestError;

/// Main check error type. Every variant reflects a static mismatch in
/// durable state that re-running the same check cannot resolve, so the
/// caller halts with a non-zero exit status on the first one it sees.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(
        "Configured Postgres version ({configured}) does not match the running server \
         ({observed}); reconcile the deployment configuration manually"
    )]
    ConfigurationMismatch { configured: u32, observed: u32 },

    #[error(
        "Postgres version {observed} is no longer supported; version {minimum} or newer \
         is required"
    )]
    UnsupportedEngineVersion { observed: u32, minimum: u32 },

    #[error(
        "Unable to upgrade from {deployed} to {target}: {count} applied migration(s) are \
         missing from the version being deployed"
    )]
    MigrationIncompatibility {
        count: usize,
        deployed: String,
        target: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Migration manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}
