// ABOUTME: The check pipeline: config, engine version gate, migration reconciliation
// ABOUTME: Gates run top-to-bottom; the first failure halts the check

use std::path::PathBuf;
use tracing::{debug, info};

use preflight_config::DeployConfig;
use preflight_migrations::{reconcile, MigrationManifest, ReconciliationResult};

use crate::error::CheckError;
use crate::gate::{evaluate_gate, GateVerdict};
use crate::report;

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub config_path: PathBuf,
    pub manifest_path: PathBuf,
    pub database_url: String,
    /// Version string of the currently-running deployment, diagnostics only.
    pub deployed_version: String,
    /// Version string being deployed, diagnostics only.
    pub target_version: String,
}

/// Runs the full preflight check. Returns `Ok(())` when the upgrade is safe
/// to activate; any error means the caller must halt the upgrade.
pub async fn run_check(options: &CheckOptions) -> Result<(), CheckError> {
    let mut config = DeployConfig::load(&options.config_path)?;
    let configured = config.postgres_version()?;

    let pool = preflight_db::connect(&options.database_url).await?;
    let observed = preflight_db::server_major_version(&pool).await?;
    debug!(observed, configured, "Evaluating engine version gate");

    let decision = evaluate_gate(observed, configured);
    if let Some(major) = decision.persist {
        config.persist_postgres_version(major)?;
    }
    match decision.verdict {
        GateVerdict::Proceed => {}
        GateVerdict::Mismatch {
            configured,
            observed,
        } => {
            return Err(CheckError::ConfigurationMismatch {
                configured,
                observed,
            });
        }
        GateVerdict::Unsupported { observed, minimum } => {
            return Err(CheckError::UnsupportedEngineVersion { observed, minimum });
        }
    }

    let applied = preflight_db::applied_migrations(&pool).await?;
    let manifest = MigrationManifest::load(&options.manifest_path)?;
    let (graph, legacy_exceptions) = manifest.into_parts();

    match reconcile(&applied, &graph, &legacy_exceptions) {
        ReconciliationResult::Compatible => {
            info!(
                applied = applied.len(),
                target = %options.target_version,
                "Migration history is compatible with the target version"
            );
            Ok(())
        }
        ReconciliationResult::Incompatible { missing } => {
            report::print_incompatibility(&missing);
            Err(CheckError::MigrationIncompatibility {
                count: missing.len(),
                deployed: options.deployed_version.clone(),
                target: options.target_version.clone(),
            })
        }
    }
}
