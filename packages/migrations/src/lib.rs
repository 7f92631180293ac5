// ABOUTME: Migration-history reconciliation for upgrade compatibility gating
// ABOUTME: Decides whether applied migrations are accounted for by a target manifest

pub mod id;
pub mod manifest;
pub mod reconcile;

pub use id::MigrationId;
pub use manifest::{GraphEntry, ManifestError, MigrationManifest};
pub use reconcile::{reconcile, ReconciliationResult};
