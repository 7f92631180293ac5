// ABOUTME: Migration manifest loading and validation
// ABOUTME: JSON document shipped by the target codebase: graph entries plus legacy exceptions

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::id::MigrationId;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate migration in manifest: {0}")]
    DuplicateMigration(MigrationId),
}

/// One node in the target codebase's migration graph. `replaces` lists the
/// historical identifiers this migration superseded when older migrations
/// were squashed into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEntry {
    pub app: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replaces: Vec<MigrationId>,
}

impl GraphEntry {
    pub fn id(&self) -> MigrationId {
        MigrationId::new(self.app.clone(), self.name.clone())
    }
}

/// The migration manifest the target codebase ships for compatibility
/// checking. The legacy exception list is domain data owned by the target
/// system, not knowledge baked into the checker: it names identifiers that
/// are safe to ignore even though no current entry replaces them (removed
/// components, imperfect historical squash metadata).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationManifest {
    pub migrations: Vec<GraphEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legacy_exceptions: Vec<MigrationId>,
}

impl MigrationManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&raw)?;
        debug!(
            path = %path.display(),
            migrations = manifest.migrations.len(),
            legacy_exceptions = manifest.legacy_exceptions.len(),
            "Loaded migration manifest"
        );
        Ok(manifest)
    }

    /// Parses and validates a manifest document. A migration id may appear
    /// as a graph key at most once; `replaces` lists and the exception list
    /// may overlap freely.
    pub fn from_json(raw: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(raw)?;
        let mut seen = BTreeSet::new();
        for entry in &manifest.migrations {
            if !seen.insert(entry.id()) {
                return Err(ManifestError::DuplicateMigration(entry.id()));
            }
        }
        Ok(manifest)
    }

    /// Splits the manifest into the inputs `reconcile` consumes.
    pub fn into_parts(self) -> (BTreeMap<MigrationId, GraphEntry>, BTreeSet<MigrationId>) {
        let graph = self
            .migrations
            .into_iter()
            .map(|entry| (entry.id(), entry))
            .collect();
        let exceptions = self.legacy_exceptions.into_iter().collect();
        (graph, exceptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "migrations": [
            {"app": "zerver", "name": "0003_squashed", "replaces": [
                {"app": "zerver", "name": "0001_initial"},
                {"app": "zerver", "name": "0002_followup"}
            ]},
            {"app": "analytics", "name": "0001_initial"}
        ],
        "legacy_exceptions": [
            {"app": "guardian", "name": "0001_initial"}
        ]
    }"#;

    #[test]
    fn test_parses_sample_manifest() {
        let manifest = MigrationManifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.migrations.len(), 2);
        assert_eq!(manifest.legacy_exceptions.len(), 1);
        assert_eq!(manifest.migrations[0].replaces.len(), 2);
    }

    #[test]
    fn test_missing_replaces_defaults_to_empty() {
        let manifest = MigrationManifest::from_json(
            r#"{"migrations": [{"app": "a", "name": "0001_x"}]}"#,
        )
        .unwrap();
        assert!(manifest.migrations[0].replaces.is_empty());
        assert!(manifest.legacy_exceptions.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_graph_keys() {
        let raw = r#"{"migrations": [
            {"app": "a", "name": "0001_x"},
            {"app": "a", "name": "0001_x"}
        ]}"#;
        let err = MigrationManifest::from_json(raw).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateMigration(id) if id.app == "a"));
    }

    #[test]
    fn test_into_parts_keys_graph_by_id() {
        let (graph, exceptions) = MigrationManifest::from_json(SAMPLE).unwrap().into_parts();
        assert!(graph.contains_key(&MigrationId::new("zerver", "0003_squashed")));
        assert!(graph.contains_key(&MigrationId::new("analytics", "0001_initial")));
        assert!(exceptions.contains(&MigrationId::new("guardian", "0001_initial")));
    }

    #[test]
    fn test_load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migrations.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let manifest = MigrationManifest::load(&path).unwrap();
        assert_eq!(manifest.migrations.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = MigrationManifest::load(Path::new("/nonexistent/migrations.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }
}
