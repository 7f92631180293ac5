// ABOUTME: The reconciliation core: is every applied migration accounted for?
// ABOUTME: Pure set computation over the applied set, target graph, and legacy exceptions

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::id::MigrationId;
use crate::manifest::GraphEntry;

/// Outcome of reconciling the applied-migration history against a target
/// migration graph. `missing` is non-empty and sorted by (app, name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationResult {
    Compatible,
    Incompatible { missing: Vec<MigrationId> },
}

impl ReconciliationResult {
    pub fn is_compatible(&self) -> bool {
        matches!(self, ReconciliationResult::Compatible)
    }
}

/// Decides whether every migration recorded as applied is still accounted
/// for by the target codebase. An applied id is accounted for when it is a
/// key in the target graph, appears in some entry's `replaces` list (it was
/// squashed into that entry), or is listed as a legacy exception.
///
/// Applied migrations accumulate for the lifetime of a deployment and are
/// never retracted from the bookkeeping table, even once the codebase
/// squashes them away; a check that only accepted direct graph membership
/// would flag every deployment that has lived through routine squashes.
///
/// Never fails: an empty applied set is trivially compatible, and
/// overlapping `replaces` lists or exceptions are harmless (removal is
/// idempotent). The result does not depend on iteration order; `missing`
/// is sorted for stable diagnostics.
pub fn reconcile(
    applied: &BTreeSet<MigrationId>,
    graph: &BTreeMap<MigrationId, GraphEntry>,
    legacy_exceptions: &BTreeSet<MigrationId>,
) -> ReconciliationResult {
    let mut missing: BTreeSet<MigrationId> = applied.clone();

    for id in legacy_exceptions {
        missing.remove(id);
    }

    for (id, entry) in graph {
        missing.remove(id);
        for replaced in &entry.replaces {
            missing.remove(replaced);
        }
    }

    if missing.is_empty() {
        debug!(applied = applied.len(), "Applied migrations reconciled");
        ReconciliationResult::Compatible
    } else {
        debug!(missing = missing.len(), "Applied migrations unaccounted for");
        ReconciliationResult::Incompatible {
            missing: missing.into_iter().collect(),
        }
    }
}
