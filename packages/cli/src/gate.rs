// ABOUTME: Engine version gate: observed server version vs deployment configuration
// ABOUTME: Pure decision logic; persistence and process exit belong to the caller

/// Oldest Postgres major version the codebase still supports.
pub const MINIMUM_POSTGRES_MAJOR: u32 = 12;

/// What the caller must do after the gate has looked at the observed and
/// configured engine versions. `persist` is populated on first run (no
/// configured value yet) and must be written back even when the verdict is
/// `Unsupported`; the support check always judges the observed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub persist: Option<u32>,
    pub verdict: GateVerdict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Proceed,
    Mismatch { configured: u32, observed: u32 },
    Unsupported { observed: u32, minimum: u32 },
}

/// Reconciles the running server's major version against the configured
/// value (0 = unset). A mismatch is never auto-corrected: a silent rewrite
/// could mask an accidental connection to the wrong database cluster, so
/// the operator has to resolve it manually. The minimum-version check runs
/// unconditionally after configuration reconciliation.
pub fn evaluate_gate(observed: u32, configured: u32) -> GateDecision {
    let persist = (configured == 0).then_some(observed);

    let verdict = if configured != 0 && configured != observed {
        GateVerdict::Mismatch {
            configured,
            observed,
        }
    } else if observed < MINIMUM_POSTGRES_MAJOR {
        GateVerdict::Unsupported {
            observed,
            minimum: MINIMUM_POSTGRES_MAJOR,
        }
    } else {
        GateVerdict::Proceed
    };

    GateDecision { persist, verdict }
}
