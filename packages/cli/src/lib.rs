// ABOUTME: Orchestration library for the preflight binary
// ABOUTME: Version gate, check pipeline, error taxonomy, and operator reporting

pub mod check;
pub mod error;
pub mod gate;
pub mod report;

pub use check::{run_check, CheckOptions};
pub use error::CheckError;
pub use gate::{evaluate_gate, GateDecision, GateVerdict, MINIMUM_POSTGRES_MAJOR};
