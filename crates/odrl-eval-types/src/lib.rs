//! Stable DTOs and IDs used across the odrl-eval workspace.
//!
//! This crate is intentionally boring:
//! - the evaluation state algebra (one enum per rule/node kind plus the shared `Outcome`)
//! - ODRL vocabulary IRIs consumed by the engine
//! - trace entries and the emitted case report
//! - explain registry for verdict labels and abort codes

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod state;
pub mod trace;
pub mod vocab;

pub use explain::{Explanation, lookup_explanation};
pub use receipt::{
    AbortReport, CaseReport, Expectation, SCHEMA_CASE_REPORT_V1, ToolMeta, VerdictReport,
    VerdictStatus,
};
pub use state::{
    AbortReason, ActionExercisedState, Category, ConstraintState, DutyState, EvaluationRound,
    Outcome, PermissionState, ProhibitionState, RuleKind,
};
pub use trace::{TraceEntry, TraceKind};
