//! Pure rule evaluation (no IO).
//!
//! Input: a policy graph loaded elsewhere, a rule id, and an evaluation context (oracle + round).
//! Output: a typed verdict plus an ordered trace of every sub-decision.

#![forbid(unsafe_code)]

pub mod classify;
pub mod error;
pub mod graph;
pub mod oracle;
pub mod trace;
pub mod verdict;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use classify::classify_rule;
pub use engine::{
    ActionRelation, ConstraintRelation, DutyRelation, Evaluator, LogicalOperator, RuleOutcome,
    evaluate_obligation, evaluate_obligation_round1, evaluate_obligation_round2,
    evaluate_permission, evaluate_prohibition, evaluate_rule,
};
pub use error::EvalError;
pub use graph::{InMemoryGraph, PolicyGraph, Triple};
pub use oracle::{EvaluationContext, Oracle, PresetOracle};
pub use trace::{Trace, TraceSink};
pub use verdict::{Abort, RuleVerdict};
