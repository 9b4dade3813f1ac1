//! Evaluate ODRL permissions, prohibitions and obligations against a policy graph.
//!
//! ```
//! use odrl_eval::{
//!     Category, EvaluationContext, EvaluationRound, InMemoryGraph, Outcome, PermissionState,
//!     PresetOracle, RuleVerdict, Trace, evaluate_permission, vocab,
//! };
//!
//! let mut graph = InMemoryGraph::new();
//! graph.add("urn:policy", vocab::PERMISSION, "urn:perm");
//! graph.add("urn:perm", vocab::ACTION, "urn:use");
//!
//! let oracle = PresetOracle::new().with_default(Category::Action, Outcome::Positive);
//! let ctx = EvaluationContext::new(&oracle, EvaluationRound::First);
//! let mut trace = Trace::new();
//!
//! let verdict = evaluate_permission(Some(&graph), "urn:perm", &mut trace, &ctx);
//! assert_eq!(verdict, RuleVerdict::Decided(PermissionState::Allowed));
//! ```

#![forbid(unsafe_code)]

pub use odrl_eval_domain::*;
pub use odrl_eval_types::{
    AbortReason, ActionExercisedState, Category, ConstraintState, DutyState, EvaluationRound,
    Outcome, PermissionState, ProhibitionState, RuleKind, TraceEntry, TraceKind, VerdictReport,
    vocab,
};
