use odrl_eval_types::Category;
use thiserror::Error;

/// Engine-level failure conditions.
///
/// Most of these never escape the engine as `Err`: they are recorded as `ERROR` trace lines
/// and surface as the `Error` state of the evaluator that hit them. Only `evaluate_rule`
/// returns them directly, when it cannot decide which evaluator to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("no policy graph supplied")]
    MissingStore,

    #[error("'{subject}' has no '{relation}' relation")]
    MissingReference { subject: String, relation: String },

    #[error("no preset for '{id}' and no default for category '{category}'")]
    OracleMiss { id: String, category: Category },

    #[error("logical constraint '{0}' is one of its own operands")]
    CyclicConstraint(String),

    #[error("rule '{0}' is not referenced as a permission, prohibition, obligation or duty")]
    UnclassifiedRule(String),
}
