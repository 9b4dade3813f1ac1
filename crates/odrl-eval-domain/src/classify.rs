//! Rule sub-class inference.

use crate::graph::PolicyGraph;
use odrl_eval_types::{RuleKind, vocab};

const REFERENCES: [(&str, RuleKind); 4] = [
    (vocab::PERMISSION, RuleKind::Permission),
    (vocab::PROHIBITION, RuleKind::Prohibition),
    (vocab::OBLIGATION, RuleKind::Obligation),
    (vocab::DUTY, RuleKind::Obligation),
];

const CLASSES: [(&str, RuleKind); 3] = [
    (vocab::CLASS_PERMISSION, RuleKind::Permission),
    (vocab::CLASS_PROHIBITION, RuleKind::Prohibition),
    (vocab::CLASS_DUTY, RuleKind::Obligation),
];

/// Infers the kind of `rule_id` from the predicate that references it.
///
/// A rule reached via `duty` is evaluated as an obligation. Unreferenced rules fall back to
/// their `rdf:type`.
pub fn classify_rule(graph: &dyn PolicyGraph, rule_id: &str) -> Option<RuleKind> {
    REFERENCES
        .iter()
        .find(|(predicate, _)| !graph.query(None, Some(*predicate), Some(rule_id)).is_empty())
        .or_else(|| {
            CLASSES.iter().find(|(class, _)| {
                !graph
                    .query(Some(rule_id), Some(vocab::RDF_TYPE), Some(*class))
                    .is_empty()
            })
        })
        .map(|(_, kind)| *kind)
}
