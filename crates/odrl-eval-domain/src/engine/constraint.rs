use super::Evaluator;
use crate::error::EvalError;
use odrl_eval_types::{Category, ConstraintState, TraceEntry, vocab};
use std::fmt;

/// Relation through which a set of constraints hangs off its subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintRelation {
    /// Constraints of a rule or duty.
    Constraint,
    /// Refinements of an action, target, or assignee.
    Refinement,
}

impl ConstraintRelation {
    pub const fn iri(self) -> &'static str {
        match self {
            ConstraintRelation::Constraint => vocab::CONSTRAINT,
            ConstraintRelation::Refinement => vocab::REFINEMENT,
        }
    }

    /// Oracle default category for atomic nodes reached through this relation.
    pub const fn category(self) -> Category {
        match self {
            ConstraintRelation::Constraint => Category::Constraint,
            ConstraintRelation::Refinement => Category::Refinement,
        }
    }
}

impl fmt::Display for ConstraintRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category().as_str())
    }
}

impl Evaluator<'_> {
    /// Evaluates every node reachable from `subject` via `relation`, in query order.
    ///
    /// No nodes yields `NotExisting`. The first node that is not `Satisfied` ends the
    /// evaluation and its state is returned as is, including `NotExisting`.
    pub fn evaluate_constraint_set(
        &mut self,
        subject: &str,
        relation: ConstraintRelation,
    ) -> ConstraintState {
        let nodes = self.graph.objects(subject, relation.iri());
        if nodes.is_empty() {
            self.note(TraceEntry::result(format!(
                "No {relation} instances of '{subject}', status = {}",
                ConstraintState::NotExisting
            )));
            return ConstraintState::NotExisting;
        }

        for node in &nodes {
            let state = self.evaluate_constraint_node(node, relation);
            if state != ConstraintState::Satisfied {
                self.note(TraceEntry::result(format!(
                    "Evaluation of all {relation}s of '{subject}' stopped at '{node}', status = {state}"
                )));
                return state;
            }
        }

        self.note(TraceEntry::result(format!(
            "Evaluation of all {relation}s of '{subject}', status = {}",
            ConstraintState::Satisfied
        )));
        ConstraintState::Satisfied
    }

    /// Evaluates one constraint node: logical if it has operands, atomic otherwise.
    ///
    /// A logical node reached again while it is still being evaluated is an error.
    pub fn evaluate_constraint_node(
        &mut self,
        node: &str,
        relation: ConstraintRelation,
    ) -> ConstraintState {
        match self.logical_operands(node) {
            Some(_) if self.open_logical.iter().any(|open| open == node) => {
                self.fail(&EvalError::CyclicConstraint(node.to_string()));
                ConstraintState::Error
            }
            Some((operator, operands)) => {
                self.open_logical.push(node.to_string());
                let state = self.evaluate_logical(node, operator, &operands, relation);
                self.open_logical.pop();
                state
            }
            None => self.evaluate_atomic(node, relation),
        }
    }

    fn evaluate_atomic(&mut self, node: &str, relation: ConstraintRelation) -> ConstraintState {
        match self.lookup(node, &[relation.category()]) {
            Ok((outcome, source)) => {
                let state = ConstraintState::from(outcome);
                self.note(TraceEntry::result(format!(
                    "Evaluation of Constraint instance '{node}' (a {relation}), status = {state} ({source})"
                )));
                state
            }
            Err(err) => {
                self.fail(&err);
                ConstraintState::Error
            }
        }
    }
}
