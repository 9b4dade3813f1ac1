use super::{ConstraintRelation, Evaluator};
use odrl_eval_types::{ConstraintState, TraceEntry, vocab};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOperator {
    Or,
    And,
    Xone,
    AndSequence,
}

impl LogicalOperator {
    /// Order in which a node's operand relations are probed.
    pub const PROBE_ORDER: [LogicalOperator; 4] = [
        LogicalOperator::Or,
        LogicalOperator::And,
        LogicalOperator::Xone,
        LogicalOperator::AndSequence,
    ];

    pub const fn iri(self) -> &'static str {
        match self {
            LogicalOperator::Or => vocab::OR,
            LogicalOperator::And => vocab::AND,
            LogicalOperator::Xone => vocab::XONE,
            LogicalOperator::AndSequence => vocab::AND_SEQUENCE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogicalOperator::Or => "OR",
            LogicalOperator::And => "AND",
            LogicalOperator::Xone => "XONE",
            LogicalOperator::AndSequence => "AND-SEQUENCE",
        }
    }

    /// Satisfaction predicate over `satisfied` of `total` children.
    ///
    /// OR needs more than one satisfied child. AND-SEQUENCE is a plain count check and does
    /// not look at child order.
    pub const fn holds(self, satisfied: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        match self {
            LogicalOperator::And | LogicalOperator::AndSequence => satisfied == total,
            LogicalOperator::Or => satisfied > 1,
            LogicalOperator::Xone => satisfied == 1,
        }
    }
}

impl Evaluator<'_> {
    /// The first operator in probe order that has at least one operand, with its operands.
    ///
    /// Operand relations that only point at `rdf:nil` are skipped. A node whose operand
    /// relations are all empty is still logical: the first of them is selected with zero
    /// children.
    pub(super) fn logical_operands(&self, node: &str) -> Option<(LogicalOperator, Vec<String>)> {
        let mut first_empty = None;
        for op in LogicalOperator::PROBE_ORDER {
            if self.graph.first_object(node, op.iri()).is_none() {
                continue;
            }
            let operands = self.graph.members(node, op.iri());
            if !operands.is_empty() {
                return Some((op, operands));
            }
            first_empty.get_or_insert(op);
        }
        first_empty.map(|op| (op, Vec::new()))
    }

    pub(super) fn evaluate_logical(
        &mut self,
        node: &str,
        operator: LogicalOperator,
        operands: &[String],
        relation: ConstraintRelation,
    ) -> ConstraintState {
        self.note(TraceEntry::next_step(format!(
            "Evaluation of Logical Constraint '{node}' ({}, {} operands)",
            operator.name(),
            operands.len()
        )));

        let satisfied = operands
            .iter()
            .map(|child| self.evaluate_constraint_node(child, relation))
            .filter(|state| *state == ConstraintState::Satisfied)
            .count();

        let state = if operator.holds(satisfied, operands.len()) {
            ConstraintState::Satisfied
        } else {
            ConstraintState::NotSatisfied
        };
        self.note(TraceEntry::result(format!(
            "Evaluation of Logical Constraint '{node}' ({}: {satisfied} of {} satisfied), status = {state}",
            operator.name(),
            operands.len()
        )));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::LogicalOperator;
    use crate::PresetOracle;
    use crate::engine::ConstraintRelation;
    use crate::test_support::{PolicyBuilder, run};
    use odrl_eval_types::{ConstraintState, Outcome, vocab};

    fn logical(op: LogicalOperator, states: &[Outcome]) -> (ConstraintState, Vec<String>) {
        let children: Vec<String> = (0..states.len()).map(|i| format!("urn:c{i}")).collect();
        let graph = PolicyBuilder::new()
            .link("urn:rule", vocab::CONSTRAINT, "urn:logical")
            .list("urn:logical", op.iri(), &children)
            .build();
        let mut oracle = PresetOracle::new();
        for (child, outcome) in children.iter().zip(states) {
            oracle.set_instance(child.clone(), *outcome);
        }
        run(&graph, &oracle, |ev| {
            ev.evaluate_constraint_set("urn:rule", ConstraintRelation::Constraint)
        })
    }

    #[test]
    fn and_of_two_satisfied_is_satisfied() {
        let (state, _) = logical(LogicalOperator::And, &[Outcome::Positive, Outcome::Positive]);
        assert_eq!(state, ConstraintState::Satisfied);
    }

    #[test]
    fn or_with_a_single_satisfied_child_is_not_satisfied() {
        // OR requires more than one satisfied operand.
        let (state, _) = logical(LogicalOperator::Or, &[Outcome::Positive, Outcome::Negative]);
        assert_eq!(state, ConstraintState::NotSatisfied);

        let (state, _) = logical(
            LogicalOperator::Or,
            &[Outcome::Positive, Outcome::Negative, Outcome::Positive],
        );
        assert_eq!(state, ConstraintState::Satisfied);
    }

    #[test]
    fn xone_needs_exactly_one() {
        let (state, trace) = logical(
            LogicalOperator::Xone,
            &[Outcome::Negative, Outcome::Positive, Outcome::Negative],
        );
        assert_eq!(state, ConstraintState::Satisfied);
        assert!(trace.iter().any(|l| l.contains("XONE: 1 of 3 satisfied")));

        let (state, _) = logical(LogicalOperator::Xone, &[Outcome::Positive, Outcome::Positive]);
        assert_eq!(state, ConstraintState::NotSatisfied);
    }

    #[test]
    fn and_sequence_ignores_child_order() {
        let (state, _) = logical(
            LogicalOperator::AndSequence,
            &[Outcome::Positive, Outcome::Positive, Outcome::Positive],
        );
        assert_eq!(state, ConstraintState::Satisfied);
    }

    #[test]
    fn error_children_count_as_unsatisfied_and_do_not_stop_evaluation() {
        let (state, trace) = logical(
            LogicalOperator::Or,
            &[Outcome::Error, Outcome::Positive, Outcome::Positive],
        );
        assert_eq!(state, ConstraintState::Satisfied);
        assert!(trace.iter().any(|l| l.contains("'urn:c2'")));
    }

    #[test]
    fn empty_operand_list_is_not_satisfied() {
        let graph = PolicyBuilder::new()
            .link("urn:rule", vocab::CONSTRAINT, "urn:logical")
            .link("urn:logical", vocab::AND, vocab::RDF_NIL)
            .build();
        let (state, _) = run(&graph, &PresetOracle::new(), |ev| {
            ev.evaluate_constraint_set("urn:rule", ConstraintRelation::Constraint)
        });
        assert_eq!(state, ConstraintState::NotSatisfied);
    }

    #[test]
    fn empty_or_list_does_not_shadow_a_populated_and() {
        let graph = PolicyBuilder::new()
            .link("urn:rule", vocab::CONSTRAINT, "urn:logical")
            .link("urn:logical", vocab::OR, vocab::RDF_NIL)
            .list("urn:logical", vocab::AND, &["urn:a"])
            .build();
        let oracle = PresetOracle::new().with_instance("urn:a", Outcome::Positive);
        let (state, trace) = run(&graph, &oracle, |ev| {
            ev.evaluate_constraint_set("urn:rule", ConstraintRelation::Constraint)
        });
        assert_eq!(state, ConstraintState::Satisfied);
        assert!(trace.iter().any(|l| l.contains("(AND, 1 operands)")));
        assert!(trace.iter().all(|l| !l.contains("(OR, 0 operands)")));
    }

    #[test]
    fn or_is_probed_before_and() {
        let graph = PolicyBuilder::new()
            .link("urn:rule", vocab::CONSTRAINT, "urn:logical")
            .link("urn:logical", vocab::AND, "urn:a")
            .link("urn:logical", vocab::OR, "urn:b")
            .build();
        let oracle = PresetOracle::new()
            .with_instance("urn:a", Outcome::Positive)
            .with_instance("urn:b", Outcome::Positive);
        let (state, trace) = run(&graph, &oracle, |ev| {
            ev.evaluate_constraint_set("urn:rule", ConstraintRelation::Constraint)
        });
        assert_eq!(state, ConstraintState::NotSatisfied);
        assert!(trace.iter().any(|l| l.contains("(OR, 1 operands)")));
    }

    #[test]
    fn self_referencing_operand_is_an_error() {
        let graph = PolicyBuilder::new()
            .link("urn:rule", vocab::CONSTRAINT, "urn:outer")
            .list("urn:outer", vocab::AND, &["urn:inner", "urn:leaf"])
            .list("urn:inner", vocab::OR, &["urn:outer", "urn:leaf"])
            .build();
        let oracle = PresetOracle::new().with_instance("urn:leaf", Outcome::Positive);
        let (state, trace) = run(&graph, &oracle, |ev| {
            ev.evaluate_constraint_set("urn:rule", ConstraintRelation::Constraint)
        });
        assert_eq!(state, ConstraintState::NotSatisfied);
        assert!(
            trace
                .iter()
                .any(|l| l == "ERROR: logical constraint 'urn:outer' is one of its own operands")
        );
    }

    #[test]
    fn holds_truth_table() {
        assert!(LogicalOperator::And.holds(3, 3));
        assert!(!LogicalOperator::And.holds(2, 3));
        assert!(!LogicalOperator::And.holds(0, 0));
        assert!(LogicalOperator::Or.holds(2, 5));
        assert!(!LogicalOperator::Or.holds(1, 5));
        assert!(LogicalOperator::Xone.holds(1, 1));
        assert!(!LogicalOperator::Xone.holds(0, 2));
    }
}
