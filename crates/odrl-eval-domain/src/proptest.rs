//! Property-based tests for the engine.
//!
//! These tests use proptest to verify invariants around:
//! - Logical combinator satisfaction counts
//! - Short-circuiting over constraint sets and consequences
//! - Error absorption in rule gating

use crate::engine::{ConstraintRelation, DutyRelation, LogicalOperator};
use crate::graph::{InMemoryGraph, PolicyGraph, Triple};
use crate::oracle::{EvaluationContext, PresetOracle};
use crate::test_support::{PolicyBuilder, run, run_round};
use crate::trace::Trace;
use crate::verdict::RuleVerdict;
use crate::{evaluate_permission, evaluate_obligation_round1, evaluate_obligation_round2};
use odrl_eval_types::{
    ConstraintState, DutyState, EvaluationRound, Outcome, PermissionState, vocab,
};
use proptest::prelude::*;
use std::cell::RefCell;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Positive),
        Just(Outcome::Negative),
        Just(Outcome::NotExisting),
        Just(Outcome::Error),
    ]
}

fn arb_operator() -> impl Strategy<Value = LogicalOperator> {
    prop::sample::select(LogicalOperator::PROBE_ORDER.to_vec())
}

/// How a generated consequence is wired so that it evaluates to the given state.
fn arb_consequence() -> impl Strategy<Value = DutyState> {
    prop_oneof![
        Just(DutyState::Fulfilled),
        Just(DutyState::NotFulfilled),
        Just(DutyState::NotExisting),
    ]
}

/// A duty whose action resolves to `exercised`, with one consequence per entry of `consequences`.
fn duty_graph(exercised: bool, consequences: &[DutyState]) -> (InMemoryGraph, PresetOracle) {
    let mut builder = PolicyBuilder::new()
        .link("urn:policy", vocab::OBLIGATION, "urn:duty")
        .link("urn:duty", vocab::ACTION, "urn:pay");
    let mut oracle = PresetOracle::new().with_instance(
        "urn:pay",
        if exercised { Outcome::Positive } else { Outcome::Negative },
    );

    for (i, state) in consequences.iter().enumerate() {
        let node = format!("urn:cons{i}");
        let action = format!("urn:cons{i}-action");
        builder = builder
            .link("urn:duty", vocab::CONSEQUENCE, node.clone())
            .link(node.clone(), vocab::ACTION, action.clone());
        match state {
            DutyState::Fulfilled => oracle.set_instance(action, Outcome::Positive),
            DutyState::NotFulfilled => oracle.set_instance(action, Outcome::Negative),
            _ => {
                let constraint = format!("{node}-constraint");
                builder = builder.link(node, vocab::CONSTRAINT, constraint.clone());
                oracle.set_instance(constraint, Outcome::Negative);
            }
        }
    }
    (builder.build(), oracle)
}

/// Graph wrapper that remembers every predicate it was asked about.
struct RecordingGraph {
    inner: InMemoryGraph,
    predicates: RefCell<Vec<String>>,
}

impl PolicyGraph for RecordingGraph {
    fn query(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Vec<Triple> {
        if let Some(p) = predicate {
            self.predicates.borrow_mut().push(p.to_string());
        }
        self.inner.query(subject, predicate, object)
    }
}

// ============================================================================
// Property tests: logical combinators and constraint sets
// ============================================================================

proptest! {
    #[test]
    fn combinators_follow_their_satisfaction_counts(
        op in arb_operator(),
        children in prop::collection::vec(arb_outcome(), 1..8),
    ) {
        let ids: Vec<String> = (0..children.len()).map(|i| format!("urn:c{i}")).collect();
        let graph = PolicyBuilder::new()
            .link("urn:rule", vocab::CONSTRAINT, "urn:logical")
            .list("urn:logical", op.iri(), &ids)
            .build();
        let mut oracle = PresetOracle::new();
        for (id, outcome) in ids.iter().zip(&children) {
            oracle.set_instance(id.clone(), *outcome);
        }

        let (state, _) = run(&graph, &oracle, |ev| {
            ev.evaluate_constraint_node("urn:logical", ConstraintRelation::Constraint)
        });

        let satisfied = children.iter().filter(|o| **o == Outcome::Positive).count();
        let total = children.len();
        let expected = match op {
            LogicalOperator::And | LogicalOperator::AndSequence => satisfied == total,
            LogicalOperator::Or => satisfied > 1,
            LogicalOperator::Xone => satisfied == 1,
        };
        prop_assert_eq!(state == ConstraintState::Satisfied, expected);
        prop_assert_ne!(state, ConstraintState::Error);
    }

    #[test]
    fn constraint_set_returns_the_first_unsatisfied_state(
        children in prop::collection::vec(arb_outcome(), 0..8),
    ) {
        let mut builder = PolicyBuilder::new();
        let mut oracle = PresetOracle::new();
        for (i, outcome) in children.iter().enumerate() {
            let id = format!("urn:c{i}");
            builder = builder.link("urn:rule", vocab::CONSTRAINT, id.clone());
            oracle.set_instance(id, *outcome);
        }
        let graph = builder.build();

        let (state, _) = run(&graph, &oracle, |ev| {
            ev.evaluate_constraint_set("urn:rule", ConstraintRelation::Constraint)
        });

        let expected = if children.is_empty() {
            ConstraintState::NotExisting
        } else {
            children
                .iter()
                .map(|o| ConstraintState::from(*o))
                .find(|s| *s != ConstraintState::Satisfied)
                .unwrap_or(ConstraintState::Satisfied)
        };
        prop_assert_eq!(state, expected);
    }
}

// ============================================================================
// Property tests: duties and consequences
// ============================================================================

proptest! {
    #[test]
    fn exercised_duty_is_fulfilled_whatever_its_consequences(
        consequences in prop::collection::vec(arb_consequence(), 0..5),
        eval_consequences in any::<bool>(),
    ) {
        let (graph, oracle) = duty_graph(true, &consequences);
        let (state, _) = run(&graph, &oracle, |ev| {
            ev.evaluate_duty("urn:duty", eval_consequences, DutyRelation::Duty)
        });
        prop_assert_eq!(state, DutyState::Fulfilled);
    }

    #[test]
    fn unexercised_duty_takes_its_state_from_the_consequences(
        consequences in prop::collection::vec(arb_consequence(), 0..5),
    ) {
        let (graph, oracle) = duty_graph(false, &consequences);
        let (state, _) = run(&graph, &oracle, |ev| {
            ev.evaluate_duty("urn:duty", true, DutyRelation::Duty)
        });

        let expected = if consequences.is_empty()
            || consequences.contains(&DutyState::NotFulfilled)
        {
            DutyState::NotFulfilled
        } else if consequences.contains(&DutyState::Fulfilled) {
            DutyState::Fulfilled
        } else {
            DutyState::NotExisting
        };
        prop_assert_eq!(state, expected);
    }

    #[test]
    fn obligation_rounds_agree_on_exercised_duties(
        consequences in prop::collection::vec(arb_consequence(), 0..5),
    ) {
        let (graph, oracle) = duty_graph(true, &consequences);
        let first = {
            let ctx = EvaluationContext::new(&oracle, EvaluationRound::First);
            let mut trace = Trace::new();
            evaluate_obligation_round1(Some(&graph), "urn:duty", &mut trace, &ctx)
        };
        let second = {
            let ctx = EvaluationContext::new(&oracle, EvaluationRound::Second);
            let mut trace = Trace::new();
            evaluate_obligation_round2(Some(&graph), "urn:duty", &mut trace, &ctx)
        };
        prop_assert_eq!(&first, &RuleVerdict::Decided(DutyState::Fulfilled));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn round_one_never_looks_at_consequences(
        consequences in prop::collection::vec(arb_consequence(), 1..5),
    ) {
        let (graph, oracle) = duty_graph(false, &consequences);
        let (state, trace) = run_round(&graph, &oracle, EvaluationRound::First, |ev| {
            ev.obligation("urn:duty", EvaluationRound::First)
        });
        prop_assert_eq!(state, RuleVerdict::Decided(DutyState::NotFulfilled));
        prop_assert!(trace.iter().all(|l| !l.contains("urn:cons")));
    }
}

// ============================================================================
// Property tests: error absorption
// ============================================================================

proptest! {
    #[test]
    fn constraint_error_stops_the_permission_before_its_action(
        before in prop::collection::vec(Just(Outcome::Positive), 0..4),
        after in prop::collection::vec(arb_outcome(), 0..4),
    ) {
        let mut builder = PolicyBuilder::permission("urn:perm", "urn:use")
            .link("urn:perm", vocab::DUTY, "urn:duty");
        let mut oracle = PresetOracle::new();
        let outcomes = before
            .iter()
            .chain(std::iter::once(&Outcome::Error))
            .chain(after.iter());
        for (i, outcome) in outcomes.enumerate() {
            let id = format!("urn:c{i}");
            builder = builder.link("urn:perm", vocab::CONSTRAINT, id.clone());
            oracle.set_instance(id, *outcome);
        }
        let graph = RecordingGraph {
            inner: builder.build(),
            predicates: RefCell::new(Vec::new()),
        };

        let ctx = EvaluationContext::new(&oracle, EvaluationRound::Second);
        let mut trace = Trace::new();
        let verdict = evaluate_permission(Some(&graph), "urn:perm", &mut trace, &ctx);

        prop_assert_eq!(verdict, RuleVerdict::Decided(PermissionState::Error));
        let asked = graph.predicates.borrow();
        prop_assert!(!asked.iter().any(|p| p == vocab::ACTION || p == vocab::DUTY));
        prop_assert!(!asked.iter().any(|p| p == vocab::TARGET || p == vocab::ASSIGNEE));
    }
}
