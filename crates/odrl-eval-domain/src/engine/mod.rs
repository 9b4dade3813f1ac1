//! The rule evaluation engine.
//!
//! `Evaluator` walks a rule's graph depth-first. Each node kind has its own evaluator in a
//! submodule; all of them share the graph, the oracle, the round, and the trace held here.

mod action;
mod constraint;
mod duty;
mod logical;
mod rules;

pub use action::ActionRelation;
pub use constraint::ConstraintRelation;
pub use duty::DutyRelation;
pub use logical::LogicalOperator;

use crate::classify::classify_rule;
use crate::error::EvalError;
use crate::graph::PolicyGraph;
use crate::oracle::{EvaluationContext, Oracle};
use crate::trace::TraceSink;
use crate::verdict::RuleVerdict;
use odrl_eval_types::{
    Category, DutyState, EvaluationRound, Outcome, PermissionState, ProhibitionState, RuleKind,
    TraceEntry, TraceKind, VerdictReport,
};
use std::fmt;

pub struct Evaluator<'a> {
    graph: &'a dyn PolicyGraph,
    oracle: &'a dyn Oracle,
    round: EvaluationRound,
    trace: &'a mut dyn TraceSink,
    /// Logical constraints currently being evaluated, innermost last.
    open_logical: Vec<String>,
}

/// Where an oracle answer came from.
#[derive(Clone, Copy, Debug)]
enum PresetSource {
    Instance,
    Default(Category),
}

impl fmt::Display for PresetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetSource::Instance => f.write_str("preset"),
            PresetSource::Default(c) => write!(f, "default {c}"),
        }
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(
        graph: &'a dyn PolicyGraph,
        ctx: &EvaluationContext<'a>,
        trace: &'a mut dyn TraceSink,
    ) -> Self {
        Self {
            graph,
            oracle: ctx.oracle,
            round: ctx.round,
            trace,
            open_logical: Vec::new(),
        }
    }

    pub fn round(&self) -> EvaluationRound {
        self.round
    }

    fn note(&mut self, entry: TraceEntry) {
        match entry.kind {
            TraceKind::Error => tracing::warn!(target: "odrl_eval::trace", "{entry}"),
            _ => tracing::debug!(target: "odrl_eval::trace", "{entry}"),
        }
        self.trace.record(entry);
    }

    fn fail(&mut self, err: &EvalError) {
        self.note(TraceEntry::error(err.to_string()));
    }

    /// Instance override first, then each category default in order.
    fn lookup(
        &self,
        id: &str,
        categories: &[Category],
    ) -> Result<(Outcome, PresetSource), EvalError> {
        if let Some(outcome) = self.oracle.lookup_instance(id) {
            return Ok((outcome, PresetSource::Instance));
        }
        for &category in categories {
            if let Some(outcome) = self.oracle.lookup_default(category) {
                return Ok((outcome, PresetSource::Default(category)));
            }
        }
        Err(EvalError::OracleMiss {
            id: id.to_string(),
            category: categories.first().copied().unwrap_or(Category::Constraint),
        })
    }
}

/// Verdict of whichever rule evaluator ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    Permission(RuleVerdict<PermissionState>),
    Prohibition(RuleVerdict<ProhibitionState>),
    Obligation(RuleVerdict<DutyState>),
}

impl RuleOutcome {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleOutcome::Permission(_) => RuleKind::Permission,
            RuleOutcome::Prohibition(_) => RuleKind::Prohibition,
            RuleOutcome::Obligation(_) => RuleKind::Obligation,
        }
    }

    pub fn report(&self) -> VerdictReport {
        match self {
            RuleOutcome::Permission(v) => v.into(),
            RuleOutcome::Prohibition(v) => v.into(),
            RuleOutcome::Obligation(v) => v.into(),
        }
    }
}

fn missing_store<S: From<Outcome>>(trace: &mut dyn TraceSink, what: &str) -> RuleVerdict<S> {
    let err = EvalError::MissingStore;
    tracing::warn!(target: "odrl_eval::trace", "{what}: {err}");
    trace.record(TraceEntry::error(format!("{what}: {err}")));
    RuleVerdict::error()
}

pub fn evaluate_permission(
    graph: Option<&dyn PolicyGraph>,
    rule_id: &str,
    trace: &mut dyn TraceSink,
    ctx: &EvaluationContext<'_>,
) -> RuleVerdict<PermissionState> {
    let Some(graph) = graph else {
        return missing_store(trace, "Permission");
    };
    Evaluator::new(graph, ctx, trace).permission(rule_id)
}

pub fn evaluate_prohibition(
    graph: Option<&dyn PolicyGraph>,
    rule_id: &str,
    trace: &mut dyn TraceSink,
    ctx: &EvaluationContext<'_>,
) -> RuleVerdict<ProhibitionState> {
    let Some(graph) = graph else {
        return missing_store(trace, "Prohibition");
    };
    Evaluator::new(graph, ctx, trace).prohibition(rule_id)
}

/// Round 1: the obligation's consequences are not evaluated.
pub fn evaluate_obligation_round1(
    graph: Option<&dyn PolicyGraph>,
    rule_id: &str,
    trace: &mut dyn TraceSink,
    ctx: &EvaluationContext<'_>,
) -> RuleVerdict<DutyState> {
    let Some(graph) = graph else {
        return missing_store(trace, "Obligation");
    };
    Evaluator::new(graph, ctx, trace).obligation(rule_id, EvaluationRound::First)
}

/// Round 2: consequences are evaluated when the obligation's action was not exercised.
pub fn evaluate_obligation_round2(
    graph: Option<&dyn PolicyGraph>,
    rule_id: &str,
    trace: &mut dyn TraceSink,
    ctx: &EvaluationContext<'_>,
) -> RuleVerdict<DutyState> {
    let Some(graph) = graph else {
        return missing_store(trace, "Obligation");
    };
    Evaluator::new(graph, ctx, trace).obligation(rule_id, EvaluationRound::Second)
}

/// Runs the obligation round selected by the context.
pub fn evaluate_obligation(
    graph: Option<&dyn PolicyGraph>,
    rule_id: &str,
    trace: &mut dyn TraceSink,
    ctx: &EvaluationContext<'_>,
) -> RuleVerdict<DutyState> {
    match ctx.round {
        EvaluationRound::First => evaluate_obligation_round1(graph, rule_id, trace, ctx),
        EvaluationRound::Second => evaluate_obligation_round2(graph, rule_id, trace, ctx),
    }
}

/// Classifies the rule (unless `kind` is given) and runs the matching evaluator.
pub fn evaluate_rule(
    graph: Option<&dyn PolicyGraph>,
    rule_id: &str,
    kind: Option<RuleKind>,
    trace: &mut dyn TraceSink,
    ctx: &EvaluationContext<'_>,
) -> Result<RuleOutcome, EvalError> {
    let Some(store) = graph else {
        let err = EvalError::MissingStore;
        trace.record(TraceEntry::error(err.to_string()));
        return Err(err);
    };

    let (kind, source) = match kind {
        Some(kind) => (kind, "given"),
        None => match classify_rule(store, rule_id) {
            Some(kind) => (kind, "inferred"),
            None => {
                let err = EvalError::UnclassifiedRule(rule_id.to_string());
                trace.record(TraceEntry::error(err.to_string()));
                return Err(err);
            }
        },
    };
    trace.record(TraceEntry::result(format!("{source} sub-class = {kind}")));

    Ok(match kind {
        RuleKind::Permission => {
            RuleOutcome::Permission(evaluate_permission(graph, rule_id, trace, ctx))
        }
        RuleKind::Prohibition => {
            RuleOutcome::Prohibition(evaluate_prohibition(graph, rule_id, trace, ctx))
        }
        RuleKind::Obligation => {
            RuleOutcome::Obligation(evaluate_obligation(graph, rule_id, trace, ctx))
        }
    })
}
