use crate::engine::Evaluator;
use crate::graph::InMemoryGraph;
use crate::oracle::{EvaluationContext, PresetOracle};
use crate::trace::Trace;
use odrl_eval_types::{EvaluationRound, vocab};

pub const POLICY: &str = "urn:policy";

/// Terse graph construction for engine tests.
#[derive(Default)]
pub struct PolicyBuilder {
    graph: InMemoryGraph,
    lists: usize,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy holding one permission with the given action.
    pub fn permission(rule: &str, action: &str) -> Self {
        Self::new()
            .link(POLICY, vocab::PERMISSION, rule)
            .link(rule, vocab::ACTION, action)
    }

    pub fn prohibition(rule: &str, action: &str) -> Self {
        Self::new()
            .link(POLICY, vocab::PROHIBITION, rule)
            .link(rule, vocab::ACTION, action)
    }

    pub fn link(
        mut self,
        subject: impl Into<String>,
        predicate: &str,
        object: impl Into<String>,
    ) -> Self {
        self.graph.add(subject, predicate, object);
        self
    }

    /// Links `subject` to an RDF list holding `items` in order.
    pub fn list<S: AsRef<str>>(mut self, subject: &str, predicate: &str, items: &[S]) -> Self {
        if items.is_empty() {
            return self.link(subject, predicate, vocab::RDF_NIL);
        }
        let cells: Vec<String> = (0..items.len())
            .map(|i| format!("_:list{}-{i}", self.lists))
            .collect();
        self.lists += 1;

        self.graph.add(subject, predicate, cells[0].clone());
        for (i, item) in items.iter().enumerate() {
            let rest = cells.get(i + 1).map_or(vocab::RDF_NIL, String::as_str);
            self.graph.add(cells[i].clone(), vocab::RDF_FIRST, item.as_ref());
            self.graph.add(cells[i].clone(), vocab::RDF_REST, rest);
        }
        self
    }

    pub fn build(self) -> InMemoryGraph {
        self.graph
    }
}

/// Runs `f` against a fresh evaluator in round 1 and returns its result with the trace lines.
pub fn run<T>(
    graph: &InMemoryGraph,
    oracle: &PresetOracle,
    f: impl FnOnce(&mut Evaluator<'_>) -> T,
) -> (T, Vec<String>) {
    run_round(graph, oracle, EvaluationRound::First, f)
}

pub fn run_round<T>(
    graph: &InMemoryGraph,
    oracle: &PresetOracle,
    round: EvaluationRound,
    f: impl FnOnce(&mut Evaluator<'_>) -> T,
) -> (T, Vec<String>) {
    let ctx = EvaluationContext::new(oracle, round);
    let mut trace = Trace::new();
    let out = {
        let mut evaluator = Evaluator::new(graph, &ctx, &mut trace);
        f(&mut evaluator)
    };
    (out, trace.lines())
}
