//! Fuzz target for rule evaluation over arbitrary policy graphs.
//!
//! Goal: Evaluating every rule of a parsed graph should **never panic** and always terminate,
//! including graphs whose logical constraints list themselves as operands.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate_rule
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use odrl_eval_domain::{EvaluationContext, PolicyGraph, Trace, evaluate_rule};
use odrl_eval_graph::PolicyFormat;
use odrl_eval_types::{EvaluationRound, vocab};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 16 * 1024 {
        return;
    }
    let Ok(graph) = odrl_eval_graph::parse_policy_graph(text, PolicyFormat::NTriples) else {
        return;
    };
    let Ok(oracle) = odrl_eval_settings::profile_oracle("permissive") else {
        return;
    };

    let rules: Vec<String> = graph
        .iter()
        .filter(|t| {
            matches!(
                t.predicate.as_str(),
                vocab::PERMISSION | vocab::PROHIBITION | vocab::OBLIGATION
            )
        })
        .map(|t| t.object.clone())
        .collect();

    let store: &dyn PolicyGraph = &graph;
    for rule in &rules {
        for round in [EvaluationRound::First, EvaluationRound::Second] {
            let ctx = EvaluationContext::new(&oracle, round);
            let mut trace = Trace::new();
            let _ = evaluate_rule(Some(store), rule, None, &mut trace, &ctx);
        }
    }
});
