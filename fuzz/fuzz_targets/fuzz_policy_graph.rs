//! Fuzz target for the policy graph parsers (N-Triples, N-Quads, Turtle, JSON-LD).
//!
//! Goal: The parser should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_graph
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use odrl_eval_graph::PolicyFormat;

fuzz_target!(|data: &[u8]| {
    // First byte picks the syntax.
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let format = PolicyFormat::ALL[usize::from(selector) % PolicyFormat::ALL.len()];
    if let Ok(text) = std::str::from_utf8(rest) {
        let _ = odrl_eval_graph::fuzz::parse_graph(text, format);
    }
});
