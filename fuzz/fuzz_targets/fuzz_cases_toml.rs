//! Fuzz target for case file parsing and resolution.
//!
//! Goal: Parsing and resolving `odrl-eval.toml` should **never panic**, whatever the profile,
//! round, kind, expectation, or preset labels say.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_cases_toml
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use odrl_eval_settings::Overrides;

#[derive(Arbitrary, Debug)]
struct CasesInput {
    text: String,
    profile: Option<String>,
    round: Option<String>,
}

fuzz_target!(|input: CasesInput| {
    if input.text.len() > 64 * 1024 {
        return;
    }
    let Ok(cfg) = odrl_eval_settings::parse_cases_toml(&input.text) else {
        return;
    };
    let _ = odrl_eval_settings::resolve_cases(
        cfg,
        Overrides {
            profile: input.profile,
            round: input.round,
        },
    );
});
