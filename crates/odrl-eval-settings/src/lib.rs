//! Case file parsing and oracle profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CaseConfig, EvalCasesConfigV1, PresetsConfig};
pub use presets::{PROFILES, profile_oracle};
pub use resolve::{ExpectedVerdict, Overrides, ResolvedCase, ResolvedCases};

/// Parse `odrl-eval.toml` (or equivalent) into a typed model.
pub fn parse_cases_toml(input: &str) -> anyhow::Result<EvalCasesConfigV1> {
    let cfg: EvalCasesConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve every case into the inputs the engine needs (oracle, round, kind, expectation).
pub fn resolve_cases(
    cfg: EvalCasesConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedCases> {
    resolve::resolve_cases(cfg, overrides)
}
