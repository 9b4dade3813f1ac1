use crate::{model::EvalCasesConfigV1, presets};
use anyhow::Context;
use odrl_eval_domain::PresetOracle;
use odrl_eval_types::{
    AbortReason, Category, EvaluationRound, Outcome, RuleKind, VerdictReport, VerdictStatus,
    explain, ids,
};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub round: Option<String>,
}

/// What a case expects the evaluation to produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpectedVerdict {
    /// A decided state, by canonical label (`Not-Allowed`).
    State(&'static str),
    /// An aborted verdict, optionally with a specific reason.
    Aborted(Option<AbortReason>),
}

impl ExpectedVerdict {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower == "aborted" {
            return Ok(ExpectedVerdict::Aborted(None));
        }
        if let Some(code) = lower.strip_prefix("aborted:") {
            let reason: AbortReason = code
                .parse()
                .with_context(|| format!("invalid expectation: {trimmed}"))?;
            return Ok(ExpectedVerdict::Aborted(Some(reason)));
        }
        explain::all_labels()
            .iter()
            .find(|label| label.eq_ignore_ascii_case(trimmed))
            .map(|label| ExpectedVerdict::State(*label))
            .with_context(|| {
                format!(
                    "invalid expectation: {trimmed} (expected a verdict label or aborted[:code])"
                )
            })
    }

    pub fn matches(&self, verdict: &VerdictReport) -> bool {
        match (self, verdict.status) {
            (ExpectedVerdict::State(label), VerdictStatus::Decided) => verdict
                .state
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(label)),
            (ExpectedVerdict::Aborted(None), VerdictStatus::Aborted) => true,
            (ExpectedVerdict::Aborted(Some(reason)), VerdictStatus::Aborted) => verdict
                .abort
                .as_ref()
                .is_some_and(|a| a.reason == *reason),
            _ => false,
        }
    }
}

impl fmt::Display for ExpectedVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedVerdict::State(label) => f.write_str(label),
            ExpectedVerdict::Aborted(None) => f.write_str("aborted"),
            ExpectedVerdict::Aborted(Some(reason)) => write!(f, "aborted:{reason}"),
        }
    }
}

/// Everything needed to evaluate one case, with all labels validated.
#[derive(Clone, Debug)]
pub struct ResolvedCase {
    pub name: String,
    pub description: Option<String>,
    /// Policy path as written in the case file.
    pub policy: String,
    pub rule_id: String,
    /// `None` means: classify the rule from the graph.
    pub kind: Option<RuleKind>,
    pub round: EvaluationRound,
    pub oracle: PresetOracle,
    pub expect: Option<ExpectedVerdict>,
}

#[derive(Clone, Debug)]
pub struct ResolvedCases {
    pub profile: String,
    /// Sorted by case name.
    pub cases: Vec<ResolvedCase>,
}

pub fn resolve_cases(
    cfg: EvalCasesConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedCases> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CASES_V1
    {
        anyhow::bail!(
            "unsupported schema: {schema} (expected {})",
            ids::SCHEMA_CASES_V1
        );
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "blank".to_string());
    let mut base = presets::profile_oracle(&profile)?;
    apply_defaults(&mut base, &cfg.defaults).context("invalid [defaults]")?;

    let override_round = overrides
        .round
        .as_deref()
        .map(parse_round)
        .transpose()
        .context("invalid round override")?;
    let file_round = cfg
        .round
        .as_deref()
        .map(parse_round)
        .transpose()
        .context("invalid top-level round")?;

    let mut cases = Vec::with_capacity(cfg.cases.len());
    for (name, case) in cfg.cases {
        let round = match (override_round, case.round.as_deref()) {
            (Some(round), _) => round,
            (None, Some(r)) => parse_round(r).with_context(|| format!("invalid round for {name}"))?,
            (None, None) => file_round.unwrap_or_default(),
        };

        let kind = case
            .kind
            .as_deref()
            .map(str::parse::<RuleKind>)
            .transpose()
            .with_context(|| format!("invalid kind for {name}"))?;

        let mut oracle = base.clone();
        apply_defaults(&mut oracle, &case.presets.defaults)
            .with_context(|| format!("invalid presets.defaults for {name}"))?;
        for (id, label) in &case.presets.instances {
            let outcome = parse_outcome(label)
                .with_context(|| format!("invalid preset for {id} in {name}"))?;
            oracle.set_instance(id.clone(), outcome);
        }

        let expect = case
            .expect
            .as_deref()
            .map(ExpectedVerdict::parse)
            .transpose()
            .with_context(|| format!("invalid expect for {name}"))?;

        if case.rule.trim().is_empty() {
            anyhow::bail!("case {name} has an empty rule id");
        }

        cases.push(ResolvedCase {
            name,
            description: case.description,
            policy: case.policy,
            rule_id: case.rule,
            kind,
            round,
            oracle,
            expect,
        });
    }

    Ok(ResolvedCases { profile, cases })
}

fn apply_defaults(
    oracle: &mut PresetOracle,
    defaults: &BTreeMap<String, String>,
) -> anyhow::Result<()> {
    for (category, label) in defaults {
        let category: Category = category.parse().with_context(|| {
            format!(
                "unknown category: {category} (expected one of {})",
                Category::ALL.map(Category::as_str).join(", ")
            )
        })?;
        let outcome =
            parse_outcome(label).with_context(|| format!("invalid default for {category}"))?;
        oracle.set_default(category, outcome);
    }
    Ok(())
}

fn parse_outcome(v: &str) -> anyhow::Result<Outcome> {
    Ok(v.parse::<Outcome>()?)
}

fn parse_round(v: &str) -> anyhow::Result<EvaluationRound> {
    match v.parse::<EvaluationRound>() {
        Ok(round) => Ok(round),
        Err(_) => anyhow::bail!("unknown round: {v} (expected '1' or '2')"),
    }
}
