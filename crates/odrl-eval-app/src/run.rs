//! The `run` use case: resolve the case file, load policy graphs, evaluate every case.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use odrl_eval_domain::{EvaluationContext, PolicyGraph, Trace, TraceSink, evaluate_rule};
use odrl_eval_graph::LoadedPolicy;
use odrl_eval_settings::{Overrides, ResolvedCase};
use odrl_eval_types::{CaseReport, Expectation, SCHEMA_CASE_REPORT_V1, ToolMeta, TraceEntry};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Input for the run use case.
#[derive(Clone, Debug)]
pub struct RunInput<'a> {
    /// Directory that `policy` paths in the case file are relative to.
    pub base_dir: &'a Utf8Path,
    /// Case file contents.
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Case name globs; empty selects every case.
    pub select: Vec<String>,
}

/// Output from the run use case.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// Oracle profile the cases were resolved against.
    pub profile: String,
    /// One report per selected case, in case-name order.
    pub reports: Vec<CaseReport>,
}

pub fn run_cases(input: RunInput<'_>) -> anyhow::Result<RunOutput> {
    let cfg = odrl_eval_settings::parse_cases_toml(input.config_text).context("parse case file")?;
    let resolved = odrl_eval_settings::resolve_cases(cfg, input.overrides.clone())
        .context("resolve case file")?;

    let selector = build_selector(&input.select)?;
    let cases: Vec<ResolvedCase> = resolved
        .cases
        .into_iter()
        .filter(|case| selector.as_ref().is_none_or(|set| set.is_match(&case.name)))
        .collect();
    if cases.is_empty() && !input.select.is_empty() {
        anyhow::bail!("no case matches {}", input.select.join(", "));
    }

    let graphs = load_graphs(input.base_dir, &cases)?;

    let reports = cases
        .par_iter()
        .map(|case| {
            let policy = graphs
                .get(&case.policy)
                .with_context(|| format!("policy graph not loaded: {}", case.policy))?;
            evaluate_case(case, policy)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(RunOutput {
        profile: resolved.profile,
        reports,
    })
}

/// 0 when every expectation matched (or none was given), 2 otherwise.
pub fn exit_code(reports: &[CaseReport]) -> i32 {
    if reports.iter().all(CaseReport::passed) {
        0
    } else {
        2
    }
}

/// Hex SHA-256 over the trace lines joined by `\n`.
pub fn trace_digest(lines: &[String]) -> String {
    let mut hasher = Sha256::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(line.as_bytes());
    }
    hex::encode(hasher.finalize())
}

fn build_selector(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid case glob: {pattern}"))?;
        builder.add(glob);
    }
    Ok(Some(builder.build().context("compile case globset")?))
}

/// Loads each distinct policy file once.
fn load_graphs(
    base_dir: &Utf8Path,
    cases: &[ResolvedCase],
) -> anyhow::Result<BTreeMap<String, LoadedPolicy>> {
    let mut graphs = BTreeMap::new();
    for case in cases {
        if graphs.contains_key(&case.policy) {
            continue;
        }
        let path: Utf8PathBuf = base_dir.join(&case.policy);
        let policy = odrl_eval_graph::load_policy_graph(&path)
            .with_context(|| format!("load policy for case {}", case.name))?;
        graphs.insert(case.policy.clone(), policy);
    }
    Ok(graphs)
}

fn evaluate_case(case: &ResolvedCase, policy: &LoadedPolicy) -> anyhow::Result<CaseReport> {
    let started_at = OffsetDateTime::now_utc();

    let ctx = EvaluationContext::new(&case.oracle, case.round);
    let mut trace = Trace::new();
    trace.record(TraceEntry::msg(format!(
        "{} policy '{}' read and parsed, {} statements",
        policy.format,
        case.policy,
        policy.graph.len()
    )));
    let store: &dyn PolicyGraph = &policy.graph;
    let outcome = evaluate_rule(Some(store), &case.rule_id, case.kind, &mut trace, &ctx)
        .with_context(|| format!("case {}: evaluate {}", case.name, case.rule_id))?;

    let finished_at = OffsetDateTime::now_utc();

    let verdict = outcome.report();
    let expectation = case.expect.as_ref().map(|expected| Expectation {
        expected: expected.to_string(),
        matched: expected.matches(&verdict),
    });
    let trace_digest = trace_digest(&trace.lines());

    tracing::info!(
        case = %case.name,
        kind = %outcome.kind(),
        verdict = %verdict.label(),
        matched = expectation.as_ref().map(|e| e.matched),
        "case evaluated"
    );

    Ok(CaseReport {
        schema: SCHEMA_CASE_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "odrl-eval".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        case: case.name.clone(),
        description: case.description.clone(),
        policy: case.policy.clone(),
        rule_id: case.rule_id.clone(),
        rule_kind: outcome.kind(),
        round: case.round,
        started_at,
        finished_at,
        verdict,
        expectation,
        trace: trace.into_entries(),
        trace_digest,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use odrl_eval_types::{AbortReason, RuleKind, VerdictStatus};

    pub(crate) const POLICY: &str = "\
# permission with one duty, prohibition with one remedy, obligation with a consequence
<urn:policy> <http://www.w3.org/ns/odrl/2/permission> <urn:perm> .
<urn:perm> <http://www.w3.org/ns/odrl/2/action> <urn:use> .
<urn:perm> <http://www.w3.org/ns/odrl/2/duty> <urn:duty> .
<urn:duty> <http://www.w3.org/ns/odrl/2/action> <urn:pay> .
<urn:policy> <http://www.w3.org/ns/odrl/2/prohibition> <urn:prohib> .
<urn:prohib> <http://www.w3.org/ns/odrl/2/action> <urn:share> .
<urn:prohib> <http://www.w3.org/ns/odrl/2/remedy> <urn:remedy> .
<urn:remedy> <http://www.w3.org/ns/odrl/2/action> <urn:delete> .
<urn:policy> <http://www.w3.org/ns/odrl/2/obligation> <urn:oblig> .
<urn:oblig> <http://www.w3.org/ns/odrl/2/action> <urn:report> .
<urn:oblig> <http://www.w3.org/ns/odrl/2/consequence> <urn:fine> .
<urn:fine> <http://www.w3.org/ns/odrl/2/action> <urn:compensate> .
<urn:policy> <http://www.w3.org/ns/odrl/2/permission> <urn:bare> .
";

    pub(crate) const CASES: &str = r#"
schema = "odrl-eval.cases.v1"

[defaults]
action = "Exercised"

[cases.perm-allowed]
policy = "policy.nt"
rule = "urn:perm"
expect = "Allowed"

[cases.perm-missing-action]
policy = "policy.nt"
rule = "urn:bare"
expect = "aborted:missing_action"

[cases.prohib-violated]
policy = "policy.nt"
rule = "urn:prohib"
expect = "Violated"
[cases.prohib-violated.presets.instances]
"urn:delete" = "Not-Exercised"

[cases.oblig-round2]
policy = "policy.nt"
rule = "urn:oblig"
round = "2"
expect = "Fulfilled"
[cases.oblig-round2.presets.instances]
"urn:report" = "Not-Exercised"
"#;

    pub(crate) fn workspace(policy: &str) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::write(tmp.path().join("policy.nt"), policy).expect("write policy");
        tmp
    }

    fn run(config_text: &str, select: &[&str]) -> anyhow::Result<RunOutput> {
        let tmp = workspace(POLICY);
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        run_cases(RunInput {
            base_dir: root,
            config_text,
            overrides: Overrides::default(),
            select: select.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn runs_every_case_in_name_order() {
        let output = run(CASES, &[]).expect("run");
        let names: Vec<&str> = output.reports.iter().map(|r| r.case.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "oblig-round2",
                "perm-allowed",
                "perm-missing-action",
                "prohib-violated"
            ]
        );
        assert_eq!(output.profile, "blank");
        assert!(output.reports.iter().all(CaseReport::passed));
        assert_eq!(exit_code(&output.reports), 0);
    }

    #[test]
    fn report_carries_kind_verdict_and_trace() {
        let output = run(CASES, &["perm-missing-action"]).expect("run");
        let report = &output.reports[0];
        assert_eq!(report.rule_kind, RuleKind::Permission);
        assert_eq!(report.verdict.status, VerdictStatus::Aborted);
        assert_eq!(
            report.verdict.abort.as_ref().map(|a| a.reason),
            Some(AbortReason::MissingAction)
        );
        assert_eq!(
            report.trace[0].to_string(),
            "MSG: N-Triples policy 'policy.nt' read and parsed, 13 statements"
        );
        assert_eq!(report.trace[1].to_string(), "TESTRESULT: inferred sub-class = permission");
        assert_eq!(report.trace_digest.len(), 64);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn digest_is_stable_across_runs() {
        let a = run(CASES, &["oblig-*"]).expect("run");
        let b = run(CASES, &["oblig-*"]).expect("run");
        assert_eq!(a.reports[0].trace_digest, b.reports[0].trace_digest);
    }

    #[test]
    fn mismatch_yields_exit_code_two() {
        let cases = CASES.replace(r#"expect = "Violated""#, r#"expect = "Not-Violated""#);
        let output = run(&cases, &[]).expect("run");
        let report = output
            .reports
            .iter()
            .find(|r| r.case == "prohib-violated")
            .expect("case");
        assert!(!report.passed());
        assert_eq!(exit_code(&output.reports), 2);
    }

    #[test]
    fn round_override_beats_case_round() {
        let tmp = workspace(POLICY);
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let output = run_cases(RunInput {
            base_dir: root,
            config_text: CASES,
            overrides: Overrides {
                profile: None,
                round: Some("1".to_string()),
            },
            select: vec!["oblig-round2".to_string()],
        })
        .expect("run");
        assert_eq!(output.reports[0].verdict.label(), "Not-Fulfilled");
        assert_eq!(exit_code(&output.reports), 2);
    }

    #[test]
    fn unmatched_selection_is_an_error() {
        let err = run(CASES, &["nothing-*"]).expect_err("should fail");
        assert!(format!("{err:#}").contains("no case matches"));
    }

    #[test]
    fn unclassified_rule_fails_the_run_naming_the_case() {
        let cases = r#"
[cases.ghost]
policy = "policy.nt"
rule = "urn:ghost"
"#;
        let err = run(cases, &[]).expect_err("should fail");
        let msg = format!("{err:#}");
        assert!(msg.contains("case ghost"), "{msg}");
    }

    #[test]
    fn missing_policy_file_names_the_case() {
        let cases = r#"
[cases.lost]
policy = "missing.nt"
rule = "urn:perm"
"#;
        let err = run(cases, &[]).expect_err("should fail");
        assert!(format!("{err:#}").contains("load policy for case lost"));
    }

    #[test]
    fn trace_digest_of_nothing_is_sha256_of_empty_input() {
        assert_eq!(
            trace_digest(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
