//! Case report serialization and the per-case output files.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use odrl_eval_types::{CaseReport, SCHEMA_CASE_REPORT_V1};

pub fn parse_report_json(text: &str) -> anyhow::Result<CaseReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_CASE_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_CASE_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse case report")
}

pub fn serialize_report(report: &CaseReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize case report")
}

/// `<case>.report.json`, with path-hostile characters replaced.
pub fn report_file_name(case: &str) -> String {
    format!("{}.report.json", file_stem(case))
}

/// `CASE_<case>_log.txt`, with path-hostile characters replaced.
pub fn case_log_file_name(case: &str) -> String {
    format!("CASE_{}_log.txt", file_stem(case))
}

fn file_stem(case: &str) -> String {
    case.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn write_report(path: &Utf8Path, report: &CaseReport) -> anyhow::Result<()> {
    let bytes = serialize_report(report)?;
    write_bytes(path, &bytes)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}

/// Writes the JSON report and the text log of every case into `out_dir`.
///
/// Returns the written paths, report then log for each case.
pub fn write_case_outputs(
    out_dir: &Utf8Path,
    reports: &[CaseReport],
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut written = Vec::with_capacity(reports.len() * 2);
    for report in reports {
        let report_path = out_dir.join(report_file_name(&report.case));
        write_report(&report_path, report)?;

        let log_path = out_dir.join(case_log_file_name(&report.case));
        let log = crate::render::render_case_log(report);
        write_text(&log_path, &log)?;

        tracing::debug!(case = %report.case, path = %report_path, "case outputs written");
        written.push(report_path);
        written.push(log_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::tests::{CASES, POLICY, workspace};
    use crate::{RunInput, run_cases};
    use odrl_eval_settings::Overrides;

    fn sample_reports() -> Vec<CaseReport> {
        let tmp = workspace(POLICY);
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        run_cases(RunInput {
            base_dir: root,
            config_text: CASES,
            overrides: Overrides::default(),
            select: Vec::new(),
        })
        .expect("run")
        .reports
    }

    #[test]
    fn serialized_report_parses_back() {
        let report = sample_reports().remove(0);
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains(r#""schema": "odrl-eval.case-report.v1""#));

        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed, report);
    }

    #[test]
    fn parse_rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema":"odrl-eval.cases.v1"}"#).expect_err("reject");
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(parse_report_json("not json").is_err());
    }

    #[test]
    fn file_names_replace_path_separators() {
        assert_eq!(report_file_name("imex13-1"), "imex13-1.report.json");
        assert_eq!(case_log_file_name("a/b c"), "CASE_a_b_c_log.txt");
    }

    #[test]
    fn writes_report_and_log_per_case() {
        let reports = sample_reports();
        let tmp = tempfile::tempdir().expect("create temp dir");
        let out = Utf8Path::from_path(tmp.path())
            .expect("utf8 path")
            .join("nested/out");

        let written = write_case_outputs(&out, &reports).expect("write");
        assert_eq!(written.len(), reports.len() * 2);

        let log = std::fs::read_to_string(out.join("CASE_perm-allowed_log.txt")).expect("read");
        assert!(log.starts_with(" START with test case: perm-allowed  -- on/at "));
        assert!(log.contains(
            " TESTRESULT: Evaluation of the full Permission instance 'urn:perm', status = Allowed\n"
        ));
        let last = log.lines().last().expect("closing line");
        assert!(last.starts_with(" CLOSING test case: perm-allowed  -- on/at "));

        let json = std::fs::read_to_string(out.join("perm-allowed.report.json")).expect("read");
        let parsed = parse_report_json(&json).expect("parse");
        assert_eq!(parsed.verdict.label(), "Allowed");
    }
}
