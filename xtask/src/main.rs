//! Repository maintenance tasks: JSON schemas, fixture conformance, explain coverage.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use odrl_eval_app::{RunInput, run_cases};
use odrl_eval_settings::Overrides;
use odrl_eval_test_util::normalize_nondeterministic;
use schemars::{Schema, schema_for};

const TASKS: &[(&str, &str)] = &[
    ("help", "Show this message"),
    ("emit-schemas", "Write the report and case file JSON schemas to schemas/"),
    ("validate-schemas", "Fail if schemas/ differs from the generated schemas"),
    ("print-schema-ids", "Print the schema identifiers"),
    ("conform", "Run every fixture case file twice and validate the reports"),
    ("explain-coverage", "Fail if a verdict label or abort code has no explanation"),
];

/// Generated schema files, keyed by file name under `schemas/`.
fn schemas() -> [(&'static str, Schema); 2] {
    [
        (
            "odrl-eval.case-report.v1.json",
            schema_for!(odrl_eval_types::CaseReport),
        ),
        (
            "odrl-eval.cases.v1.json",
            schema_for!(odrl_eval_settings::EvalCasesConfigV1),
        ),
    ]
}

/// Repository root: the parent of this crate's manifest directory.
fn repo_root() -> Utf8PathBuf {
    let manifest = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest.parent() {
        Some(root) if manifest.file_name() == Some("xtask") => root.to_path_buf(),
        _ => manifest,
    }
}

fn schema_json(schema: &Schema) -> anyhow::Result<String> {
    let text = serde_json::to_string_pretty(schema).context("serialize schema")?;
    Ok(text + "\n")
}

fn emit_schemas(root: &Utf8Path) -> anyhow::Result<()> {
    let dir = root.join("schemas");
    std::fs::create_dir_all(&dir).with_context(|| format!("create {dir}"))?;
    for (file, schema) in schemas() {
        let path = dir.join(file);
        std::fs::write(&path, schema_json(&schema)?).with_context(|| format!("write {path}"))?;
        println!("wrote {path}");
    }
    Ok(())
}

fn validate_schemas(root: &Utf8Path) -> anyhow::Result<()> {
    let dir = root.join("schemas");
    let mut stale = Vec::new();
    for (file, schema) in schemas() {
        let expected = schema_json(&schema)?;
        match std::fs::read_to_string(dir.join(file)) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{file}: out of date")),
            Err(_) => stale.push(format!("{file}: missing")),
        }
    }
    if !stale.is_empty() {
        for line in &stale {
            eprintln!("  - {line}");
        }
        bail!("{} schema(s) stale; run `cargo xtask emit-schemas`", stale.len());
    }
    println!("schemas up to date");
    Ok(())
}

/// Every `tests/fixtures/<name>/odrl-eval.toml`, sorted by fixture name.
fn fixture_case_files(root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let dir = root.join("tests/fixtures");
    let mut files = Vec::new();
    for entry in dir.read_dir_utf8().with_context(|| format!("read {dir}"))? {
        let path = entry.with_context(|| format!("read {dir}"))?.path().join("odrl-eval.toml");
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reports must validate against the generated schema and be identical across two runs once
/// versions and timestamps are masked. Fixtures that fail to run are reported and skipped.
fn conform(root: &Utf8Path) -> anyhow::Result<()> {
    let [(_, report_schema), _] = schemas();
    let schema_value = serde_json::to_value(&report_schema).context("serialize report schema")?;
    let validator = jsonschema::draft7::new(&schema_value)
        .map_err(|err| anyhow::anyhow!("compile report schema: {err}"))?;

    let mut problems = Vec::new();
    let mut checked = 0usize;
    for case_file in fixture_case_files(root)? {
        let Some(base_dir) = case_file.parent() else {
            continue;
        };
        let fixture = base_dir.file_name().unwrap_or(base_dir.as_str());
        let text =
            std::fs::read_to_string(&case_file).with_context(|| format!("read {case_file}"))?;
        let run = || {
            run_cases(RunInput {
                base_dir,
                config_text: &text,
                overrides: Overrides::default(),
                select: Vec::new(),
            })
        };

        let (first, second) = match (run(), run()) {
            (Ok(first), Ok(second)) => (first, second),
            (Err(err), _) | (_, Err(err)) => {
                println!("{fixture}: skipped ({err:#})");
                continue;
            }
        };

        for (a, b) in first.reports.iter().zip(&second.reports) {
            let a_json = serde_json::to_value(a).context("serialize report")?;
            problems.extend(
                validator
                    .iter_errors(&a_json)
                    .map(|err| format!("{fixture}/{}: {err}", a.case)),
            );
            let b_json = serde_json::to_value(b).context("serialize report")?;
            if normalize_nondeterministic(a_json) != normalize_nondeterministic(b_json) {
                problems.push(format!("{fixture}/{}: not reproducible", a.case));
            }
            checked += 1;
        }
        println!("{fixture}: {} cases", first.reports.len());
    }

    if !problems.is_empty() {
        for line in &problems {
            eprintln!("  - {line}");
        }
        bail!("{} conformance problem(s)", problems.len());
    }
    println!("{checked} case reports conform");
    Ok(())
}

fn explain_coverage() -> anyhow::Result<()> {
    use odrl_eval_types::explain::{all_abort_codes, all_labels, lookup_explanation};

    let ids = all_labels().iter().chain(all_abort_codes());
    let gaps: Vec<String> = ids
        .filter_map(|id| match lookup_explanation(id) {
            None => Some(format!("{id}: no explanation")),
            Some(exp) if exp.title.is_empty() || exp.description.is_empty() => {
                Some(format!("{id}: empty title or description"))
            }
            Some(exp) if exp.guidance.is_empty() => Some(format!("{id}: empty guidance")),
            Some(_) => None,
        })
        .collect();

    if !gaps.is_empty() {
        for line in &gaps {
            eprintln!("  - {line}");
        }
        bail!("{} identifier(s) lack explanations", gaps.len());
    }
    println!(
        "{} verdict labels and {} abort codes explained",
        all_labels().len(),
        all_abort_codes().len()
    );
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    for (name, about) in TASKS {
        eprintln!("  {name:<18}{about}");
    }
}

fn main() -> anyhow::Result<()> {
    let task = std::env::args().nth(1).unwrap_or_else(|| "help".to_string());
    let root = repo_root();

    match task.as_str() {
        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(&root),
        "validate-schemas" => validate_schemas(&root),
        "print-schema-ids" => {
            println!("{}", odrl_eval_types::SCHEMA_CASE_REPORT_V1);
            println!("{}", odrl_eval_types::ids::SCHEMA_CASES_V1);
            Ok(())
        }
        "conform" => conform(&root),
        "explain-coverage" => explain_coverage(),
        other => {
            print_help();
            bail!("unknown task: {other}")
        }
    }
    .with_context(|| format!("xtask {task}"))
}
