use crate::{RenderableCaseStatus, RenderableSummary};

pub fn render_markdown(summary: &RenderableSummary) -> String {
    let mut out = String::new();

    out.push_str("# odrl-eval summary\n\n");

    let count = |status| summary.cases.iter().filter(|c| c.status == status).count();
    let passed = count(RenderableCaseStatus::Pass);
    let mismatched = count(RenderableCaseStatus::Mismatch);
    let unchecked = count(RenderableCaseStatus::Unchecked);
    let result = if mismatched > 0 { "FAIL" } else { "PASS" };

    out.push_str(&format!("- Result: **{result}**\n"));
    out.push_str(&format!(
        "- Cases: {} ({passed} passed, {mismatched} mismatched, {unchecked} without expectation)\n",
        summary.cases.len()
    ));
    if let Some(profile) = &summary.profile {
        out.push_str(&format!("- Profile: `{profile}`\n"));
    }
    out.push('\n');

    if summary.cases.is_empty() {
        out.push_str("No cases.\n");
        return out;
    }

    out.push_str("| Case | Rule | Kind | Round | Verdict | Expected | Result |\n");
    out.push_str("|---|---|---|---|---|---|---|\n");
    for case in &summary.cases {
        let status = match case.status {
            RenderableCaseStatus::Pass => "ok",
            RenderableCaseStatus::Mismatch => "MISMATCH",
            RenderableCaseStatus::Unchecked => "-",
        };
        out.push_str(&format!(
            "| `{}` | `{}` | {} | {} | {} | {} | {} |\n",
            case.name,
            case.rule_id,
            case.kind,
            case.round,
            case.verdict,
            case.expected.as_deref().unwrap_or("-"),
            status
        ));
    }

    out
}
