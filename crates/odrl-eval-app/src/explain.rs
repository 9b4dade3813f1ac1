//! The `explain` use case: documentation for verdict labels and abort codes.

use odrl_eval_types::explain::{self, Explanation};
use std::fmt::Write as _;

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Carries what the registry does know so the caller can list it.
    NotFound {
        identifier: String,
        available_labels: &'static [&'static str],
        available_abort_codes: &'static [&'static str],
    },
}

/// Accepts labels in any case and abort codes with or without the `aborted:` prefix.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    explain::lookup_explanation(identifier).map_or_else(
        || ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_labels: explain::all_labels(),
            available_abort_codes: explain::all_abort_codes(),
        },
        ExplainOutput::Found,
    )
}

pub fn format_explanation(exp: &Explanation) -> String {
    let underline = "=".repeat(exp.title.len());
    format!(
        "{title}\n{underline}\n\n{description}\n\nGuidance\n--------\n{guidance}\n",
        title = exp.title,
        description = exp.description,
        guidance = exp.guidance,
    )
}

pub fn format_not_found(identifier: &str, labels: &[&'static str], codes: &[&'static str]) -> String {
    let mut out = format!("Unknown verdict label or abort code: {identifier}\n");
    for (heading, ids) in [("verdict labels", labels), ("abort codes", codes)] {
        let _ = writeln!(out, "\nAvailable {heading}:");
        for id in ids {
            let _ = writeln!(out, "  - {id}");
        }
    }
    out
}
