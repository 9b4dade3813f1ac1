//! The `list` use case: show the resolved cases without evaluating them.

use anyhow::Context;
use odrl_eval_settings::Overrides;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseListing {
    pub name: String,
    pub rule_id: String,
    /// `None` when the kind is inferred at run time.
    pub kind: Option<String>,
    pub round: String,
    pub expect: Option<String>,
    pub policy: String,
}

impl CaseListing {
    /// Tab-separated: name, rule, kind (or `auto`), round, expectation (or `-`).
    pub fn line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.name,
            self.rule_id,
            self.kind.as_deref().unwrap_or("auto"),
            self.round,
            self.expect.as_deref().unwrap_or("-")
        )
    }
}

pub fn list_cases(config_text: &str, overrides: Overrides) -> anyhow::Result<Vec<CaseListing>> {
    let cfg = odrl_eval_settings::parse_cases_toml(config_text).context("parse case file")?;
    let resolved =
        odrl_eval_settings::resolve_cases(cfg, overrides).context("resolve case file")?;
    Ok(resolved
        .cases
        .into_iter()
        .map(|case| CaseListing {
            name: case.name,
            rule_id: case.rule_id,
            kind: case.kind.map(|k| k.to_string()),
            round: case.round.to_string(),
            expect: case.expect.map(|e| e.to_string()),
            policy: case.policy,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_cases_sorted_with_resolved_round() {
        let text = r#"
round = "2"

[cases.b]
policy = "p.nt"
rule = "urn:b"
kind = "prohibition"
expect = "violated"

[cases.a]
policy = "p.nt"
rule = "urn:a"
round = "1"
"#;
        let cases = list_cases(text, Overrides::default()).expect("list");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].line(), "a\turn:a\tauto\t1\t-");
        assert_eq!(cases[1].line(), "b\turn:b\tprohibition\t2\tViolated");
    }

    #[test]
    fn invalid_case_file_is_an_error() {
        let err = list_cases("cases = 3", Overrides::default()).expect_err("should fail");
        assert!(format!("{err:#}").contains("parse case file"));
    }
}
