use crate::{AbortReason, EvaluationRound, Outcome, RuleKind, TraceEntry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for per-case reports.
pub const SCHEMA_CASE_REPORT_V1: &str = "odrl-eval.case-report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// The rule evaluation produced a state.
    Decided,
    /// The rule evaluation stopped at a gate; see `abort`.
    Aborted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AbortReport {
    pub reason: AbortReason,
    /// Node whose relation caused the abort (rule, target, assignee, or action).
    pub subject: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictReport {
    pub status: VerdictStatus,

    /// State label of the rule kind (`Allowed`, `Violated`, `Fulfilled`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort: Option<AbortReport>,
}

impl VerdictReport {
    pub fn decided(state: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            status: VerdictStatus::Decided,
            state: Some(state.into()),
            outcome: Some(outcome),
            abort: None,
        }
    }

    pub fn aborted(reason: AbortReason, subject: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Aborted,
            state: None,
            outcome: None,
            abort: Some(AbortReport {
                reason,
                subject: subject.into(),
            }),
        }
    }

    /// Short human label: the state label, or `aborted:<code>`.
    pub fn label(&self) -> String {
        match (&self.state, &self.abort) {
            (Some(state), _) => state.clone(),
            (None, Some(abort)) => format!("aborted:{}", abort.reason.code()),
            (None, None) => "aborted".to_string(),
        }
    }
}

/// Result of comparing the verdict against the case's `expect` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Expectation {
    pub expected: String,
    pub matched: bool,
}

/// One evaluated case: which rule, which verdict, and the full decision trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CaseReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub case: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Policy file the graph was loaded from, as written in the case file.
    pub policy: String,
    pub rule_id: String,
    pub rule_kind: RuleKind,
    pub round: EvaluationRound,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,

    pub verdict: VerdictReport,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expectation: Option<Expectation>,

    pub trace: Vec<TraceEntry>,

    /// Hex SHA-256 over the rendered trace lines. Stable for a given graph and presets.
    pub trace_digest: String,
}

impl CaseReport {
    /// `false` only when an expectation exists and did not match.
    pub fn passed(&self) -> bool {
        self.expectation.as_ref().is_none_or(|e| e.matched)
    }
}
