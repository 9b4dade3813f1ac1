//! Trace entries: the ordered decision records of one evaluation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Informational message (start/close of a case, graph loaded, ...).
    Msg,
    /// A sub-decision or verdict.
    TestResult,
    /// A transition to the next evaluation step.
    NextStep,
    Error,
}

impl TraceKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            TraceKind::Msg => "MSG",
            TraceKind::TestResult => "TESTRESULT",
            TraceKind::NextStep => "NEXT STEP",
            TraceKind::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TraceEntry {
    pub kind: TraceKind,
    pub message: String,
}

impl TraceEntry {
    pub fn new(kind: TraceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(TraceKind::Msg, message)
    }

    pub fn result(message: impl Into<String>) -> Self {
        Self::new(TraceKind::TestResult, message)
    }

    pub fn next_step(message: impl Into<String>) -> Self {
        Self::new(TraceKind::NextStep, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(TraceKind::Error, message)
    }
}

/// Renders the classic one-line form: `TESTRESULT: <message>`.
impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.prefix(), self.message)
    }
}
