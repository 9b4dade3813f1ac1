//! The evaluation state algebra.
//!
//! Every evaluator returns one of five parallel four-valued enums. They share a fixed
//! precedence order: positive, negative, not-existing, error. `Outcome` is the common
//! carrier used by the oracle; each state converts from and to it explicitly so no call
//! site depends on the position of a variant.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a label, category, round or kind cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

/// Shared ternary-plus-error value.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Positive,
    Negative,
    NotExisting,
    Error,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Positive => "positive",
            Outcome::Negative => "negative",
            Outcome::NotExisting => "not-existing",
            Outcome::Error => "error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses any state label of any of the five enums (case-insensitive), plus the
/// generic `positive`/`negative` spellings.
impl FromStr for Outcome {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "satisfied" | "fulfilled" | "allowed" | "not-violated" | "exercised" => {
                Ok(Outcome::Positive)
            }
            "negative" | "not-satisfied" | "not-fulfilled" | "not-allowed" | "violated"
            | "not-exercised" => Ok(Outcome::Negative),
            "not-existing" => Ok(Outcome::NotExisting),
            "error" => Ok(Outcome::Error),
            _ => Err(ParseLabelError {
                kind: "outcome label",
                value: s.to_string(),
            }),
        }
    }
}

macro_rules! evaluation_state {
    (
        $(#[$meta:meta])*
        $name:ident {
            $pos:ident => $pos_label:tt,
            $neg:ident => $neg_label:tt $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            #[serde(rename = $pos_label)]
            $pos,
            #[serde(rename = $neg_label)]
            $neg,
            #[serde(rename = "Not-Existing")]
            NotExisting,
            #[serde(rename = "Error")]
            Error,
        }

        impl $name {
            pub const ALL: [$name; 4] = [$name::$pos, $name::$neg, $name::NotExisting, $name::Error];

            pub const fn label(self) -> &'static str {
                match self {
                    $name::$pos => $pos_label,
                    $name::$neg => $neg_label,
                    $name::NotExisting => "Not-Existing",
                    $name::Error => "Error",
                }
            }

            pub const fn outcome(self) -> Outcome {
                match self {
                    $name::$pos => Outcome::Positive,
                    $name::$neg => Outcome::Negative,
                    $name::NotExisting => Outcome::NotExisting,
                    $name::Error => Outcome::Error,
                }
            }

            pub const fn is_error(self) -> bool {
                matches!(self, $name::Error)
            }
        }

        impl From<Outcome> for $name {
            fn from(outcome: Outcome) -> Self {
                match outcome {
                    Outcome::Positive => $name::$pos,
                    Outcome::Negative => $name::$neg,
                    Outcome::NotExisting => $name::NotExisting,
                    Outcome::Error => $name::Error,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

evaluation_state! {
    /// State of a constraint, refinement, or a set of them.
    ConstraintState {
        Satisfied => "Satisfied",
        NotSatisfied => "Not-Satisfied",
    }
}

evaluation_state! {
    /// State of a duty, obligation, consequence, or remedy.
    DutyState {
        Fulfilled => "Fulfilled",
        NotFulfilled => "Not-Fulfilled",
    }
}

evaluation_state! {
    PermissionState {
        Allowed => "Allowed",
        NotAllowed => "Not-Allowed",
    }
}

evaluation_state! {
    ProhibitionState {
        NotViolated => "Not-Violated",
        Violated => "Violated",
    }
}

evaluation_state! {
    /// Whether the action referenced by a rule or duty was exercised.
    ///
    /// `NotExisting` means the action's refinements were not satisfied, so the action
    /// as described by the policy does not exist.
    ActionExercisedState {
        Exercised => "Exercised",
        NotExercised => "Not-Exercised",
    }
}

/// Oracle default categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Constraint,
    Refinement,
    Action,
    Duty,
    Consequence,
    ProhibitionAction,
    DutyAction,
    ObligationAction,
    RemedyAction,
    ConsequenceAction,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Constraint,
        Category::Refinement,
        Category::Action,
        Category::Duty,
        Category::Consequence,
        Category::ProhibitionAction,
        Category::DutyAction,
        Category::ObligationAction,
        Category::RemedyAction,
        Category::ConsequenceAction,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Constraint => "constraint",
            Category::Refinement => "refinement",
            Category::Action => "action",
            Category::Duty => "duty",
            Category::Consequence => "consequence",
            Category::ProhibitionAction => "prohibitionAction",
            Category::DutyAction => "dutyAction",
            Category::ObligationAction => "obligationAction",
            Category::RemedyAction => "remedyAction",
            Category::ConsequenceAction => "consequenceAction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Obligation evaluation round. Round 1 is informational, round 2 evaluates consequences.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum EvaluationRound {
    #[default]
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
}

impl EvaluationRound {
    pub const fn as_str(self) -> &'static str {
        match self {
            EvaluationRound::First => "1",
            EvaluationRound::Second => "2",
        }
    }

    pub const fn evaluates_consequences(self) -> bool {
        matches!(self, EvaluationRound::Second)
    }
}

impl fmt::Display for EvaluationRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationRound {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(EvaluationRound::First),
            "2" => Ok(EvaluationRound::Second),
            other => Err(ParseLabelError {
                kind: "round",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Permission,
    Prohibition,
    Obligation,
}

impl RuleKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleKind::Permission => "permission",
            RuleKind::Prohibition => "prohibition",
            RuleKind::Obligation => "obligation",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permission" => Ok(RuleKind::Permission),
            "prohibition" => Ok(RuleKind::Prohibition),
            "obligation" | "duty" => Ok(RuleKind::Obligation),
            _ => Err(ParseLabelError {
                kind: "rule kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Why a rule evaluation stopped before a verdict could be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    ConstraintsNotSatisfied,
    TargetRefinementNotSatisfied,
    AssigneeRefinementNotSatisfied,
    ActionRefinementNotSatisfied,
    MissingAction,
    ActionNotExisting,
}

impl AbortReason {
    pub const ALL: [AbortReason; 6] = [
        AbortReason::ConstraintsNotSatisfied,
        AbortReason::TargetRefinementNotSatisfied,
        AbortReason::AssigneeRefinementNotSatisfied,
        AbortReason::ActionRefinementNotSatisfied,
        AbortReason::MissingAction,
        AbortReason::ActionNotExisting,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            AbortReason::ConstraintsNotSatisfied => crate::ids::ABORT_CONSTRAINTS_NOT_SATISFIED,
            AbortReason::TargetRefinementNotSatisfied => {
                crate::ids::ABORT_TARGET_REFINEMENT_NOT_SATISFIED
            }
            AbortReason::AssigneeRefinementNotSatisfied => {
                crate::ids::ABORT_ASSIGNEE_REFINEMENT_NOT_SATISFIED
            }
            AbortReason::ActionRefinementNotSatisfied => {
                crate::ids::ABORT_ACTION_REFINEMENT_NOT_SATISFIED
            }
            AbortReason::MissingAction => crate::ids::ABORT_MISSING_ACTION,
            AbortReason::ActionNotExisting => crate::ids::ABORT_ACTION_NOT_EXISTING,
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AbortReason {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbortReason::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "abort reason",
                value: s.to_string(),
            })
    }
}
