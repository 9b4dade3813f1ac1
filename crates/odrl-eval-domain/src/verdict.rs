use odrl_eval_types::{AbortReason, Outcome, VerdictReport};

/// Why a rule stopped at a gate, and on which node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Abort {
    pub reason: AbortReason,
    pub subject: String,
}

impl Abort {
    pub fn new(reason: AbortReason, subject: impl Into<String>) -> Self {
        Self {
            reason,
            subject: subject.into(),
        }
    }
}

/// Terminal result of a rule evaluator. Every exit path produces one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleVerdict<S> {
    Decided(S),
    Aborted(Abort),
}

impl<S: Copy> RuleVerdict<S> {
    pub fn state(&self) -> Option<S> {
        match self {
            RuleVerdict::Decided(s) => Some(*s),
            RuleVerdict::Aborted(_) => None,
        }
    }

    pub fn abort(&self) -> Option<&Abort> {
        match self {
            RuleVerdict::Decided(_) => None,
            RuleVerdict::Aborted(a) => Some(a),
        }
    }
}

macro_rules! verdict_report {
    ($($state:ty),+) => {
        $(
            impl From<&RuleVerdict<$state>> for VerdictReport {
                fn from(v: &RuleVerdict<$state>) -> Self {
                    match v {
                        RuleVerdict::Decided(s) => VerdictReport::decided(s.label(), s.outcome()),
                        RuleVerdict::Aborted(a) => VerdictReport::aborted(a.reason, a.subject.clone()),
                    }
                }
            }
        )+
    };
}

verdict_report!(
    odrl_eval_types::PermissionState,
    odrl_eval_types::ProhibitionState,
    odrl_eval_types::DutyState
);

impl<S> RuleVerdict<S>
where
    S: From<Outcome>,
{
    pub(crate) fn error() -> Self {
        RuleVerdict::Decided(S::from(Outcome::Error))
    }
}
