use super::{ConstraintRelation, Evaluator};
use crate::error::EvalError;
use odrl_eval_types::{ActionExercisedState, Category, ConstraintState, TraceEntry, vocab};
use std::fmt;

/// The kind of node an action hangs off. Selects the oracle's category default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionRelation {
    Permission,
    Prohibition,
    Duty,
    Obligation,
    Remedy,
    Consequence,
}

impl ActionRelation {
    /// Relation-specific default category, if there is one.
    pub const fn category(self) -> Option<Category> {
        match self {
            ActionRelation::Permission => None,
            ActionRelation::Prohibition => Some(Category::ProhibitionAction),
            ActionRelation::Duty => Some(Category::DutyAction),
            ActionRelation::Obligation => Some(Category::ObligationAction),
            ActionRelation::Remedy => Some(Category::RemedyAction),
            ActionRelation::Consequence => Some(Category::ConsequenceAction),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ActionRelation::Permission => "Permission",
            ActionRelation::Prohibition => "Prohibition",
            ActionRelation::Duty => "Duty",
            ActionRelation::Obligation => "Obligation",
            ActionRelation::Remedy => "Remedy",
            ActionRelation::Consequence => "Consequence",
        }
    }
}

impl fmt::Display for ActionRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Evaluator<'_> {
    /// Decides whether the action of `subject` has been exercised.
    ///
    /// Unsatisfied action refinements make the action `NotExisting`; a missing `action`
    /// relation is an error.
    pub fn evaluate_action_exercised(
        &mut self,
        subject: &str,
        relation: ActionRelation,
    ) -> ActionExercisedState {
        let Some(action) = self.graph.first_object(subject, vocab::ACTION) else {
            self.fail(&EvalError::MissingReference {
                subject: subject.to_string(),
                relation: vocab::compact(vocab::ACTION),
            });
            return ActionExercisedState::Error;
        };

        self.note(TraceEntry::next_step(format!(
            "Evaluation of the refinements of Action '{action}' ({relation})"
        )));
        match self.evaluate_constraint_set(&action, ConstraintRelation::Refinement) {
            ConstraintState::NotSatisfied => {
                self.note(TraceEntry::result(format!(
                    "Action '{action}' of {relation} '{subject}', status = {} (refinement not satisfied)",
                    ActionExercisedState::NotExisting
                )));
                return ActionExercisedState::NotExisting;
            }
            ConstraintState::Error => return ActionExercisedState::Error,
            ConstraintState::Satisfied | ConstraintState::NotExisting => {}
        }

        let mut categories = Vec::with_capacity(2);
        categories.extend(relation.category());
        categories.push(Category::Action);

        match self.lookup(&action, &categories) {
            Ok((outcome, source)) => {
                let state = ActionExercisedState::from(outcome);
                self.note(TraceEntry::result(format!(
                    "Action '{action}' of {relation} '{subject}', status = {state} ({source})"
                )));
                state
            }
            Err(err) => {
                self.fail(&err);
                ActionExercisedState::Error
            }
        }
    }
}
