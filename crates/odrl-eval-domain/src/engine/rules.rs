use super::{ActionRelation, ConstraintRelation, DutyRelation, Evaluator};
use crate::verdict::{Abort, RuleVerdict};
use odrl_eval_types::{
    AbortReason, ActionExercisedState, ConstraintState, DutyState, EvaluationRound, Outcome,
    PermissionState, ProhibitionState, TraceEntry, vocab,
};
use std::fmt;

/// Early exit from a rule evaluator.
enum Stop {
    Aborted(Abort),
    Error,
}

impl Stop {
    fn abort(reason: AbortReason, subject: &str) -> Self {
        Stop::Aborted(Abort::new(reason, subject))
    }

    fn into_verdict<S: From<Outcome>>(self) -> RuleVerdict<S> {
        match self {
            Stop::Aborted(abort) => RuleVerdict::Aborted(abort),
            Stop::Error => RuleVerdict::error(),
        }
    }
}

fn settle<S: From<Outcome>>(steps: Result<S, Stop>) -> RuleVerdict<S> {
    match steps {
        Ok(state) => RuleVerdict::Decided(state),
        Err(stop) => stop.into_verdict(),
    }
}

impl Evaluator<'_> {
    pub fn permission(&mut self, rule: &str) -> RuleVerdict<PermissionState> {
        self.note(TraceEntry::next_step(format!(
            "Evaluation of Permission instance '{rule}'"
        )));
        let steps = self.permission_steps(rule);
        let verdict = settle(steps);
        self.conclude("Permission", rule, &verdict);
        verdict
    }

    fn permission_steps(&mut self, rule: &str) -> Result<PermissionState, Stop> {
        self.gate(rule)?;
        let action = self.rule_action(rule)?;

        match self.evaluate_constraint_set(&action, ConstraintRelation::Refinement) {
            ConstraintState::NotSatisfied => {
                return Err(Stop::abort(AbortReason::ActionRefinementNotSatisfied, &action));
            }
            ConstraintState::Error => return Err(Stop::Error),
            ConstraintState::Satisfied | ConstraintState::NotExisting => {}
        }

        self.note(TraceEntry::next_step(format!(
            "Evaluation of the duties of Permission '{rule}' (round {})",
            self.round.as_str()
        )));
        Ok(match self.evaluate_all_duties(rule) {
            DutyState::Fulfilled | DutyState::NotExisting => PermissionState::Allowed,
            DutyState::NotFulfilled => PermissionState::NotAllowed,
            DutyState::Error => PermissionState::Error,
        })
    }

    pub fn prohibition(&mut self, rule: &str) -> RuleVerdict<ProhibitionState> {
        self.note(TraceEntry::next_step(format!(
            "Evaluation of Prohibition instance '{rule}'"
        )));
        let steps = self.prohibition_steps(rule);
        let verdict = settle(steps);
        self.conclude("Prohibition", rule, &verdict);
        verdict
    }

    fn prohibition_steps(&mut self, rule: &str) -> Result<ProhibitionState, Stop> {
        self.gate(rule)?;
        let action = self.rule_action(rule)?;

        match self.evaluate_action_exercised(rule, ActionRelation::Prohibition) {
            ActionExercisedState::NotExercised => return Ok(ProhibitionState::NotViolated),
            ActionExercisedState::NotExisting => {
                return Err(Stop::abort(AbortReason::ActionNotExisting, &action));
            }
            ActionExercisedState::Error => return Err(Stop::Error),
            ActionExercisedState::Exercised => {}
        }

        self.note(TraceEntry::next_step(format!(
            "Evaluation of the remedies of Prohibition '{rule}'"
        )));
        Ok(match self.evaluate_all_remedies(rule) {
            DutyState::Fulfilled | DutyState::NotExisting => ProhibitionState::NotViolated,
            DutyState::NotFulfilled => ProhibitionState::Violated,
            DutyState::Error => ProhibitionState::Error,
        })
    }

    /// An obligation is a duty evaluated on its own; round 2 includes its consequences.
    pub fn obligation(&mut self, rule: &str, round: EvaluationRound) -> RuleVerdict<DutyState> {
        self.note(TraceEntry::next_step(format!(
            "Evaluation of Obligation instance '{rule}' (round {})",
            round.as_str()
        )));
        let state = self.evaluate_duty(rule, round.evaluates_consequences(), DutyRelation::Obligation);
        let verdict = RuleVerdict::Decided(state);
        self.conclude("Obligation", rule, &verdict);
        verdict
    }

    /// Rule constraints, then target refinements, then assignee refinements.
    fn gate(&mut self, rule: &str) -> Result<(), Stop> {
        match self.evaluate_constraint_set(rule, ConstraintRelation::Constraint) {
            ConstraintState::NotSatisfied => {
                return Err(Stop::abort(AbortReason::ConstraintsNotSatisfied, rule));
            }
            ConstraintState::Error => return Err(Stop::Error),
            ConstraintState::Satisfied | ConstraintState::NotExisting => {}
        }

        let parties = [
            (vocab::TARGET, AbortReason::TargetRefinementNotSatisfied),
            (vocab::ASSIGNEE, AbortReason::AssigneeRefinementNotSatisfied),
        ];
        for (party, reason) in parties {
            match self.evaluate_party_refinements(rule, party) {
                ConstraintState::NotSatisfied => {
                    let subject = self.graph.first_object(rule, party);
                    return Err(Stop::abort(reason, subject.as_deref().unwrap_or(rule)));
                }
                ConstraintState::Error => return Err(Stop::Error),
                ConstraintState::Satisfied | ConstraintState::NotExisting => {}
            }
        }
        Ok(())
    }

    fn rule_action(&mut self, rule: &str) -> Result<String, Stop> {
        match self.graph.first_object(rule, vocab::ACTION) {
            Some(action) => Ok(action),
            None => {
                self.note(TraceEntry::error(format!(
                    "'{rule}' has no '{}' relation, the policy is invalid",
                    vocab::compact(vocab::ACTION)
                )));
                Err(Stop::abort(AbortReason::MissingAction, rule))
            }
        }
    }

    fn conclude<S: fmt::Display>(&mut self, kind: &str, rule: &str, verdict: &RuleVerdict<S>) {
        let line = match verdict {
            RuleVerdict::Decided(state) => {
                format!("Evaluation of the full {kind} instance '{rule}', status = {state}")
            }
            RuleVerdict::Aborted(abort) => format!(
                "Evaluation of the {kind} instance '{rule}' aborted: {} at '{}'",
                abort.reason, abort.subject
            ),
        };
        self.note(TraceEntry::result(line));
    }
}
