use super::{ActionRelation, ConstraintRelation, Evaluator};
use odrl_eval_types::{ActionExercisedState, ConstraintState, DutyState, TraceEntry, vocab};

/// The relation through which a duty-shaped node was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DutyRelation {
    Duty,
    Obligation,
    Remedy,
    Consequence,
}

impl DutyRelation {
    pub const fn action_relation(self) -> ActionRelation {
        match self {
            DutyRelation::Duty => ActionRelation::Duty,
            DutyRelation::Obligation => ActionRelation::Obligation,
            DutyRelation::Remedy => ActionRelation::Remedy,
            DutyRelation::Consequence => ActionRelation::Consequence,
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.action_relation().as_str()
    }
}

impl Evaluator<'_> {
    pub fn evaluate_duty(
        &mut self,
        duty: &str,
        eval_consequences: bool,
        relation: DutyRelation,
    ) -> DutyState {
        let kind = relation.as_str();
        self.note(TraceEntry::next_step(format!(
            "Evaluation of {kind} instance '{duty}' (consequences {})",
            if eval_consequences { "included" } else { "excluded" }
        )));

        match self.evaluate_constraint_set(duty, ConstraintRelation::Constraint) {
            ConstraintState::NotSatisfied => {
                let why = "constraints not satisfied";
                return self.duty_result(duty, relation, DutyState::NotExisting, why);
            }
            ConstraintState::Error => return DutyState::Error,
            ConstraintState::Satisfied | ConstraintState::NotExisting => {}
        }

        for (party, label) in [(vocab::TARGET, "target"), (vocab::ASSIGNEE, "assignee")] {
            match self.evaluate_party_refinements(duty, party) {
                ConstraintState::NotSatisfied => {
                    let why = format!("{label} refinement not satisfied");
                    return self.duty_result(duty, relation, DutyState::NotExisting, &why);
                }
                ConstraintState::Error => return DutyState::Error,
                ConstraintState::Satisfied | ConstraintState::NotExisting => {}
            }
        }

        match self.evaluate_action_exercised(duty, relation.action_relation()) {
            ActionExercisedState::Exercised => {
                self.duty_result(duty, relation, DutyState::Fulfilled, "action exercised")
            }
            ActionExercisedState::NotExercised if !eval_consequences => {
                self.duty_result(duty, relation, DutyState::NotFulfilled, "action not exercised")
            }
            ActionExercisedState::NotExercised => {
                let state = self.evaluate_consequences(duty);
                self.duty_result(duty, relation, state, "action not exercised, consequences evaluated")
            }
            ActionExercisedState::NotExisting => {
                self.duty_result(duty, relation, DutyState::Error, "action does not exist")
            }
            ActionExercisedState::Error => DutyState::Error,
        }
    }

    fn evaluate_consequences(&mut self, duty: &str) -> DutyState {
        let consequences = self.graph.objects(duty, vocab::CONSEQUENCE);
        if consequences.is_empty() {
            self.note(TraceEntry::result(format!(
                "No consequences of '{duty}', status = {}",
                DutyState::NotFulfilled
            )));
            return DutyState::NotFulfilled;
        }

        let mut fulfilled = false;
        for consequence in &consequences {
            match self.evaluate_duty(consequence, false, DutyRelation::Consequence) {
                DutyState::NotFulfilled => return DutyState::NotFulfilled,
                DutyState::Error => return DutyState::Error,
                DutyState::Fulfilled => fulfilled = true,
                DutyState::NotExisting => {}
            }
        }
        if fulfilled {
            DutyState::Fulfilled
        } else {
            DutyState::NotExisting
        }
    }

    /// Refinements of every `target` or `assignee` of `subject`.
    ///
    /// The first party that is not satisfied decides. Without any party, or when no party
    /// carries refinements, the result is `NotExisting`.
    pub(super) fn evaluate_party_refinements(&mut self, subject: &str, party: &str) -> ConstraintState {
        let parties = self.graph.objects(subject, party);
        let mut any_satisfied = false;
        for node in &parties {
            match self.evaluate_constraint_set(node, ConstraintRelation::Refinement) {
                state @ (ConstraintState::NotSatisfied | ConstraintState::Error) => return state,
                ConstraintState::Satisfied => any_satisfied = true,
                ConstraintState::NotExisting => {}
            }
        }
        if any_satisfied {
            ConstraintState::Satisfied
        } else {
            ConstraintState::NotExisting
        }
    }

    /// All `duty` children of a permission.
    pub fn evaluate_all_duties(&mut self, rule: &str) -> DutyState {
        let eval_consequences = self.round.evaluates_consequences();
        self.evaluate_duty_children(rule, vocab::DUTY, DutyRelation::Duty, eval_consequences)
    }

    /// All `remedy` children of a prohibition. Remedies never evaluate consequences.
    pub fn evaluate_all_remedies(&mut self, rule: &str) -> DutyState {
        self.evaluate_duty_children(rule, vocab::REMEDY, DutyRelation::Remedy, false)
    }

    fn evaluate_duty_children(
        &mut self,
        rule: &str,
        predicate: &str,
        relation: DutyRelation,
        eval_consequences: bool,
    ) -> DutyState {
        let children = self.graph.objects(rule, predicate);
        let kind = relation.as_str();
        if children.is_empty() {
            self.note(TraceEntry::result(format!(
                "No {kind} instances of '{rule}', status = {}",
                DutyState::NotExisting
            )));
            return DutyState::NotExisting;
        }

        for child in &children {
            match self.evaluate_duty(child, eval_consequences, relation) {
                state @ (DutyState::NotFulfilled | DutyState::Error) => {
                    self.note(TraceEntry::result(format!(
                        "Evaluation of all {kind} instances of '{rule}' stopped at '{child}', status = {state}"
                    )));
                    return state;
                }
                DutyState::Fulfilled | DutyState::NotExisting => {}
            }
        }
        self.note(TraceEntry::result(format!(
            "Evaluation of all {kind} instances of '{rule}', status = {}",
            DutyState::Fulfilled
        )));
        DutyState::Fulfilled
    }

    fn duty_result(
        &mut self,
        duty: &str,
        relation: DutyRelation,
        state: DutyState,
        why: &str,
    ) -> DutyState {
        self.note(TraceEntry::result(format!(
            "Evaluation of {} instance '{duty}', status = {state} ({why})",
            relation.as_str()
        )));
        state
    }
}
