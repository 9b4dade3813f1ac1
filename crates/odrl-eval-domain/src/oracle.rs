//! Leaf truth values for atomic constraints, refinements, and exercised actions.
//!
//! Real predicate evaluation (time windows, geofences, counters) is a black box to the engine;
//! an `Oracle` answers for it. `PresetOracle` is the lookup-table implementation used by case
//! files: instance-keyed overrides first, category defaults second.

use odrl_eval_types::{Category, EvaluationRound, Outcome};
use std::collections::BTreeMap;

pub trait Oracle {
    fn lookup_instance(&self, id: &str) -> Option<Outcome>;
    fn lookup_default(&self, category: Category) -> Option<Outcome>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn lookup_instance(&self, id: &str) -> Option<Outcome> {
        (**self).lookup_instance(id)
    }

    fn lookup_default(&self, category: Category) -> Option<Outcome> {
        (**self).lookup_default(category)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetOracle {
    instances: BTreeMap<String, Outcome>,
    defaults: BTreeMap<Category, Outcome>,
}

impl PresetOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(mut self, id: impl Into<String>, outcome: Outcome) -> Self {
        self.set_instance(id, outcome);
        self
    }

    pub fn with_default(mut self, category: Category, outcome: Outcome) -> Self {
        self.set_default(category, outcome);
        self
    }

    pub fn set_instance(&mut self, id: impl Into<String>, outcome: Outcome) {
        self.instances.insert(id.into(), outcome);
    }

    pub fn set_default(&mut self, category: Category, outcome: Outcome) {
        self.defaults.insert(category, outcome);
    }

    pub fn instances(&self) -> &BTreeMap<String, Outcome> {
        &self.instances
    }

    pub fn defaults(&self) -> &BTreeMap<Category, Outcome> {
        &self.defaults
    }
}

impl Oracle for PresetOracle {
    fn lookup_instance(&self, id: &str) -> Option<Outcome> {
        self.instances.get(id).copied()
    }

    fn lookup_default(&self, category: Category) -> Option<Outcome> {
        self.defaults.get(&category).copied()
    }
}

/// Per-run evaluation inputs: the oracle and the obligation round.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub oracle: &'a dyn Oracle,
    pub round: EvaluationRound,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(oracle: &'a dyn Oracle, round: EvaluationRound) -> Self {
        Self { oracle, round }
    }
}

impl std::fmt::Debug for EvaluationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}
