use crate::Transition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Anything that can be sequenced: solvers only need a stable identity.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for String {
    fn id(&self) -> &str {
        self
    }
}

impl Identified for &str {
    fn id(&self) -> &str {
        self
    }
}

/// Named numeric knobs handed to the oracle's scoring function.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Weights(pub BTreeMap<String, f64>);

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, knob: impl Into<String>, value: f64) -> Self {
        self.0.insert(knob.into(), value);
        self
    }

    pub fn get(&self, knob: &str) -> Option<f64> {
        self.0.get(knob).copied()
    }
}

impl FromIterator<(String, f64)> for Weights {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Source of candidate transitions and their interestingness.
///
/// Implementations must be deterministic: solvers memoize every answer for the
/// lifetime of a solve call and never ask the same question twice.
pub trait TransitionOracle {
    type Item: Identified;

    /// Transitions leading from `from` to `to`. May be empty.
    fn candidate_transitions(&self, from: &Self::Item, to: &Self::Item) -> Vec<Transition>;

    /// One score per transition, same order as the input.
    fn score(&self, transitions: &[Transition], weights: &Weights) -> Vec<f64>;

    /// Similarity in `[0, 1]` between two transitions, used by narrative strategies.
    fn similarity(&self, a: &Transition, b: &Transition) -> f64;
}
