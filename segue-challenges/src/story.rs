use crate::{Identified, Segue, StoryError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordering of items (indices into the solver's input slice) plus the
/// segue chosen for each adjacent pair: `segues[i]` joins `order[i]` to
/// `order[i + 1]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Story {
    pub order: Vec<usize>,
    pub segues: Vec<Segue>,
}

impl Story {
    pub fn new(order: Vec<usize>, segues: Vec<Segue>) -> Self {
        Self { order, segues }
    }

    /// The story of a single item: no transitions at all.
    pub fn singleton(index: usize) -> Self {
        Self {
            order: vec![index],
            segues: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn objective(&self) -> f64 {
        calc_objective(&self.segues)
    }

    pub fn items<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.order.iter().map(|&i| &items[i]).collect()
    }

    pub fn ids<T: Identified>(&self, items: &[T]) -> Vec<String> {
        self.order.iter().map(|&i| items[i].id().to_string()).collect()
    }

    pub fn kinds(&self) -> Vec<Option<&str>> {
        self.segues.iter().map(|s| s.kind()).collect()
    }

    /// Checks the permutation invariant and that every present segue connects
    /// the two items it sits between.
    pub fn verify<T: Identified>(&self, items: &[T]) -> Result<()> {
        if self.order.len() != items.len() {
            return Err(StoryError::OrderLengthMismatch {
                expected: items.len(),
                actual: self.order.len(),
            }
            .into());
        }
        if self.segues.len() + 1 != self.order.len() {
            return Err(StoryError::SegueCountMismatch {
                items: self.order.len(),
                segues: self.segues.len(),
            }
            .into());
        }
        let mut visited = HashSet::with_capacity(self.order.len());
        for &i in &self.order {
            if i >= items.len() {
                return Err(StoryError::ItemIndexOutOfRange(i).into());
            }
            if !visited.insert(i) {
                return Err(StoryError::RepeatedItem(i).into());
            }
        }
        for (position, (w, segue)) in self.order.windows(2).zip(&self.segues).enumerate() {
            if let Some(t) = segue.transition() {
                let (source, target) = (items[w[0]].id(), items[w[1]].id());
                if t.source != source || t.target != target {
                    return Err(StoryError::DisconnectedSegue {
                        position,
                        expected_source: source.to_string(),
                        expected_target: target.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Sum of segue scores; absent segues contribute nothing.
pub fn calc_objective(segues: &[Segue]) -> f64 {
    segues.iter().map(Segue::score).sum()
}

/// Rejects input no solver can sequence: an empty set or repeated identities.
pub fn validate_items<T: Identified>(items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(StoryError::EmptyItemSet.into());
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(StoryError::DuplicateItem(item.id().to_string()).into());
        }
    }
    Ok(())
}
