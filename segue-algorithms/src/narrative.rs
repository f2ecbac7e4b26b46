//! Look-back rules that adjust a candidate's score given the story so far.
use segue_challenges::{Segue, Transition, TransitionOracle};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum NarrativeStrategy {
    #[default]
    None,
    /// Veto a transition of the same type as the previous one.
    DiversityBinary,
    /// Scale by one minus the similarity to the previous transition.
    Diversity,
    /// Veto same-type repeats, scale by similarity to the previous transition.
    Homogeneity,
    /// Veto same-type repeats, scale by one minus the decayed similarity to
    /// every transition placed so far.
    DiversityWithDecay { decay: f64 },
    /// Veto same-type repeats, scale by the decayed similarity to every
    /// transition placed so far, capped at 1.
    HomogeneityWithDecay { decay: f64 },
}

impl NarrativeStrategy {
    pub fn is_active(&self) -> bool {
        !matches!(self, NarrativeStrategy::None)
    }

    /// Adjusted score of `candidate` as the next transition after `story`.
    ///
    /// Never called on an empty story: the first choice has no predecessor to
    /// compare against and keeps its raw score.
    pub fn adjust<O: TransitionOracle>(
        &self,
        oracle: &O,
        candidate: &Transition,
        story: &[Segue],
        score: f64,
    ) -> f64 {
        let last = match story.last() {
            Some(last) => last,
            None => return score,
        };
        let similarity_to_last = |oracle: &O| {
            last.transition()
                .map_or(0.0, |t| oracle.similarity(candidate, t))
        };
        match *self {
            NarrativeStrategy::None => score,
            NarrativeStrategy::Diversity => (score * (1.0 - similarity_to_last(oracle))).max(0.0),
            _ if last.same_kind(candidate) => 0.0,
            NarrativeStrategy::DiversityBinary => score.max(0.0),
            NarrativeStrategy::Homogeneity => {
                (score * similarity_to_last(oracle).min(1.0)).max(0.0)
            }
            NarrativeStrategy::DiversityWithDecay { decay } => {
                let penalty = decayed_similarity(oracle, candidate, story, decay);
                (score * (1.0 - penalty).max(0.0)).max(0.0)
            }
            NarrativeStrategy::HomogeneityWithDecay { decay } => {
                let award = decayed_similarity(oracle, candidate, story, decay);
                (score * award.min(1.0)).max(0.0)
            }
        }
    }
}

/// `Σ_j e^{-j/decay} · similarity(candidate, story[m-1-j])`, walking back from
/// the most recent transition. Absent links contribute nothing.
pub fn decayed_similarity<O: TransitionOracle>(
    oracle: &O,
    candidate: &Transition,
    story: &[Segue],
    decay: f64,
) -> f64 {
    story
        .iter()
        .rev()
        .enumerate()
        .filter_map(|(j, segue)| {
            segue
                .transition()
                .map(|t| (-(j as f64) / decay).exp() * oracle.similarity(candidate, t))
        })
        .sum()
}
