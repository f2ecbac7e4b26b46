use crate::Story;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// Quality figures of a finished story.
///
/// Score statistics only look at present segues. `type_diversity` is the
/// number of distinct segue kinds over the number of segues, with the absent
/// marker counted as a kind of its own; it is 0 for a story without segues.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoryMetrics {
    pub length: usize,
    pub objective: f64,
    pub mean_score: f64,
    pub std_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub absent_segues: usize,
    pub type_diversity: f64,
}

impl StoryMetrics {
    pub fn from_story(story: &Story) -> Self {
        let scores: Vec<f64> = story
            .segues
            .iter()
            .filter(|s| !s.is_absent())
            .map(|s| s.score())
            .collect();
        let (mean_score, std_score, min_score, max_score) = if scores.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            (
                Statistics::mean(scores.iter()),
                Statistics::population_std_dev(scores.iter()),
                Statistics::min(scores.iter()),
                Statistics::max(scores.iter()),
            )
        };
        let kinds: HashSet<Option<&str>> = story.kinds().into_iter().collect();
        let type_diversity = if story.segues.is_empty() {
            0.0
        } else {
            kinds.len() as f64 / story.segues.len() as f64
        };
        Self {
            length: story.len(),
            objective: story.objective(),
            mean_score,
            std_score,
            min_score,
            max_score,
            absent_segues: story.segues.len() - scores.len(),
            type_diversity,
        }
    }
}
