use crate::{circular_greedy, greedy, hill_climbing, optimal, random, NarrativeStrategy, Params};
use anyhow::Result;
use segue_challenges::{Story, StoryError, TransitionOracle, Weights};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Greedy,
    CircularGreedy,
    HillClimbing,
    Optimal,
    Random,
}

pub const ALGORITHM_NAMES: [&str; 12] = [
    "greedy",
    "greedy_diversity_binary",
    "greedy_diversity",
    "greedy_diversity_with_decay_1",
    "greedy_diversity_with_decay_3",
    "greedy_homogeneity",
    "greedy_homogeneity_with_decay_1",
    "greedy_homogeneity_with_decay_3",
    "circular_greedy",
    "hill_climbing",
    "optimal",
    "random",
];

impl Algorithm {
    /// The algorithm behind a registered name, with its preset parameters.
    pub fn from_name(name: &str) -> Option<(Algorithm, Params)> {
        let narrated = |narrative: NarrativeStrategy| {
            (
                Algorithm::Greedy,
                Params {
                    narrative,
                    ..Params::default()
                },
            )
        };
        Some(match name {
            "greedy" => narrated(NarrativeStrategy::None),
            "greedy_diversity_binary" => narrated(NarrativeStrategy::DiversityBinary),
            "greedy_diversity" => narrated(NarrativeStrategy::Diversity),
            "greedy_diversity_with_decay_1" => {
                narrated(NarrativeStrategy::DiversityWithDecay { decay: 1.0 })
            }
            "greedy_diversity_with_decay_3" => {
                narrated(NarrativeStrategy::DiversityWithDecay { decay: 3.0 })
            }
            "greedy_homogeneity" => narrated(NarrativeStrategy::Homogeneity),
            "greedy_homogeneity_with_decay_1" => {
                narrated(NarrativeStrategy::HomogeneityWithDecay { decay: 1.0 })
            }
            "greedy_homogeneity_with_decay_3" => {
                narrated(NarrativeStrategy::HomogeneityWithDecay { decay: 3.0 })
            }
            "circular_greedy" => (Algorithm::CircularGreedy, Params::default()),
            "hill_climbing" => (
                Algorithm::HillClimbing,
                Params {
                    n_restarts: 40,
                    patience: 10,
                    ..Params::default()
                },
            ),
            "optimal" => (Algorithm::Optimal, Params::default()),
            "random" => (Algorithm::Random, Params::default()),
            _ => return None,
        })
    }

    pub fn solve<O: TransitionOracle>(
        &self,
        oracle: &O,
        items: &[O::Item],
        weights: &Weights,
        params: &Params,
    ) -> Result<Story> {
        match self {
            Algorithm::Greedy => greedy::solve(oracle, items, weights, params),
            Algorithm::CircularGreedy => circular_greedy::solve(oracle, items, weights, params),
            Algorithm::HillClimbing => hill_climbing::solve(oracle, items, weights, params),
            Algorithm::Optimal => optimal::solve(oracle, items, weights, params),
            Algorithm::Random => random::solve(oracle, items, weights, params),
        }
    }
}

pub fn algorithm_exists(name: &str) -> bool {
    ALGORITHM_NAMES.contains(&name)
}

pub fn algorithm_names() -> &'static [&'static str] {
    &ALGORITHM_NAMES
}

pub fn get_algorithm(name: &str) -> Result<(Algorithm, Params)> {
    Algorithm::from_name(name).ok_or_else(|| StoryError::UnknownAlgorithm(name.to_string()).into())
}
