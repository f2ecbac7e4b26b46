//! A transition oracle backed by explicit tables, loadable from JSON.
//!
//! Real systems derive transitions by walking knowledge graphs and score them
//! with a learned model. A `Playlist` stands in for both: every candidate
//! transition is listed with its raw interestingness, and `weights` scales the
//! raw score per transition kind. An edge is identified by its endpoints,
//! kind and value; `validate` rejects playlists listing one twice.
use crate::{validate_items, Transition, TransitionOracle, Weights};
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const KINDS: [&str; 6] = ["artist", "album", "genre", "year", "label", "producer"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoredEdge {
    pub source: String,
    pub target: String,
    pub kind: String,
    pub value: String,
    pub score: f64,
}

impl ScoredEdge {
    fn matches(&self, t: &Transition) -> bool {
        self.source == t.source && self.target == t.target && self.kind == t.kind && self.value == t.value
    }

    fn transition(&self) -> Transition {
        Transition::new(&self.source, &self.target, &self.kind, &self.value)
    }
}

/// Similarity between two transition kinds. Symmetric.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KindSimilarity {
    pub a: String,
    pub b: String,
    pub similarity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    pub items: Vec<String>,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub transitions: Vec<ScoredEdge>,
    #[serde(default)]
    pub similarities: Vec<KindSimilarity>,
}

impl Playlist {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn with_edge(
        mut self,
        source: &str,
        target: &str,
        kind: &str,
        value: &str,
        score: f64,
    ) -> Self {
        self.transitions.push(ScoredEdge {
            source: source.to_string(),
            target: target.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
            score,
        });
        self
    }

    pub fn with_similarity(mut self, a: &str, b: &str, similarity: f64) -> Self {
        self.similarities.push(KindSimilarity {
            a: a.to_string(),
            b: b.to_string(),
            similarity,
        });
        self
    }

    /// Rejects duplicate item ids and edges listed more than once.
    pub fn validate(&self) -> Result<()> {
        validate_items(&self.items)?;
        let mut seen = HashSet::with_capacity(self.transitions.len());
        for e in &self.transitions {
            if !seen.insert((&e.source, &e.target, &e.kind, &e.value)) {
                return Err(anyhow!(
                    "Edge {} -> {} ({}: {}) is listed more than once",
                    e.source,
                    e.target,
                    e.kind,
                    e.value
                ));
            }
        }
        Ok(())
    }

    /// Random playlist of `num_items` songs where each ordered pair is
    /// connected with probability `density` by one to three transitions.
    pub fn generate_instance(seed: &[u8; 32], num_items: usize, density: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(anyhow!("Density ({}) must be within [0, 1]", density));
        }
        let mut rng = SmallRng::from_seed(*seed);
        let items: Vec<String> = (0..num_items).map(|i| format!("song-{}", i)).collect();

        let mut transitions = Vec::new();
        for source in &items {
            for target in &items {
                if source == target || !rng.gen_bool(density) {
                    continue;
                }
                let num_edges = rng.gen_range(1..=3);
                let first = transitions.len();
                for _ in 0..num_edges {
                    let kind = KINDS.choose(&mut rng).cloned().unwrap_or(KINDS[0]);
                    let value = format!("{}-{}", kind, rng.gen_range(0..10));
                    let score = rng.gen_range(0.0..1.0);
                    if transitions[first..]
                        .iter()
                        .any(|e: &ScoredEdge| e.kind == kind && e.value == value)
                    {
                        continue;
                    }
                    transitions.push(ScoredEdge {
                        source: source.clone(),
                        target: target.clone(),
                        kind: kind.to_string(),
                        value,
                        score,
                    });
                }
            }
        }

        let mut similarities = Vec::new();
        for (i, a) in KINDS.iter().enumerate() {
            for b in KINDS.iter().skip(i + 1) {
                similarities.push(KindSimilarity {
                    a: a.to_string(),
                    b: b.to_string(),
                    similarity: rng.gen_range(0.0..1.0),
                });
            }
        }

        Ok(Self {
            items,
            weights: Weights::new(),
            transitions,
            similarities,
        })
    }
}

impl TransitionOracle for Playlist {
    type Item = String;

    fn candidate_transitions(&self, from: &String, to: &String) -> Vec<Transition> {
        self.transitions
            .iter()
            .filter(|e| &e.source == from && &e.target == to)
            .map(ScoredEdge::transition)
            .collect()
    }

    fn score(&self, transitions: &[Transition], weights: &Weights) -> Vec<f64> {
        transitions
            .iter()
            .map(|t| match self.transitions.iter().find(|e| e.matches(t)) {
                Some(e) => e.score * weights.get(&t.kind).unwrap_or(1.0),
                None => 0.0,
            })
            .collect()
    }

    fn similarity(&self, a: &Transition, b: &Transition) -> f64 {
        if a.kind == b.kind && a.value == b.value {
            return 1.0;
        }
        self.similarities
            .iter()
            .find(|s| (s.a == a.kind && s.b == b.kind) || (s.a == b.kind && s.b == a.kind))
            .map(|s| s.similarity)
            .unwrap_or(0.0)
    }
}
