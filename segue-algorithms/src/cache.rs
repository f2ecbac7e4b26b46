//! Memo of every oracle answer within one solve call.
//!
//! Transitions live in an arena and are addressed by `SegueId`. Ids are handed
//! out in insertion order, which doubles as the stable tie-break key of the
//! greedy builders. Scores are filled lazily, one batched oracle call per pair.
use crate::{seeded_hasher, HashMap};
use rand::{seq::SliceRandom, Rng};
use segue_challenges::{Segue, Story, Transition, TransitionOracle, Weights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegueId(usize);

impl SegueId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A link of a story under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Absent,
    Segue(SegueId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub pairs: usize,
    pub transitions: usize,
    pub candidate_calls: usize,
    pub score_calls: usize,
}

pub struct SegueCache<'a, O: TransitionOracle> {
    oracle: &'a O,
    items: &'a [O::Item],
    weights: &'a Weights,
    transitions: Vec<Transition>,
    scores: Vec<Option<f64>>,
    pairs: HashMap<(usize, usize), Vec<SegueId>>,
    reversed: HashMap<SegueId, SegueId>,
    candidate_calls: usize,
    score_calls: usize,
}

impl<'a, O: TransitionOracle> SegueCache<'a, O> {
    pub fn new(oracle: &'a O, items: &'a [O::Item], weights: &'a Weights, seed: &[u8; 32]) -> Self {
        let hasher = seeded_hasher(seed);
        Self {
            oracle,
            items,
            weights,
            transitions: Vec::new(),
            scores: Vec::new(),
            pairs: HashMap::with_hasher(hasher.clone()),
            reversed: HashMap::with_hasher(hasher),
            candidate_calls: 0,
            score_calls: 0,
        }
    }

    pub fn oracle(&self) -> &'a O {
        self.oracle
    }

    pub fn items(&self) -> &'a [O::Item] {
        self.items
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pairs: self.pairs.len(),
            transitions: self.transitions.len(),
            candidate_calls: self.candidate_calls,
            score_calls: self.score_calls,
        }
    }

    pub fn transition(&self, id: SegueId) -> &Transition {
        &self.transitions[id.0]
    }

    fn push(&mut self, transition: Transition, score: Option<f64>) -> SegueId {
        let id = SegueId(self.transitions.len());
        self.transitions.push(transition);
        self.scores.push(score);
        id
    }

    /// Candidate transitions from item `from` to item `to` (input indices).
    pub fn candidates(&mut self, from: usize, to: usize) -> Vec<SegueId> {
        if let Some(ids) = self.pairs.get(&(from, to)) {
            return ids.clone();
        }
        let found = self
            .oracle
            .candidate_transitions(&self.items[from], &self.items[to]);
        self.candidate_calls += 1;
        let ids: Vec<SegueId> = found.into_iter().map(|t| self.push(t, None)).collect();
        self.pairs.insert((from, to), ids.clone());
        ids
    }

    /// Candidates of the pair with their scores, in insertion order.
    pub fn scored_candidates(&mut self, from: usize, to: usize) -> Vec<(SegueId, f64)> {
        let ids = self.candidates(from, to);
        let missing: Vec<SegueId> = ids
            .iter()
            .copied()
            .filter(|id| self.scores[id.0].is_none())
            .collect();
        if !missing.is_empty() {
            let batch: Vec<Transition> = missing
                .iter()
                .map(|id| self.transitions[id.0].clone())
                .collect();
            let scores = self.oracle.score(&batch, self.weights);
            self.score_calls += 1;
            for (id, score) in missing.iter().zip(scores) {
                self.scores[id.0] = Some(score);
            }
        }
        ids.iter()
            .map(|&id| (id, self.scores[id.0].unwrap_or(0.0)))
            .collect()
    }

    pub fn score(&mut self, link: Link) -> f64 {
        let id = match link {
            Link::Absent => return 0.0,
            Link::Segue(id) => id,
        };
        if let Some(score) = self.scores[id.0] {
            return score;
        }
        let score = self
            .oracle
            .score(std::slice::from_ref(&self.transitions[id.0]), self.weights)
            .first()
            .copied()
            .unwrap_or(0.0);
        self.score_calls += 1;
        self.scores[id.0] = Some(score);
        score
    }

    /// Highest-scoring candidate of the pair; the earliest one wins ties. The
    /// absent marker is returned only when the pair has no candidate at all.
    pub fn best(&mut self, from: usize, to: usize) -> (Link, f64) {
        let mut best: Option<(SegueId, f64)> = None;
        for (id, score) in self.scored_candidates(from, to) {
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((id, score));
            }
        }
        match best {
            Some((id, score)) => (Link::Segue(id), score),
            None => (Link::Absent, 0.0),
        }
    }

    /// Uniform pick among the pair's candidates, or the absent marker.
    pub fn random<R: Rng>(&mut self, from: usize, to: usize, rng: &mut R) -> Link {
        self.candidates(from, to)
            .choose(rng)
            .map_or(Link::Absent, |&id| Link::Segue(id))
    }

    /// The same connection walked the other way round. A score already known
    /// for the forward transition carries over.
    pub fn reverse(&mut self, link: Link) -> Link {
        let id = match link {
            Link::Absent => return Link::Absent,
            Link::Segue(id) => id,
        };
        if let Some(&r) = self.reversed.get(&id) {
            return Link::Segue(r);
        }
        let transition = self.transitions[id.0].reversed();
        let r = self.push(transition, self.scores[id.0]);
        self.reversed.insert(id, r);
        self.reversed.insert(r, id);
        Link::Segue(r)
    }

    pub fn resolve(&mut self, link: Link) -> Segue {
        match link {
            Link::Absent => Segue::Absent,
            Link::Segue(id) => {
                let score = self.score(link);
                Segue::present(self.transitions[id.0].clone(), score)
            }
        }
    }

    pub fn story(&mut self, order: Vec<usize>, links: &[Link]) -> Story {
        let segues = links.iter().map(|&link| self.resolve(link)).collect();
        Story::new(order, segues)
    }
}
