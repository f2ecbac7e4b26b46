use crate::{Link, NarrativeStrategy, SegueCache};
use segue_challenges::{Segue, TransitionOracle};

/// Which end of a partial story is being extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// New item goes after the anchor: transitions anchor -> item.
    Tail,
    /// New item goes before the anchor: transitions item -> anchor.
    Head,
}

/// The best way to attach one pool item to the growth point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub item: usize,
    pub link: Link,
    /// Score after the narrative strategy, if any.
    pub score: f64,
    /// Generation order; lower wins ties.
    pub rank: usize,
}

/// One candidate per pool item, in pool order.
///
/// Every item starts with the absent marker at score 0, so each item always has
/// a candidate. Real transitions replace it only with a strictly higher
/// adjusted score. The narrative strategy is applied only once `story` holds at
/// least one segue, and never to the absent marker.
pub fn generate<O: TransitionOracle>(
    cache: &mut SegueCache<'_, O>,
    anchor: usize,
    pool: &[usize],
    growth: Growth,
    narrative: &NarrativeStrategy,
    story: &[Segue],
) -> Vec<Candidate> {
    let apply_narrative = narrative.is_active() && !story.is_empty();
    let mut rank = 0;
    let mut candidates = Vec::with_capacity(pool.len());
    for &item in pool {
        let mut best = Candidate {
            item,
            link: Link::Absent,
            score: 0.0,
            rank,
        };
        rank += 1;
        let (from, to) = match growth {
            Growth::Tail => (anchor, item),
            Growth::Head => (item, anchor),
        };
        for (id, raw) in cache.scored_candidates(from, to) {
            let score = if apply_narrative {
                narrative.adjust(cache.oracle(), cache.transition(id), story, raw)
            } else {
                raw
            };
            if score > best.score {
                best = Candidate {
                    item,
                    link: Link::Segue(id),
                    score,
                    rank,
                };
            }
            rank += 1;
        }
        candidates.push(best);
    }
    candidates
}

/// Globally best candidate: highest score, then lowest rank.
pub fn select(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().fold(None, |best: Option<&Candidate>, c| match best {
        Some(b) if c.score > b.score || (c.score == b.score && c.rank < b.rank) => Some(c),
        Some(b) => Some(b),
        None => Some(c),
    })
}
