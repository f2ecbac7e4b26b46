//! Bidirectional greedy construction: the story grows outward from the seed,
//! alternating between its tail and its head.
use crate::candidates::{generate, select, Growth};
use crate::{NarrativeStrategy, Params, SegueCache};
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, SeedableRng};
use segue_challenges::{validate_items, Story, TransitionOracle, Weights};
use std::collections::VecDeque;

#[tracing::instrument(level = "debug", name = "circular_greedy", skip_all, fields(items = items.len()))]
pub fn solve<O: TransitionOracle>(
    oracle: &O,
    items: &[O::Item],
    weights: &Weights,
    params: &Params,
) -> Result<Story> {
    validate_items(items)?;
    params.validate()?;
    let mut rng = SmallRng::from_seed(params.seed);
    let seed_item = params.init.select(items.len(), &mut rng)?;
    let mut cache = SegueCache::new(oracle, items, weights, &params.seed);
    let story = build(&mut cache, seed_item)?;
    tracing::info!(
        algorithm = "circular_greedy",
        items = items.len(),
        objective = story.objective(),
        "story built"
    );
    Ok(story)
}

/// With an even pool the tail grows from the last item; with an odd pool the
/// head grows towards the current first item.
pub fn build<O: TransitionOracle>(cache: &mut SegueCache<'_, O>, seed_item: usize) -> Result<Story> {
    let n = cache.num_items();
    let mut placed = vec![false; n];
    placed[seed_item] = true;
    let mut order = VecDeque::with_capacity(n);
    order.push_back(seed_item);
    let mut segues = VecDeque::with_capacity(n.saturating_sub(1));

    while order.len() < n {
        let pool: Vec<usize> = (0..n).filter(|&i| !placed[i]).collect();
        let (anchor, growth) = if pool.len() % 2 == 0 {
            (order[order.len() - 1], Growth::Tail)
        } else {
            (order[0], Growth::Head)
        };
        let candidates = generate(cache, anchor, &pool, growth, &NarrativeStrategy::None, &[]);
        let winner = *select(&candidates).ok_or_else(|| anyhow!("No candidate for a non-empty pool"))?;
        placed[winner.item] = true;
        let segue = cache.resolve(winner.link);
        match growth {
            Growth::Tail => {
                order.push_back(winner.item);
                segues.push_back(segue);
            }
            Growth::Head => {
                order.push_front(winner.item);
                segues.push_front(segue);
            }
        }
    }

    Ok(Story::new(order.into(), segues.into()))
}
