//! Sequential greedy construction: grow the story at its tail, each step taking
//! the single best-scored candidate across the whole remaining pool.
use crate::candidates::{generate, select, Growth};
use crate::{NarrativeStrategy, Params, SegueCache};
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, SeedableRng};
use segue_challenges::{validate_items, Story, TransitionOracle, Weights};

#[tracing::instrument(level = "debug", name = "greedy", skip_all, fields(items = items.len()))]
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
    let story = build(&mut cache, seed_item, &params.narrative)?;
    tracing::info!(
        algorithm = "greedy",
        items = items.len(),
        objective = story.objective(),
        "story built"
    );
    Ok(story)
}

/// Greedy story starting at `seed_item`. Completes in exactly `n - 1` steps.
pub fn build<O: TransitionOracle>(
    cache: &mut SegueCache<'_, O>,
    seed_item: usize,
    narrative: &NarrativeStrategy,
) -> Result<Story> {
    let n = cache.num_items();
    let mut placed = vec![false; n];
    placed[seed_item] = true;
    let mut order = Vec::with_capacity(n);
    order.push(seed_item);
    let mut segues = Vec::with_capacity(n.saturating_sub(1));

    while order.len() < n {
        let pool: Vec<usize> = (0..n).filter(|&i| !placed[i]).collect();
        let tail = order[order.len() - 1];
        let candidates = generate(cache, tail, &pool, Growth::Tail, narrative, &segues);
        let winner = *select(&candidates).ok_or_else(|| anyhow!("No candidate for a non-empty pool"))?;
        placed[winner.item] = true;
        order.push(winner.item);
        segues.push(cache.resolve(winner.link));
    }

    Ok(Story::new(order, segues))
}
