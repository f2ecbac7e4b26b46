//! Random baseline: a uniform permutation with a random candidate per link.
use crate::{Link, Params, SegueCache};
use anyhow::Result;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use segue_challenges::{validate_items, Story, TransitionOracle, Weights};

#[tracing::instrument(level = "debug", name = "random", skip_all, fields(items = items.len()))]
pub fn solve<O: TransitionOracle>(
    oracle: &O,
    items: &[O::Item],
    weights: &Weights,
    params: &Params,
) -> Result<Story> {
    validate_items(items)?;
    params.validate()?;
    let mut rng = SmallRng::from_seed(params.seed);
    let mut cache = SegueCache::new(oracle, items, weights, &params.seed);
    let (order, links) = random_story(&mut cache, &mut rng);
    let story = cache.story(order, &links);
    tracing::info!(
        algorithm = "random",
        items = items.len(),
        objective = story.objective(),
        "story built"
    );
    Ok(story)
}

pub(crate) fn random_story<O: TransitionOracle, R: Rng>(
    cache: &mut SegueCache<'_, O>,
    rng: &mut R,
) -> (Vec<usize>, Vec<Link>) {
    let mut order: Vec<usize> = (0..cache.num_items()).collect();
    order.shuffle(rng);
    let mut links = Vec::with_capacity(order.len().saturating_sub(1));
    for w in order.windows(2) {
        links.push(cache.random(w[0], w[1], rng));
    }
    (order, links)
}
