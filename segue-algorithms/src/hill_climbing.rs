//! Steepest-ascent hill climbing over adjacent swaps, with restarts and a
//! bounded number of sideways moves.
//!
//! Every iteration swaps the items at a random interior position `i` and
//! `i + 1` and unconditionally moves to that neighbour. Only the three links
//! touching the swap change: the left and right ones are replaced by the best
//! candidate of their new pair, the middle one is the old middle link reversed.
//! A separately kept best-seen solution decides when a restart ends: each
//! move that does not beat it consumes one unit of patience, each move that
//! does restores the full budget, and the restart stops on the first
//! non-improving move once patience is exhausted.
//!
//! Stories shorter than 4 items have no interior swap. Their restarts return
//! the random initial story unchanged.
use crate::random::random_story;
use crate::{Link, Params, SegueCache};
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use segue_challenges::{validate_items, Story, TransitionOracle, Weights};

/// Outcome of one restart.
#[derive(Debug, Clone, PartialEq)]
pub struct Restart {
    /// Best-seen story of the restart.
    pub story: Story,
    pub objective: f64,
    /// Number of swap moves performed.
    pub iterations: usize,
    /// Best-seen objective before the first move and after every move.
    pub trace: Vec<f64>,
}

#[tracing::instrument(level = "debug", name = "hill_climbing", skip_all, fields(items = items.len()))]
pub fn solve<O: TransitionOracle>(
    oracle: &O,
    items: &[O::Item],
    weights: &Weights,
    params: &Params,
) -> Result<Story> {
    validate_items(items)?;
    let mut cache = SegueCache::new(oracle, items, weights, &params.seed);
    let mut rng = SmallRng::from_seed(params.seed);
    let restarts = solve_restarts(&mut cache, params, &mut rng)?;
    let best = best_restart(restarts).ok_or_else(|| anyhow!("Hill climbing ran no restart"))?;
    let stats = cache.stats();
    tracing::info!(
        algorithm = "hill_climbing",
        items = items.len(),
        objective = best.objective,
        pairs = stats.pairs,
        "story built"
    );
    Ok(best.story)
}

/// Every restart's best-seen story, in restart order. The cache is shared by
/// all restarts and may be reused by the caller across calls.
pub fn solve_restarts<O: TransitionOracle, R: Rng>(
    cache: &mut SegueCache<'_, O>,
    params: &Params,
    rng: &mut R,
) -> Result<Vec<Restart>> {
    params.validate()?;
    let mut restarts = Vec::with_capacity(params.n_restarts);
    for n_restart in 0..params.n_restarts {
        let restart = climb(cache, params.patience, rng);
        tracing::debug!(
            n_restart,
            iterations = restart.iterations,
            objective = restart.objective,
            "restart finished"
        );
        restarts.push(restart);
    }
    Ok(restarts)
}

/// The restart with the highest objective; the earliest one on ties.
pub fn best_restart(restarts: Vec<Restart>) -> Option<Restart> {
    restarts.into_iter().fold(None, |best, r| match best {
        Some(b) if b.objective >= r.objective => Some(b),
        _ => Some(r),
    })
}

pub fn climb<O: TransitionOracle, R: Rng>(
    cache: &mut SegueCache<'_, O>,
    patience: usize,
    rng: &mut R,
) -> Restart {
    let n = cache.num_items();
    let (mut order, mut links) = random_story(cache, rng);
    let mut scores: Vec<f64> = links.iter().map(|&link| cache.score(link)).collect();

    let mut best_order = order.clone();
    let mut best_links: Vec<Link> = links.clone();
    let mut best_objective: f64 = scores.iter().sum();
    let mut trace = vec![best_objective];
    let mut remaining_patience = patience;
    let mut iterations = 0;

    if n >= 4 {
        loop {
            iterations += 1;
            let i = rng.gen_range(1..n - 2);

            let middle = cache.reverse(links[i]);
            let (left, left_score) = cache.best(order[i - 1], order[i + 1]);
            let (right, right_score) = cache.best(order[i], order[i + 2]);
            order.swap(i, i + 1);
            links[i - 1] = left;
            links[i] = middle;
            links[i + 1] = right;
            scores[i - 1] = left_score;
            scores[i] = cache.score(middle);
            scores[i + 1] = right_score;

            let objective: f64 = scores.iter().sum();
            tracing::trace!(iterations, swap = i, objective, best_objective, "move");

            let improved = objective > best_objective;
            if improved {
                best_objective = objective;
                best_order.clone_from(&order);
                best_links.clone_from(&links);
                remaining_patience = patience;
            }
            trace.push(best_objective);
            if !improved {
                if remaining_patience == 0 {
                    break;
                }
                remaining_patience -= 1;
            }
        }
    }

    Restart {
        story: cache.story(best_order, &best_links),
        objective: best_objective,
        iterations,
        trace,
    }
}
