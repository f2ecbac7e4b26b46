//! Exact sequencing through a travelling salesman reduction.
//!
//! The best open path over `n` items is the best closed tour over `n + 1`
//! nodes once a dummy node at distance 0 from every item is added: cutting
//! the tour at the dummy node leaves the path.
mod tour;
pub use tour::*;

use crate::{Link, Params, SegueCache};
use anyhow::Result;
use ndarray::Array2;
use segue_challenges::{validate_items, Story, StoryError, TransitionOracle, Weights};

/// Distances are `1 - reward` scaled by this factor and truncated to integers.
pub const DISTANCE_SCALE: f64 = 100.0;

#[tracing::instrument(level = "debug", name = "optimal", skip_all, fields(items = items.len()))]
pub fn solve<O: TransitionOracle>(
    oracle: &O,
    items: &[O::Item],
    weights: &Weights,
    params: &Params,
) -> Result<Story> {
    params.validate()?;
    let tour_solver = InternalTourSolver::new(params.exact_tour_limit);
    solve_with(oracle, items, weights, params, &tour_solver)
}

/// Same as `solve` with a caller-supplied tour solver.
pub fn solve_with<O: TransitionOracle, T: TourSolver>(
    oracle: &O,
    items: &[O::Item],
    weights: &Weights,
    params: &Params,
    tour_solver: &T,
) -> Result<Story> {
    validate_items(items)?;
    let n = items.len();
    if n == 1 {
        return Ok(Story::singleton(0));
    }

    let mut cache = SegueCache::new(oracle, items, weights, &params.seed);
    let rewards = reward_matrix(&mut cache);
    let distances = distance_matrix(&rewards);
    let tour = tour_solver.solve_tour(&distances)?;
    tracing::debug!(
        tour_cost = tour_cost(&distances, &tour),
        dimension = n + 1,
        "tour found"
    );
    let order = path_from_tour(&tour, n)?;

    // The tour is undirected: walk it both ways, keep the tour's way on ties.
    let (links, objective) = best_links(&mut cache, &order);
    let reversed: Vec<usize> = order.iter().rev().copied().collect();
    let (reversed_links, reversed_objective) = best_links(&mut cache, &reversed);
    let story = if reversed_objective > objective {
        cache.story(reversed, &reversed_links)
    } else {
        cache.story(order, &links)
    };
    tracing::info!(
        algorithm = "optimal",
        items = n,
        objective = story.objective(),
        "story built"
    );
    Ok(story)
}

/// Best link of every adjacent pair of `order`, with their summed score.
fn best_links<O: TransitionOracle>(cache: &mut SegueCache<'_, O>, order: &[usize]) -> (Vec<Link>, f64) {
    let mut links = Vec::with_capacity(order.len().saturating_sub(1));
    let mut objective = 0.0;
    for w in order.windows(2) {
        let (link, score) = cache.best(w[0], w[1]);
        links.push(link);
        objective += score;
    }
    (links, objective)
}

/// `rewards[[i, j]]` is the best score among transitions from item `i` to item
/// `j`, 0 when there is none and on the diagonal.
pub fn reward_matrix<O: TransitionOracle>(cache: &mut SegueCache<'_, O>) -> Array2<f64> {
    let n = cache.num_items();
    let mut rewards = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let scores = cache.scored_candidates(i, j);
            if !scores.is_empty() {
                rewards[[i, j]] = scores
                    .iter()
                    .map(|&(_, s)| s)
                    .fold(f64::NEG_INFINITY, f64::max);
            }
        }
    }
    rewards
}

/// Symmetrized, inverted and integer-scaled rewards, with the dummy node
/// prepended at index 0.
pub fn distance_matrix(rewards: &Array2<f64>) -> Array2<i64> {
    let n = rewards.nrows();
    let symmetric = (rewards + &rewards.t()) / 2.0;
    let mut distances = Array2::<i64>::zeros((n + 1, n + 1));
    for ((i, j), &reward) in symmetric.indexed_iter() {
        distances[[i + 1, j + 1]] = (DISTANCE_SCALE * (1.0 - reward)) as i64;
    }
    distances
}

/// Item order of a tour over the dummy-extended matrix: the tour is cut at the
/// dummy node and indices are shifted back to item indices.
pub fn path_from_tour(tour: &[usize], num_items: usize) -> Result<Vec<usize>> {
    let dimension = num_items + 1;
    if tour.len() != dimension {
        return Err(StoryError::InvalidTour(format!(
            "tour visits {} nodes, expected {}",
            tour.len(),
            dimension
        ))
        .into());
    }
    let mut visited = vec![false; dimension];
    for &node in tour {
        if node >= dimension || visited[node] {
            return Err(StoryError::InvalidTour(format!("node {} is invalid or repeated", node)).into());
        }
        visited[node] = true;
    }
    let dummy = tour.iter().position(|&node| node == 0).unwrap_or(0);
    Ok(tour[dummy + 1..]
        .iter()
        .chain(&tour[..dummy])
        .map(|&node| node - 1)
        .collect())
}
