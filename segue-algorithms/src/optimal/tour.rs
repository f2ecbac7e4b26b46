use anyhow::{anyhow, Result};
use ndarray::Array2;

/// Anything that turns a symmetric integer distance matrix into a closed tour
/// visiting every node exactly once.
pub trait TourSolver {
    fn solve_tour(&self, distances: &Array2<i64>) -> Result<Vec<usize>>;
}

/// Held-Karp dynamic programming up to `exact_limit` nodes, multi-start
/// nearest neighbour with 2-opt and node relocation beyond.
///
/// Ties always resolve to the lowest node index, so tours are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalTourSolver {
    pub exact_limit: usize,
    /// Nearest neighbour starts tried by the heuristic.
    pub starts: usize,
}

impl InternalTourSolver {
    pub fn new(exact_limit: usize) -> Self {
        Self {
            exact_limit,
            starts: 8,
        }
    }
}

impl Default for InternalTourSolver {
    fn default() -> Self {
        Self::new(16)
    }
}

impl TourSolver for InternalTourSolver {
    fn solve_tour(&self, distances: &Array2<i64>) -> Result<Vec<usize>> {
        let n = distances.nrows();
        if distances.ncols() != n {
            return Err(anyhow!(
                "Distance matrix must be square, got {}x{}",
                n,
                distances.ncols()
            ));
        }
        Ok(match n {
            0..=3 => (0..n).collect(),
            _ if n <= self.exact_limit => held_karp(distances),
            _ => {
                let mut best: Option<(Vec<usize>, i64)> = None;
                for start in 0..self.starts.clamp(1, n) {
                    let mut tour = nearest_neighbour(distances, start);
                    improve(distances, &mut tour);
                    let cost = tour_cost(distances, &tour);
                    if best.as_ref().map_or(true, |(_, b)| cost < *b) {
                        best = Some((tour, cost));
                    }
                }
                best.map(|(tour, _)| tour).unwrap_or_default()
            }
        })
    }
}

/// Length of the closed tour.
pub fn tour_cost(distances: &Array2<i64>, tour: &[usize]) -> i64 {
    if tour.len() < 2 {
        return 0;
    }
    tour.windows(2)
        .map(|w| distances[[w[0], w[1]]])
        .sum::<i64>()
        + distances[[tour[tour.len() - 1], tour[0]]]
}

/// Exact shortest tour starting at node 0. `O(2^n · n^2)` time.
fn held_karp(distances: &Array2<i64>) -> Vec<usize> {
    let n = distances.nrows();
    // Subsets range over nodes 1..n, node k being bit k - 1.
    let m = n - 1;
    let full = 1usize << m;
    let mut cost = vec![i64::MAX; full * m];
    let mut parent = vec![usize::MAX; full * m];
    for j in 0..m {
        cost[(1 << j) * m + j] = distances[[0, j + 1]];
    }

    for mask in 1..full {
        for j in 0..m {
            if mask & (1 << j) == 0 {
                continue;
            }
            let c = cost[mask * m + j];
            if c == i64::MAX {
                continue;
            }
            for k in 0..m {
                if mask & (1 << k) != 0 {
                    continue;
                }
                let next = mask | (1 << k);
                let candidate = c + distances[[j + 1, k + 1]];
                if candidate < cost[next * m + k] {
                    cost[next * m + k] = candidate;
                    parent[next * m + k] = j;
                }
            }
        }
    }

    let all = full - 1;
    let mut last = 0;
    let mut best = i64::MAX;
    for j in 0..m {
        let c = cost[all * m + j];
        if c == i64::MAX {
            continue;
        }
        let total = c + distances[[j + 1, 0]];
        if total < best {
            best = total;
            last = j;
        }
    }

    let mut tour = Vec::with_capacity(n);
    let mut mask = all;
    let mut j = last;
    loop {
        tour.push(j + 1);
        let p = parent[mask * m + j];
        mask ^= 1 << j;
        if p == usize::MAX {
            break;
        }
        j = p;
    }
    tour.push(0);
    tour.reverse();
    tour
}

fn nearest_neighbour(distances: &Array2<i64>, start: usize) -> Vec<usize> {
    let n = distances.nrows();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    tour.push(current);
    while tour.len() < n {
        let mut next = usize::MAX;
        for j in 0..n {
            if visited[j] {
                continue;
            }
            if next == usize::MAX || distances[[current, j]] < distances[[current, next]] {
                next = j;
            }
        }
        visited[next] = true;
        tour.push(next);
        current = next;
    }
    tour
}

/// 2-opt segment reversals and single node relocations until neither helps.
fn improve(distances: &Array2<i64>, tour: &mut Vec<usize>) {
    let n = tour.len();
    let d = |a: usize, b: usize| distances[[a, b]];
    let max_passes = 1000;
    for _ in 0..max_passes {
        let mut improved = false;

        for i in 0..n - 1 {
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a, b) = (tour[i], tour[i + 1]);
                let (c, e) = (tour[j], tour[(j + 1) % n]);
                if d(a, c) + d(b, e) < d(a, b) + d(c, e) {
                    tour[i + 1..=j].reverse();
                    improved = true;
                }
            }
        }

        'relocate: for p in 0..n {
            let x = tour[p];
            let prev = tour[(p + n - 1) % n];
            let next = tour[(p + 1) % n];
            let gain = d(prev, x) + d(x, next) - d(prev, next);
            for q in 0..n {
                let (c, e) = (tour[q], tour[(q + 1) % n]);
                if c == x || e == x {
                    continue;
                }
                if d(c, x) + d(x, e) - d(c, e) < gain {
                    tour.remove(p);
                    let at = tour.iter().position(|&node| node == e).unwrap_or(0);
                    tour.insert(at, x);
                    improved = true;
                    break 'relocate;
                }
            }
        }

        if !improved {
            break;
        }
    }
}
