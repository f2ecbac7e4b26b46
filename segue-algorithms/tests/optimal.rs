use anyhow::Result;
use ndarray::{array, Array2};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use segue_algorithms::optimal::{
    distance_matrix, path_from_tour, reward_matrix, solve_with, tour_cost, InternalTourSolver,
    TourSolver,
};
use segue_algorithms::{optimal, Params, SegueCache};
use segue_challenges::{Playlist, StoryError};

fn abc() -> Playlist {
    Playlist::new(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        .with_edge("A", "B", "genre", "jazz", 0.9)
        .with_edge("B", "C", "genre", "jazz", 0.9)
        .with_edge("A", "C", "year", "1959", 0.1)
}

fn random_distances(n: usize, seed: u8) -> Array2<i64> {
    let mut rng = SmallRng::from_seed([seed; 32]);
    let mut d = Array2::<i64>::zeros((n, n));
    for i in 0..n {
        for j in i + 1..n {
            let v = rng.gen_range(0..100);
            d[[i, j]] = v;
            d[[j, i]] = v;
        }
    }
    d
}

fn brute_force(d: &Array2<i64>) -> i64 {
    fn walk(d: &Array2<i64>, tour: &mut Vec<usize>, used: &mut Vec<bool>, best: &mut i64) {
        if tour.len() == used.len() {
            *best = (*best).min(tour_cost(d, tour));
            return;
        }
        for k in 1..used.len() {
            if !used[k] {
                used[k] = true;
                tour.push(k);
                walk(d, tour, used, best);
                tour.pop();
                used[k] = false;
            }
        }
    }
    let n = d.nrows();
    let mut used = vec![false; n];
    used[0] = true;
    let mut best = i64::MAX;
    walk(d, &mut vec![0], &mut used, &mut best);
    best
}

fn is_permutation(tour: &[usize], n: usize) -> bool {
    let mut sorted = tour.to_vec();
    sorted.sort();
    sorted == (0..n).collect::<Vec<_>>()
}

#[test]
fn test_three_items_follow_the_strong_links() {
    let p = abc();
    let story = optimal::solve(&p, &p.items, &p.weights, &Params::default()).unwrap();
    assert_eq!(story.ids(&p.items), vec!["A", "B", "C"]);
    story.verify(&p.items).unwrap();
    assert!((story.objective() - 1.8).abs() < 1e-9);
    assert!(story.segues.iter().all(|s| !s.is_absent()));
}

#[test]
fn test_reward_matrix() {
    let p = abc();
    let mut cache = SegueCache::new(&p, &p.items, &p.weights, &[0u8; 32]);
    let rewards = reward_matrix(&mut cache);
    assert_eq!(
        rewards,
        array![[0.0, 0.9, 0.1], [0.0, 0.0, 0.9], [0.0, 0.0, 0.0]]
    );
}

#[test]
fn test_distance_matrix() {
    let rewards = array![[0.0, 0.75], [0.25, 0.0]];
    let distances = distance_matrix(&rewards);
    assert_eq!(distances, array![[0i64, 0, 0], [0, 100, 50], [0, 50, 100]]);

    let zeros = distance_matrix(&Array2::<f64>::zeros((3, 3)));
    assert_eq!(zeros.row(0).sum(), 0);
    assert_eq!(zeros.column(0).sum(), 0);
    assert_eq!(zeros[[1, 2]], 100);
}

#[test]
fn test_path_from_tour() {
    assert_eq!(path_from_tour(&[2, 0, 1, 3], 3).unwrap(), vec![0, 2, 1]);
    assert_eq!(path_from_tour(&[0, 1, 2], 2).unwrap(), vec![0, 1]);
    for bad in [vec![0, 1, 1], vec![0, 1], vec![0, 1, 5]] {
        let err = path_from_tour(&bad, 2).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoryError>(),
            Some(StoryError::InvalidTour(_))
        ));
    }
}

#[test]
fn test_exact_tour_is_optimal() {
    let solver = InternalTourSolver::new(16);
    for (n, seed) in [(4, 1), (6, 2), (8, 3)] {
        let d = random_distances(n, seed);
        let tour = solver.solve_tour(&d).unwrap();
        assert!(is_permutation(&tour, n));
        assert_eq!(tour[0], 0);
        assert_eq!(tour_cost(&d, &tour), brute_force(&d));
    }
}

#[test]
fn test_heuristic_tour_is_valid() {
    let exact = InternalTourSolver::new(16);
    let heuristic = InternalTourSolver::new(0);
    for (n, seed) in [(5, 4), (8, 5), (30, 6)] {
        let d = random_distances(n, seed);
        let tour = heuristic.solve_tour(&d).unwrap();
        assert!(is_permutation(&tour, n));
        if n <= 8 {
            let best = tour_cost(&d, &exact.solve_tour(&d).unwrap());
            assert!(tour_cost(&d, &tour) >= best);
        }
    }
}

#[test]
fn test_tour_solver_rejects_non_square() {
    let solver = InternalTourSolver::default();
    assert!(solver.solve_tour(&Array2::<i64>::zeros((3, 4))).is_err());
    assert_eq!(solver.solve_tour(&Array2::<i64>::zeros((0, 0))).unwrap(), Vec::<usize>::new());
}

#[test]
fn test_all_zero_rewards() {
    let p = Playlist::new((0..5).map(|i| format!("song-{}", i)).collect());
    let story = optimal::solve(&p, &p.items, &p.weights, &Params::default()).unwrap();
    story.verify(&p.items).unwrap();
    assert_eq!(story.objective(), 0.0);
}

struct FixedTour(Vec<usize>);

impl TourSolver for FixedTour {
    fn solve_tour(&self, _distances: &Array2<i64>) -> Result<Vec<usize>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_custom_tour_solver() {
    let p = abc();
    let story = solve_with(
        &p,
        &p.items,
        &p.weights,
        &Params::default(),
        &FixedTour(vec![0, 3, 2, 1]),
    )
    .unwrap();
    // walked against its edges the tour scores 0, so it is reversed
    assert_eq!(story.ids(&p.items), vec!["A", "B", "C"]);
    assert!((story.objective() - 1.8).abs() < 1e-9);

    let err = solve_with(
        &p,
        &p.items,
        &p.weights,
        &Params::default(),
        &FixedTour(vec![0, 1, 1, 2]),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoryError>(),
        Some(StoryError::InvalidTour(_))
    ));
}

#[test]
fn test_tour_direction_kept_on_ties() {
    let p = Playlist::new(vec!["A".to_string(), "B".to_string(), "C".to_string()]);
    let story = solve_with(
        &p,
        &p.items,
        &p.weights,
        &Params::default(),
        &FixedTour(vec![0, 3, 2, 1]),
    )
    .unwrap();
    assert_eq!(story.ids(&p.items), vec!["C", "B", "A"]);
    assert_eq!(story.objective(), 0.0);
}

#[test]
fn test_both_directions_scored() {
    // B->A and C->B are stronger than A->B and B->C.
    let p = abc()
        .with_edge("B", "A", "label", "blue note", 1.0)
        .with_edge("C", "B", "label", "blue note", 1.0);
    for tour in [vec![0, 1, 2, 3], vec![0, 3, 2, 1]] {
        let story = solve_with(&p, &p.items, &p.weights, &Params::default(), &FixedTour(tour)).unwrap();
        assert_eq!(story.ids(&p.items), vec!["C", "B", "A"]);
        assert!((story.objective() - 2.0).abs() < 1e-9);
    }
}
