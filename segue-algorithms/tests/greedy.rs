use segue_algorithms::{circular_greedy, greedy, InitPolicy, NarrativeStrategy, Params};
use segue_challenges::{Playlist, Segue, StoryError};

fn playlist() -> Playlist {
    Playlist::new(["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect())
        .with_edge("a", "b", "genre", "jazz", 0.9)
        .with_edge("a", "c", "year", "1959", 0.5)
        .with_edge("b", "c", "genre", "rock", 0.8)
        .with_edge("b", "d", "year", "1971", 0.3)
        .with_edge("c", "d", "artist", "miles", 0.7)
        .with_similarity("genre", "year", 0.5)
}

fn solve(narrative: NarrativeStrategy) -> segue_challenges::Story {
    let p = playlist();
    let params = Params {
        narrative,
        ..Params::default()
    };
    greedy::solve(&p, &p.items, &p.weights, &params).unwrap()
}

#[test]
fn test_greedy_takes_best_candidate() {
    let story = solve(NarrativeStrategy::None);
    assert_eq!(story.order, vec![0, 1, 2, 3]);
    assert_eq!(story.kinds(), vec![Some("genre"), Some("genre"), Some("artist")]);
    assert!((story.objective() - 2.4).abs() < 1e-9);
}

#[test]
fn test_diversity_binary_vetoes_repeated_kind() {
    let story = solve(NarrativeStrategy::DiversityBinary);
    assert_eq!(story.order, vec![0, 1, 3, 2]);
    assert_eq!(story.kinds(), vec![Some("genre"), Some("year"), None]);
    assert_eq!(story.segues[2], Segue::Absent);
    // stored scores are raw, not adjusted
    assert_eq!(story.segues[1].score(), 0.3);
}

#[test]
fn test_homogeneity_vetoes_then_scales() {
    let story = solve(NarrativeStrategy::Homogeneity);
    assert_eq!(story.order, vec![0, 1, 3, 2]);
}

#[test]
fn test_diversity_does_not_veto() {
    // genre/jazz and genre/rock have no listed similarity
    let story = solve(NarrativeStrategy::Diversity);
    assert_eq!(story.order, vec![0, 1, 2, 3]);
}

#[test]
fn test_decay_strategies_veto_repeated_kind() {
    for narrative in [
        NarrativeStrategy::DiversityWithDecay { decay: 1.0 },
        NarrativeStrategy::HomogeneityWithDecay { decay: 3.0 },
    ] {
        let story = solve(narrative);
        assert_eq!(story.order, vec![0, 1, 3, 2]);
    }
}

#[test]
fn test_init_policy() {
    let p = playlist();
    let params = Params {
        init: InitPolicy::Index(2),
        ..Params::default()
    };
    let story = greedy::solve(&p, &p.items, &p.weights, &params).unwrap();
    assert_eq!(story.order[0], 2);
    assert_eq!(story.order[1], 3);

    let params = Params {
        init: InitPolicy::Index(4),
        ..Params::default()
    };
    let err = greedy::solve(&p, &p.items, &p.weights, &params).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoryError>(),
        Some(&StoryError::InitialItemOutOfRange { index: 4, len: 4 })
    );

    let params = Params {
        init: InitPolicy::Random,
        ..Params::default()
    };
    let story = greedy::solve(&p, &p.items, &p.weights, &params).unwrap();
    story.verify(&p.items).unwrap();
}

#[test]
fn test_ties_go_to_earliest_item() {
    let p = Playlist::new(["a", "b", "c"].iter().map(|s| s.to_string()).collect())
        .with_edge("a", "c", "genre", "x", 0.5)
        .with_edge("a", "b", "genre", "y", 0.5);
    let story = greedy::solve(&p, &p.items, &p.weights, &Params::default()).unwrap();
    assert_eq!(story.order, vec![0, 1, 2]);
}

#[test]
fn test_circular_greedy_alternates_head_and_tail() {
    let p = Playlist::new(["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect())
        .with_edge("b", "a", "genre", "jazz", 0.9)
        .with_edge("c", "a", "year", "1959", 0.1)
        .with_edge("a", "c", "year", "1959", 0.2)
        .with_edge("a", "d", "artist", "miles", 0.6)
        .with_edge("c", "b", "label", "blue note", 0.4);
    let story = circular_greedy::solve(&p, &p.items, &p.weights, &Params::default()).unwrap();
    // head (odd pool), tail (even pool), head again
    assert_eq!(story.order, vec![2, 1, 0, 3]);
    assert_eq!(story.ids(&p.items), vec!["c", "b", "a", "d"]);
    assert_eq!(story.kinds(), vec![Some("label"), Some("genre"), Some("artist")]);
    story.verify(&p.items).unwrap();
    assert!((story.objective() - 1.9).abs() < 1e-9);
}
