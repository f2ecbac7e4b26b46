use segue_challenges::*;

fn items() -> Vec<String> {
    vec!["a".to_string(), "b".to_string(), "c".to_string()]
}

fn segue(source: &str, target: &str, kind: &str, score: f64) -> Segue {
    Segue::present(Transition::new(source, target, kind, "x"), score)
}

fn story_error(result: anyhow::Result<()>) -> StoryError {
    result
        .unwrap_err()
        .downcast_ref::<StoryError>()
        .cloned()
        .unwrap()
}

#[test]
fn test_verify_valid_story() {
    let story = Story::new(
        vec![2, 0, 1],
        vec![segue("c", "a", "genre", 0.5), Segue::Absent],
    );
    assert!(story.verify(&items()).is_ok());
    assert_eq!(story.ids(&items()), vec!["c", "a", "b"]);
}

#[test]
fn test_verify_rejects_wrong_length() {
    let story = Story::new(vec![0, 1], vec![Segue::Absent]);
    assert_eq!(
        story_error(story.verify(&items())),
        StoryError::OrderLengthMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn test_verify_rejects_segue_count() {
    let story = Story::new(vec![0, 1, 2], vec![Segue::Absent]);
    assert_eq!(
        story_error(story.verify(&items())),
        StoryError::SegueCountMismatch {
            items: 3,
            segues: 1
        }
    );
}

#[test]
fn test_verify_rejects_repeats_and_bad_indices() {
    let repeated = Story::new(vec![0, 1, 0], vec![Segue::Absent, Segue::Absent]);
    assert_eq!(
        story_error(repeated.verify(&items())),
        StoryError::RepeatedItem(0)
    );
    let out_of_range = Story::new(vec![0, 1, 3], vec![Segue::Absent, Segue::Absent]);
    assert_eq!(
        story_error(out_of_range.verify(&items())),
        StoryError::ItemIndexOutOfRange(3)
    );
}

#[test]
fn test_verify_rejects_disconnected_segue() {
    let story = Story::new(
        vec![0, 1, 2],
        vec![segue("a", "b", "genre", 0.5), segue("a", "c", "year", 0.5)],
    );
    assert_eq!(
        story_error(story.verify(&items())),
        StoryError::DisconnectedSegue {
            position: 1,
            expected_source: "b".to_string(),
            expected_target: "c".to_string()
        }
    );
}

#[test]
fn test_objective_ignores_absent() {
    let story = Story::new(
        vec![0, 1, 2],
        vec![segue("a", "b", "genre", 0.25), Segue::Absent],
    );
    assert_eq!(story.objective(), 0.25);
    assert_eq!(Segue::Absent.score(), 0.0);
    assert_eq!(Story::singleton(0).objective(), 0.0);
}

#[test]
fn test_validate_items() {
    assert_eq!(
        story_error(validate_items::<String>(&[])),
        StoryError::EmptyItemSet
    );
    let duplicated = vec!["a".to_string(), "b".to_string(), "a".to_string()];
    assert_eq!(
        story_error(validate_items(&duplicated)),
        StoryError::DuplicateItem("a".to_string())
    );
    assert!(validate_items(&["solo"]).is_ok());
}

#[test]
fn test_absent_segue_serializes_as_null() {
    let story = Story::new(
        vec![0, 1, 2],
        vec![segue("a", "b", "genre", 0.5), Segue::Absent],
    );
    let value = serde_json::to_value(&story).unwrap();
    assert_eq!(value["segues"][1], serde_json::Value::Null);
    assert_eq!(value["segues"][0]["kind"], "genre");
    assert_eq!(value["segues"][0]["score"], 0.5);
    let parsed: Story = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, story);
}

#[test]
fn test_absent_never_matches_kind() {
    let t = Transition::new("a", "b", "genre", "x");
    assert!(!Segue::Absent.same_kind(&t));
    assert!(segue("b", "c", "genre", 0.1).same_kind(&t));
    assert!(t.reversed().is_reverse_of(&t));
}
