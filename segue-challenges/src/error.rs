use thiserror::Error;

/// Contract violations surfaced by solvers and story verification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoryError {
    #[error("Item set is empty")]
    EmptyItemSet,
    #[error("Duplicate item identity: {0}")]
    DuplicateItem(String),
    #[error("Initial item index ({index}) is out of range for {len} items")]
    InitialItemOutOfRange { index: usize, len: usize },
    #[error("Story order length ({actual}) does not match number of items ({expected})")]
    OrderLengthMismatch { expected: usize, actual: usize },
    #[error("Story has {segues} segues for {items} items")]
    SegueCountMismatch { items: usize, segues: usize },
    #[error("Story contains invalid item index ({0})")]
    ItemIndexOutOfRange(usize),
    #[error("Story contains item index ({0}) more than once")]
    RepeatedItem(usize),
    #[error("Segue at position {position} does not connect {expected_source} to {expected_target}")]
    DisconnectedSegue {
        position: usize,
        expected_source: String,
        expected_target: String,
    },
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Invalid tour: {0}")]
    InvalidTour(String),
}
