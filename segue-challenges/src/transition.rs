use serde::{Deserialize, Serialize};

/// A directed connector between two items, as produced by a transition oracle.
///
/// `kind` is the opaque type tag narrative strategies compare; `value` is the
/// content the connection goes through (a shared artist, a common year...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub source: String,
    pub target: String,
    pub kind: String,
    pub value: String,
}

impl Transition {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// The same connection walked the other way round.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            kind: self.kind.clone(),
            value: self.value.clone(),
        }
    }

    pub fn is_reverse_of(&self, other: &Transition) -> bool {
        self.source == other.target
            && self.target == other.source
            && self.kind == other.kind
            && self.value == other.value
    }

    pub fn same_kind(&self, other: &Transition) -> bool {
        self.kind == other.kind
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoredTransition {
    #[serde(flatten)]
    pub transition: Transition,
    pub score: f64,
}

/// One link of a story: either a scored transition or the explicit absent
/// marker used when no connection between two adjacent items was found.
///
/// Serialized as `null` when absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(
    from = "Option<ScoredTransition>",
    into = "Option<ScoredTransition>"
)]
pub enum Segue {
    Absent,
    Present(ScoredTransition),
}

impl Segue {
    pub fn present(transition: Transition, score: f64) -> Self {
        Segue::Present(ScoredTransition { transition, score })
    }

    /// Absent segues always score 0.
    pub fn score(&self) -> f64 {
        match self {
            Segue::Absent => 0.0,
            Segue::Present(s) => s.score,
        }
    }

    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Segue::Absent => None,
            Segue::Present(s) => Some(&s.transition),
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.transition().map(|t| t.kind.as_str())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Segue::Absent)
    }

    /// The absent marker never matches any type.
    pub fn same_kind(&self, other: &Transition) -> bool {
        self.transition().is_some_and(|t| t.same_kind(other))
    }
}

impl From<Option<ScoredTransition>> for Segue {
    fn from(value: Option<ScoredTransition>) -> Self {
        match value {
            Some(s) => Segue::Present(s),
            None => Segue::Absent,
        }
    }
}

impl From<Segue> for Option<ScoredTransition> {
    fn from(value: Segue) -> Self {
        match value {
            Segue::Absent => None,
            Segue::Present(s) => Some(s),
        }
    }
}
