// Rating events and ordering-enforced history
//
// Decay exponents are positional, so "most recent first" is a hard
// precondition of every consumer. The comparator is enforced once, here,
// at construction — not re-asserted by callers.

use crate::embedding::Embedding;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thumbs-up / thumbs-down rating, serialized as +1 / -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Rating {
    /// Positive signal (+1).
    Liked,
    /// Negative signal (-1).
    Disliked,
}

impl Rating {
    /// +1 for liked, -1 for disliked.
    pub fn signum(&self) -> i8 {
        match self {
            Rating::Liked => 1,
            Rating::Disliked => -1,
        }
    }
}

impl From<Rating> for i8 {
    fn from(rating: Rating) -> Self {
        rating.signum()
    }
}

impl TryFrom<i8> for Rating {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Liked),
            -1 => Ok(Rating::Disliked),
            other => Err(format!("rating must be +1 or -1, got {}", other)),
        }
    }
}

/// One recorded rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEvent {
    /// Normalized name of the rated dish.
    pub dish_normalized_name: String,

    /// Embedding snapshot taken when the rating was recorded. May be stale
    /// relative to the current catalog, or absent.
    #[serde(default)]
    pub embedding: Option<Embedding>,

    /// Thumbs up or down.
    pub rating: Rating,

    /// Continuous rating intensity, >= 0. Plain thumbs are strength 1.0.
    pub strength: f32,

    /// When the rating was recorded.
    pub rated_at: DateTime<Utc>,
}

impl RatingEvent {
    /// Event with strength 1.0.
    pub fn new(
        dish_normalized_name: impl Into<String>,
        rating: Rating,
        rated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            dish_normalized_name: dish_normalized_name.into(),
            embedding: None,
            rating,
            strength: 1.0,
            rated_at,
        }
    }

    /// Attach an embedding snapshot.
    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Override the rating strength.
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }
}

/// A user's rating history, held in strict most-recent-first order.
///
/// Construction sorts (stably) by timestamp descending; events with equal
/// timestamps keep their input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingHistory {
    events: Vec<RatingEvent>,
}

impl RatingHistory {
    /// Build a history from events in any order.
    pub fn new(mut events: Vec<RatingEvent>) -> Self {
        events.sort_by(|a, b| b.rated_at.cmp(&a.rated_at));
        Self { events }
    }

    /// Total number of ratings (the confidence signal for blending).
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the history holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &RatingEvent> {
        self.events.iter()
    }

    /// Liked events, most recent first. Decay ranks index this subsequence.
    pub fn liked(&self) -> impl Iterator<Item = &RatingEvent> {
        self.events.iter().filter(|e| e.rating == Rating::Liked)
    }

    /// Disliked events, most recent first. Decay ranks index this subsequence.
    pub fn disliked(&self) -> impl Iterator<Item = &RatingEvent> {
        self.events.iter().filter(|e| e.rating == Rating::Disliked)
    }
}
