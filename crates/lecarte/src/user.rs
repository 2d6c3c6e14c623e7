// Per-user preference state

use crate::embedding::Embedding;
use crate::vocab::{CookingMethod, CuisineType, DietaryRestriction, FlavorProfile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything the engine knows about one user's taste.
///
/// Created at onboarding with stated ingredients only; mutated by the
/// refresh pipeline whenever ratings accrue and the vector is marked stale.
/// Weight maps are sparse: an absent key means weight 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPreferenceState {
    /// Ingredients the user stated at onboarding.
    #[serde(default)]
    pub initial_ingredients: Vec<String>,

    /// Unit taste vector, absent until enough signal exists to compute one.
    #[serde(default)]
    pub preference_vector: Option<Embedding>,

    /// Set when ratings accrued since the vector was last computed.
    #[serde(default)]
    pub vector_stale: bool,

    /// Signed flavor weights (baseline plus accumulated rating deltas).
    #[serde(default)]
    pub flavor_weights: BTreeMap<FlavorProfile, f32>,

    /// Signed cooking-method weights.
    #[serde(default)]
    pub method_weights: BTreeMap<CookingMethod, f32>,

    /// Signed cuisine weights.
    #[serde(default)]
    pub cuisine_weights: BTreeMap<CuisineType, f32>,

    /// Stated dietary restrictions.
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<DietaryRestriction>,

    /// Number of ratings ever recorded; drives confidence blending.
    #[serde(default)]
    pub rating_count: usize,
}

impl UserPreferenceState {
    /// Fresh onboarding state: stated ingredients, nothing else.
    pub fn new_onboarding(initial_ingredients: Vec<String>) -> Self {
        Self {
            initial_ingredients,
            ..Self::default()
        }
    }

    /// Whether any categorical weight map carries signal. Empty maps mean
    /// the scorer falls back to the pure vector score.
    pub fn has_categorical_weights(&self) -> bool {
        !self.flavor_weights.is_empty()
            || !self.method_weights.is_empty()
            || !self.cuisine_weights.is_empty()
    }
}
