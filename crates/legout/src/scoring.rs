//! Hybrid dish scoring
//!
//! One dish is scored against a user's taste vector, categorical weights,
//! and dietary restrictions. The vector and categorical components are
//! blended by confidence tier, then scaled by the dish-type multiplier.

use crate::config::EngineConfig;
use lecarte::dish::DishRecord;
use lecarte::embedding::cosine_similarity;
use lecarte::user::UserPreferenceState;
use lecarte::vocab::{CuisineType, DietaryRestriction, DietaryTag};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Combined score from multiple signals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DishScore {
    /// Overall score after blending and the dish-type multiplier.
    pub overall: f32,

    /// Taste-vector cosine component, clamped to [0, 1].
    pub vector: f32,

    /// Flavor component.
    pub flavor: f32,

    /// Cooking-method component.
    pub method: f32,

    /// Cuisine component.
    pub cuisine: f32,

    /// Whether a dietary restriction forced the score to zero.
    pub dietary_blocked: bool,
}

impl DishScore {
    /// Score of a dietary-gated dish: everything zero, blocked flag set.
    fn blocked() -> Self {
        Self { dietary_blocked: true, ..Self::default() }
    }
}

/// Hybrid scorer combining taste-vector and categorical signals
pub struct HybridScorer<'a> {
    config: &'a EngineConfig,
}

impl<'a> HybridScorer<'a> {
    /// Create a scorer over an injected configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Score one dish for one user.
    ///
    /// Steps: dietary gate (any violation forces 0), component scores in
    /// [0, 1], confidence-tier blend (pure vector score when every weight
    /// map is empty), dish-type multiplier.
    pub fn score_dish(&self, dish: &DishRecord, state: &UserPreferenceState) -> DishScore {
        if violates_restrictions(&dish.dietary_attrs, &state.dietary_restrictions) {
            return DishScore::blocked();
        }

        let vector = match (&state.preference_vector, &dish.embedding) {
            (Some(pref), Some(embedding)) => {
                cosine_similarity(pref.as_slice(), embedding.as_slice()).max(0.0)
            }
            _ => 0.0,
        };
        let flavor = attr_score(&state.flavor_weights, dish.flavor_profiles.iter());
        let method = attr_score(&state.method_weights, dish.cooking_methods.iter());
        let cuisine = cuisine_score(&state.cuisine_weights, dish.cuisine_type);

        let blended = if state.has_categorical_weights() {
            let blend = self.config.tiers.for_rating_count(state.rating_count);
            blend.vector * vector
                + blend.cuisine * cuisine
                + blend.flavor * flavor
                + blend.method * method
        } else {
            vector
        };

        DishScore {
            overall: blended * self.config.multipliers.for_type(dish.dish_type),
            vector,
            flavor,
            method,
            cuisine,
            dietary_blocked: false,
        }
    }
}

/// Whether any of the user's restrictions rules the dish out.
///
/// A dish with no recorded dietary attributes always passes: unknown is
/// treated as safe so incomplete catalog rows are not over-filtered.
fn violates_restrictions(
    attrs: &BTreeSet<DietaryTag>,
    restrictions: &BTreeSet<DietaryRestriction>,
) -> bool {
    if attrs.is_empty() || restrictions.is_empty() {
        return false;
    }

    restrictions.iter().any(|restriction| match restriction {
        DietaryRestriction::Vegetarian => {
            !attrs.contains(&DietaryTag::Vegetarian) && !attrs.contains(&DietaryTag::Vegan)
        }
        DietaryRestriction::Vegan => !attrs.contains(&DietaryTag::Vegan),
        DietaryRestriction::GlutenFree => !attrs.contains(&DietaryTag::GlutenFree),
        DietaryRestriction::DairyFree => !attrs.contains(&DietaryTag::DairyFree),
        DietaryRestriction::Halal => !attrs.contains(&DietaryTag::Halal),
        DietaryRestriction::NoNuts => attrs.contains(&DietaryTag::ContainsNuts),
        DietaryRestriction::NoShellfish => attrs.contains(&DietaryTag::ContainsShellfish),
    })
}

/// Normalized categorical affinity in [0, 1].
///
/// `max(0, Σ weights[c] for carried c) / Σ positive weights`; 0 when the
/// positive mass is 0. Negative net affinity floors at 0 rather than
/// penalizing below the blend.
fn attr_score<'c, K: Ord + 'c>(
    weights: &BTreeMap<K, f32>,
    categories: impl Iterator<Item = &'c K>,
) -> f32 {
    let positive_mass: f32 = weights.values().filter(|w| **w > 0.0).sum();
    if positive_mass <= 0.0 {
        return 0.0;
    }
    let raw: f32 = categories.filter_map(|c| weights.get(c)).sum();
    raw.max(0.0) / positive_mass
}

/// [`attr_score`] restricted to the dish's single cuisine; `other` carries
/// no signal and scores 0.
fn cuisine_score(weights: &BTreeMap<CuisineType, f32>, cuisine: CuisineType) -> f32 {
    if cuisine == CuisineType::Other {
        return 0.0;
    }
    attr_score(weights, std::iter::once(&cuisine))
}
