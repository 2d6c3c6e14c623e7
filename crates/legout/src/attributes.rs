//! Categorical preference inference from rating history
//!
//! Ratings are turned into sparse signed deltas over the flavor, method,
//! and cuisine vocabularies. Deltas are additive corrections: the caller
//! merges them onto stored baselines (e.g. onboarding-stated weights), so
//! stated preferences persist as a floor that ratings perturb.

use crate::config::EngineConfig;
use lecarte::dish::DishRecord;
use lecarte::rating::{RatingEvent, RatingHistory};
use lecarte::user::UserPreferenceState;
use lecarte::vocab::{CookingMethod, CuisineType, FlavorProfile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Sparse signed weight deltas over the categorical vocabularies.
///
/// Only touched categories appear; an absent key is a zero delta.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeDeltas {
    /// Flavor deltas.
    pub flavor: BTreeMap<FlavorProfile, f32>,
    /// Cooking-method deltas.
    pub method: BTreeMap<CookingMethod, f32>,
    /// Cuisine deltas.
    pub cuisine: BTreeMap<CuisineType, f32>,
}

impl AttributeDeltas {
    /// Whether no category was touched.
    pub fn is_empty(&self) -> bool {
        self.flavor.is_empty() && self.method.is_empty() && self.cuisine.is_empty()
    }

    /// Add these deltas onto a user's stored weights.
    ///
    /// Merging only ever sums — it never overwrites — so a baseline weight
    /// survives any sequence of merges.
    pub fn merge_into(&self, state: &mut UserPreferenceState) {
        for (category, delta) in &self.flavor {
            *state.flavor_weights.entry(*category).or_insert(0.0) += delta;
        }
        for (category, delta) in &self.method {
            *state.method_weights.entry(*category).or_insert(0.0) += delta;
        }
        for (category, delta) in &self.cuisine {
            *state.cuisine_weights.entry(*category).or_insert(0.0) += delta;
        }
    }
}

/// Infer categorical weight deltas from a user's rating history.
///
/// The liked event at rank `i` contributes `decay^i × strength` to every
/// flavor and method the dish carries, and to its cuisine unless that is
/// `other`. A disliked event subtracts `dislike_attr_ratio ×` the same
/// weight. Events whose dish is missing from the catalog are skipped.
pub fn infer_attribute_preferences(
    history: &RatingHistory,
    catalog: &HashMap<String, DishRecord>,
    config: &EngineConfig,
) -> AttributeDeltas {
    let mut deltas = AttributeDeltas::default();

    for (rank, event) in history.liked().enumerate() {
        let weight = config.decay_factor.powi(rank as i32) * event.strength;
        apply_event(&mut deltas, event, catalog, weight);
    }

    for (rank, event) in history.disliked().enumerate() {
        let weight = config.decay_factor.powi(rank as i32) * event.strength;
        apply_event(&mut deltas, event, catalog, -config.dislike_attr_ratio * weight);
    }

    deltas
}

fn apply_event(
    deltas: &mut AttributeDeltas,
    event: &RatingEvent,
    catalog: &HashMap<String, DishRecord>,
    signed_weight: f32,
) {
    let Some(dish) = catalog.get(&event.dish_normalized_name) else {
        return;
    };

    for flavor in &dish.flavor_profiles {
        *deltas.flavor.entry(*flavor).or_insert(0.0) += signed_weight;
    }
    for method in &dish.cooking_methods {
        *deltas.method.entry(*method).or_insert(0.0) += signed_weight;
    }
    if dish.cuisine_type != CuisineType::Other {
        *deltas.cuisine.entry(dish.cuisine_type).or_insert(0.0) += signed_weight;
    }
}
