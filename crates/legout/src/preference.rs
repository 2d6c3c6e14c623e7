//! Preference-vector construction from stated ingredients and rating history
//!
//! The accumulation order is part of the contract: stated ingredients first,
//! then liked events most recent first, then disliked events most recent
//! first. Decay exponents index each rating subsequence positionally, so
//! reordering the summation (even for numerical-stability reasons) changes
//! observable behavior.

use crate::config::EngineConfig;
use lecarte::dish::DishRecord;
use lecarte::embedding::{Embedding, FoodVectorModel, EMBEDDING_DIM};
use lecarte::rating::{RatingEvent, RatingHistory};
use std::collections::HashMap;

/// Compute a user's unit taste vector, or `None` when there is no signal.
///
/// Accumulates:
/// - `initial_weight × mean(resolved stated-ingredient vectors)`,
/// - `+ liked_weight × strength × decay^i × embedding` per liked event,
/// - `- disliked_weight × strength × decay^i × embedding` per disliked event,
///
/// then L2-normalizes. Events resolve their embedding from the rating-time
/// snapshot first and the current catalog second; events with neither are
/// skipped without contributing.
///
/// `None` means "nothing to compute from" — zero contributions were added,
/// or the contributions cancelled to an exactly zero vector. Callers must
/// fall back to a non-personalized strategy, not treat it as a neutral
/// taste.
pub fn compute_preference_vector(
    initial_ingredients: &[String],
    history: &RatingHistory,
    catalog: &HashMap<String, DishRecord>,
    model: &impl FoodVectorModel,
    config: &EngineConfig,
) -> Option<Embedding> {
    let mut acc = vec![0.0f32; EMBEDDING_DIM];
    let mut has_signal = false;

    // Stated ingredient preferences
    if !initial_ingredients.is_empty() {
        if let Some(init) = model.embed_ingredients(initial_ingredients) {
            add_scaled(&mut acc, init.as_slice(), config.initial_weight);
            has_signal = true;
        }
    }

    // Liked dishes (positive signal)
    for (rank, event) in history.liked().enumerate() {
        if let Some(embedding) = resolve_embedding(event, catalog) {
            let weight =
                config.liked_weight * event.strength * config.decay_factor.powi(rank as i32);
            add_scaled(&mut acc, embedding.as_slice(), weight);
            has_signal = true;
        }
    }

    // Disliked dishes (negative signal)
    for (rank, event) in history.disliked().enumerate() {
        if let Some(embedding) = resolve_embedding(event, catalog) {
            let weight =
                config.disliked_weight * event.strength * config.decay_factor.powi(rank as i32);
            add_scaled(&mut acc, embedding.as_slice(), -weight);
            has_signal = true;
        }
    }

    if !has_signal {
        return None;
    }

    // Contributions that cancel exactly are indistinguishable from no
    // signal for every downstream consumer.
    Embedding::from_vec(acc)?.normalized()
}

/// Embedding for a rating event: snapshot first, else current catalog row.
fn resolve_embedding<'a>(
    event: &'a RatingEvent,
    catalog: &'a HashMap<String, DishRecord>,
) -> Option<&'a Embedding> {
    event.embedding.as_ref().or_else(|| {
        catalog
            .get(&event.dish_normalized_name)
            .and_then(|dish| dish.embedding.as_ref())
    })
}

fn add_scaled(acc: &mut [f32], values: &[f32], weight: f32) {
    for (slot, x) in acc.iter_mut().zip(values) {
        *slot += weight * x;
    }
}
