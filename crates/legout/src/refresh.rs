//! Per-user preference refresh pipeline
//!
//! Recomputes stale preference state from rating history: taste vector,
//! merged categorical weights, and rating count. Users are fully
//! independent (each job only reads its own inputs), so the batch runs on
//! the rayon pool with results identical to sequential execution.

use crate::attributes::infer_attribute_preferences;
use crate::config::EngineConfig;
use crate::preference::compute_preference_vector;
use lecarte::dish::DishRecord;
use lecarte::embedding::FoodVectorModel;
use lecarte::rating::RatingHistory;
use lecarte::user::UserPreferenceState;
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

/// One user's refresh workload: their state and full rating history.
#[derive(Debug, Clone)]
pub struct RefreshJob {
    /// Store key for the user.
    pub user_id: String,

    /// Preference state to refresh in place.
    pub state: UserPreferenceState,

    /// Full rating history, ordering enforced.
    pub history: RatingHistory,
}

/// Refresh one user's preference state from their rating history.
///
/// Skips users whose vector is not stale. Recomputes the taste vector,
/// merges inferred categorical deltas onto the stored baselines, updates
/// the rating count, and clears the staleness flag. Returns whether a
/// recomputation ran.
pub fn refresh_user(
    state: &mut UserPreferenceState,
    history: &RatingHistory,
    catalog: &HashMap<String, DishRecord>,
    model: &impl FoodVectorModel,
    config: &EngineConfig,
) -> bool {
    if !state.vector_stale {
        return false;
    }

    state.preference_vector = compute_preference_vector(
        &state.initial_ingredients,
        history,
        catalog,
        model,
        config,
    );

    let deltas = infer_attribute_preferences(history, catalog, config);
    if !deltas.is_empty() {
        deltas.merge_into(state);
    }

    state.rating_count = history.len();
    state.vector_stale = false;
    true
}

/// Refresh a batch of users in parallel.
///
/// One independent task per user, no shared mutable state; output is
/// byte-identical to running [`refresh_user`] sequentially over the slice.
pub fn refresh_users<M>(
    jobs: &mut [RefreshJob],
    catalog: &HashMap<String, DishRecord>,
    model: &M,
    config: &EngineConfig,
) -> usize
where
    M: FoodVectorModel + Sync,
{
    let start = Instant::now();

    let refreshed: usize = jobs
        .par_iter_mut()
        .map(|job| refresh_user(&mut job.state, &job.history, catalog, model, config) as usize)
        .sum();

    tracing::info!(
        users = jobs.len(),
        refreshed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "preference refresh batch complete"
    );
    refreshed
}
