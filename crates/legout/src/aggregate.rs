//! Eatery-level aggregation and ranking
//!
//! Per-dish scores roll up to per-eatery scores (top-N mean plus a variety
//! bonus), eateries are ranked per meal bucket, and the winners are
//! flattened into the ordered picks the delivery layer renders.

use crate::config::EngineConfig;
use crate::scoring::HybridScorer;
use lecarte::dish::DishRecord;
use lecarte::menu::{DailyMenus, MealBucket, MenuSlice};
use lecarte::normalize::normalize_dish_name;
use lecarte::user::UserPreferenceState;
use lecarte::vocab::DishType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One recommended eatery with its ordered dish list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EateryPick {
    /// Eatery display name.
    pub eatery: String,

    /// Campus location line.
    pub location: String,

    /// Raw dish names, best first. Condiments are excluded from display
    /// (they still count toward scoring and variety).
    pub dishes: Vec<String>,
}

/// Ordered picks per meal bucket for one user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendations {
    /// Picks per bucket, best eatery first.
    pub buckets: BTreeMap<MealBucket, Vec<EateryPick>>,
}

/// Rolls per-dish scores up to ranked per-eatery picks.
pub struct EateryAggregator<'a> {
    scorer: HybridScorer<'a>,
    config: &'a EngineConfig,
}

struct ScoredItem {
    name: String,
    score: f32,
    is_condiment: bool,
}

struct EateryEntry {
    eatery: String,
    location: String,
    items: Vec<ScoredItem>,
    unique_ingredients: usize,
}

impl<'a> EateryAggregator<'a> {
    /// Create an aggregator over an injected configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { scorer: HybridScorer::new(config), config }
    }

    /// Generate a full day's recommendations for one user.
    pub fn generate_recommendations(
        &self,
        menus: &DailyMenus,
        catalog: &HashMap<String, DishRecord>,
        state: &UserPreferenceState,
    ) -> Recommendations {
        let mut buckets = BTreeMap::new();
        for (bucket, slices) in menus {
            buckets.insert(*bucket, self.recommend_bucket(slices, catalog, state));
        }
        Recommendations { buckets }
    }

    /// Rank one bucket's eateries and list each winner's top dishes.
    pub fn recommend_bucket(
        &self,
        slices: &[MenuSlice],
        catalog: &HashMap<String, DishRecord>,
        state: &UserPreferenceState,
    ) -> Vec<EateryPick> {
        let mut entries: Vec<EateryEntry> = Vec::new();
        for slice in slices {
            let entry = self.score_slice(slice, catalog, state);
            // Duplicate slices for one eatery replace the earlier menu but
            // keep its rank position (last write wins).
            match entries.iter_mut().find(|e| e.eatery == entry.eatery) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }

        // Stable sort: tied eateries keep enumeration order.
        entries.sort_by(|a, b| {
            self.eatery_score(b)
                .partial_cmp(&self.eatery_score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let picks: Vec<EateryPick> = entries
            .into_iter()
            .take(self.config.eateries_per_bucket)
            .map(|entry| EateryPick {
                eatery: entry.eatery,
                location: entry.location,
                dishes: entry
                    .items
                    .into_iter()
                    .filter(|item| !item.is_condiment)
                    .take(self.config.dishes_shown_per_eatery)
                    .map(|item| item.name)
                    .collect(),
            })
            .collect();

        tracing::debug!(
            eateries = picks.len(),
            "ranked bucket: {}",
            picks.iter().map(|p| p.eatery.as_str()).collect::<Vec<_>>().join(", ")
        );
        picks
    }

    /// Score every item on one slice and gather its variety evidence.
    fn score_slice(
        &self,
        slice: &MenuSlice,
        catalog: &HashMap<String, DishRecord>,
        state: &UserPreferenceState,
    ) -> EateryEntry {
        let mut items: Vec<ScoredItem> = Vec::with_capacity(slice.items.len());
        let mut ingredients: BTreeSet<&str> = BTreeSet::new();

        for raw_name in &slice.items {
            let normalized = normalize_dish_name(raw_name);
            let dish = catalog.get(&normalized);

            let (score, is_condiment) = match dish {
                Some(dish) => {
                    for ingredient in &dish.ingredients {
                        ingredients.insert(ingredient.as_str());
                    }
                    (
                        self.scorer.score_dish(dish, state).overall,
                        dish.dish_type == DishType::Condiment,
                    )
                }
                // Unknown dishes rank last instead of erroring the run.
                None => (0.0, false),
            };
            items.push(ScoredItem { name: raw_name.clone(), score, is_condiment });
        }

        items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        EateryEntry {
            eatery: slice.eatery_name.clone(),
            location: slice.location.clone(),
            items,
            unique_ingredients: ingredients.len(),
        }
    }

    /// `score_weight × mean(top-N dish scores) + variety_weight × bonus`.
    fn eatery_score(&self, entry: &EateryEntry) -> f32 {
        let top: Vec<f32> = entry
            .items
            .iter()
            .take(self.config.top_dishes_per_eatery)
            .map(|item| item.score)
            .collect();
        let mean = if top.is_empty() {
            0.0
        } else {
            top.iter().sum::<f32>() / top.len() as f32
        };

        let variety =
            (entry.unique_ingredients as f32 / self.config.variety_divisor).min(1.0);

        self.config.score_weight * mean + self.config.variety_weight * variety
    }
}
