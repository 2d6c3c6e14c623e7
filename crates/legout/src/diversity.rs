//! Cold-start diversity selection
//!
//! Greedy farthest-point (k-center) selection over the main-dish catalog:
//! a deterministic, approximate maximization of minimum pairwise cosine
//! distance. The selected set seeds onboarding; the remainder is returned
//! so the external store can clear stale flags.

use crate::config::EngineConfig;
use lecarte::dish::DishRecord;
use lecarte::vocab::DishType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Diversity selection errors
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Not enough eligible dishes to seed onboarding. Deliberately loud:
    /// a smaller-than-requested selection is never returned.
    #[error("need at least {required} main dishes with embeddings, found {found}")]
    InsufficientCatalog {
        /// Eligible dishes found.
        found: usize,
        /// Dishes the selection requires.
        required: usize,
    },
}

/// Outcome of one selection run, as the two flag sets the store persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingSelection {
    /// Normalized names of the selected dishes, in selection order.
    pub selected: Vec<String>,

    /// Eligible dishes that were not selected (flag to clear).
    pub passed_over: Vec<String>,
}

/// Pick a maximally spread onboarding set from the catalog.
///
/// Eligible entries are main dishes with a present embedding, sorted by
/// normalized name so the seed (and therefore the whole greedy run) is
/// reproducible across storage backends. Each round picks the unselected
/// entry with the largest minimum cosine distance to the selected set,
/// ties broken by lowest index.
pub fn select_onboarding_dishes(
    catalog: &HashMap<String, DishRecord>,
    config: &EngineConfig,
) -> Result<OnboardingSelection, Error> {
    let required = config.onboarding_count;

    let mut eligible: Vec<(&str, Vec<f32>)> = catalog
        .values()
        .filter(|dish| dish.dish_type == DishType::Main)
        .filter_map(|dish| {
            dish.embedding
                .as_ref()
                .map(|e| (dish.normalized_name.as_str(), unit_or_zero(e.as_slice())))
        })
        .collect();
    eligible.sort_by(|a, b| a.0.cmp(b.0));

    if eligible.len() < required {
        return Err(Error::InsufficientCatalog { found: eligible.len(), required });
    }

    let count = eligible.len();
    let mut selected_indices = Vec::with_capacity(required);
    let mut is_selected = vec![false; count];

    // Seed with the first entry in stable order, then greedy farthest-point.
    selected_indices.push(0);
    is_selected[0] = true;
    let mut min_dist: Vec<f32> =
        eligible.iter().map(|(_, v)| 1.0 - dot(v, &eligible[0].1)).collect();

    for _ in 1..required {
        let mut best_index = None;
        let mut best_dist = f32::NEG_INFINITY;
        for (index, dist) in min_dist.iter().enumerate() {
            if !is_selected[index] && *dist > best_dist {
                best_dist = *dist;
                best_index = Some(index);
            }
        }
        // count >= required > selected, so an unselected entry exists.
        let Some(next) = best_index else { break };

        selected_indices.push(next);
        is_selected[next] = true;
        for (index, dist) in min_dist.iter_mut().enumerate() {
            let to_new = 1.0 - dot(&eligible[index].1, &eligible[next].1);
            if to_new < *dist {
                *dist = to_new;
            }
        }
    }

    let selected: Vec<String> =
        selected_indices.iter().map(|&i| eligible[i].0.to_string()).collect();
    let passed_over: Vec<String> = eligible
        .iter()
        .enumerate()
        .filter(|(i, _)| !is_selected[*i])
        .map(|(_, (name, _))| name.to_string())
        .collect();

    tracing::info!(
        eligible = count,
        selected = selected.len(),
        "onboarding diversity selection complete"
    );

    Ok(OnboardingSelection { selected, passed_over })
}

/// Unit-normalized copy; a zero vector stays zero (distance 1 to anything).
fn unit_or_zero(values: &[f32]) -> Vec<f32> {
    let norm = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return values.to_vec();
    }
    values.iter().map(|x| x / norm).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecarte::embedding::{Embedding, EMBEDDING_DIM};

    fn main_dish(name: &str, embedding: Vec<f32>) -> DishRecord {
        let mut dish = DishRecord::new(name, name);
        dish.embedding = Embedding::from_vec(embedding);
        dish
    }

    fn basis(index: usize) -> Vec<f32> {
        let mut v = vec![0.0; EMBEDDING_DIM];
        v[index] = 1.0;
        v
    }

    fn catalog_of(dishes: Vec<DishRecord>) -> HashMap<String, DishRecord> {
        dishes.into_iter().map(|d| (d.normalized_name.clone(), d)).collect()
    }

    #[test]
    fn test_selects_exactly_ten_distinct_mains() {
        // 12 mutually orthogonal mains: every pair is equidistant.
        let catalog =
            catalog_of((0..12).map(|i| main_dish(&format!("dish-{:02}", i), basis(i))).collect());

        let selection =
            select_onboarding_dishes(&catalog, &EngineConfig::default()).unwrap();

        assert_eq!(selection.selected.len(), 10);
        let mut unique = selection.selected.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        for name in &selection.selected {
            assert!(catalog.contains_key(name));
        }
        assert_eq!(selection.passed_over.len(), 2);
    }

    #[test]
    fn test_equidistant_ties_resolve_by_stable_order() {
        // All pairwise distances are 1.0, so every round ties and the
        // lowest index (name order) must win: dish-00 .. dish-09.
        let catalog =
            catalog_of((0..12).map(|i| main_dish(&format!("dish-{:02}", i), basis(i))).collect());

        let selection =
            select_onboarding_dishes(&catalog, &EngineConfig::default()).unwrap();

        let expected: Vec<String> = (0..10).map(|i| format!("dish-{:02}", i)).collect();
        assert_eq!(selection.selected, expected);
        assert_eq!(selection.passed_over, vec!["dish-10", "dish-11"]);
    }

    #[test]
    fn test_farthest_point_prefers_spread() {
        // Ten near-identical dishes clustered on axis 0 plus two outliers;
        // the outliers must both be selected despite their name order.
        let mut dishes: Vec<DishRecord> = (0..10)
            .map(|i| {
                let mut v = basis(0);
                v[1] = 0.01 * i as f32; // tiny perturbations within the cluster
                main_dish(&format!("cluster-{:02}", i), v)
            })
            .collect();
        dishes.push(main_dish("z-outlier-a", basis(100)));
        dishes.push(main_dish("z-outlier-b", basis(200)));

        let selection =
            select_onboarding_dishes(&catalog_of(dishes), &EngineConfig::default()).unwrap();

        assert!(selection.selected.iter().any(|n| n == "z-outlier-a"));
        assert!(selection.selected.iter().any(|n| n == "z-outlier-b"));
    }

    #[test]
    fn test_insufficient_catalog_fails_loudly() {
        let catalog =
            catalog_of((0..9).map(|i| main_dish(&format!("dish-{}", i), basis(i))).collect());

        let result = select_onboarding_dishes(&catalog, &EngineConfig::default());
        assert_eq!(
            result.unwrap_err(),
            Error::InsufficientCatalog { found: 9, required: 10 }
        );
    }

    #[test]
    fn test_non_mains_and_missing_embeddings_are_ineligible() {
        let mut dishes: Vec<DishRecord> =
            (0..10).map(|i| main_dish(&format!("dish-{}", i), basis(i))).collect();

        let mut side = main_dish("a-side", basis(20));
        side.dish_type = DishType::Side;
        dishes.push(side);
        dishes.push(DishRecord::new("no-embedding", "No Embedding"));

        let selection =
            select_onboarding_dishes(&catalog_of(dishes), &EngineConfig::default()).unwrap();

        assert!(!selection.selected.iter().any(|n| n == "a-side"));
        assert!(!selection.selected.iter().any(|n| n == "no-embedding"));
        assert!(!selection.passed_over.iter().any(|n| n == "a-side"));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let catalog =
            catalog_of((0..15).map(|i| main_dish(&format!("dish-{:02}", i), basis(i))).collect());

        let config = EngineConfig::default();
        let first = select_onboarding_dishes(&catalog, &config).unwrap();
        let second = select_onboarding_dishes(&catalog, &config).unwrap();
        assert_eq!(first, second);
    }
}
