// Dish catalog records

use crate::embedding::Embedding;
use crate::vocab::{CookingMethod, CuisineType, DietaryTag, DishType, FlavorProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One catalog row: a dish with extracted attributes and optional embedding.
///
/// The schema is shared with ingestion (which writes rows) — the engine only
/// reads. `normalized_name` is the join key produced by
/// [`crate::normalize::normalize_dish_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    /// Normalized join key.
    pub normalized_name: String,

    /// Original menu text the row was extracted from.
    pub source_name: String,

    /// Extracted ingredients, in extraction order.
    #[serde(default)]
    pub ingredients: Vec<String>,

    /// Semantic vector, present or entirely absent (never partial).
    #[serde(default)]
    pub embedding: Option<Embedding>,

    /// Flavor profiles the dish carries.
    #[serde(default)]
    pub flavor_profiles: BTreeSet<FlavorProfile>,

    /// Cooking methods the dish carries.
    #[serde(default)]
    pub cooking_methods: BTreeSet<CookingMethod>,

    /// Cuisine classification.
    pub cuisine_type: CuisineType,

    /// Recorded dietary attributes. Empty means "unknown", which the scorer
    /// treats as safe.
    #[serde(default)]
    pub dietary_attrs: BTreeSet<DietaryTag>,

    /// Coarse dish category.
    pub dish_type: DishType,
}

impl DishRecord {
    /// Minimal record with everything optional left empty.
    pub fn new(normalized_name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            normalized_name: normalized_name.into(),
            source_name: source_name.into(),
            ingredients: Vec::new(),
            embedding: None,
            flavor_profiles: BTreeSet::new(),
            cooking_methods: BTreeSet::new(),
            cuisine_type: CuisineType::Other,
            dietary_attrs: BTreeSet::new(),
            dish_type: DishType::Main,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let dish = DishRecord::new("lo mein", "Lo Mein (撈麵)");
        assert_eq!(dish.normalized_name, "lo mein");
        assert_eq!(dish.cuisine_type, CuisineType::Other);
        assert_eq!(dish.dish_type, DishType::Main);
        assert!(dish.embedding.is_none());
        assert!(dish.dietary_attrs.is_empty());
    }

    #[test]
    fn test_serde_defaults_for_sparse_rows() {
        // Ingestion rows may omit attribute columns entirely.
        let row = r#"{
            "normalized_name": "french fries",
            "source_name": "French Fries",
            "cuisine_type": "american",
            "dish_type": "side"
        }"#;
        let dish: DishRecord = serde_json::from_str(row).unwrap();
        assert_eq!(dish.cuisine_type, CuisineType::American);
        assert_eq!(dish.dish_type, DishType::Side);
        assert!(dish.ingredients.is_empty());
        assert!(dish.embedding.is_none());
    }
}
