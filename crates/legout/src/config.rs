//! Engine configuration: every tunable constant in one injected value
//!
//! Grouping the constants here keeps the scorer and aggregator deterministic
//! under test: override a field, pass the config in, assert exact numbers.

use lecarte::vocab::DishType;
use serde::{Deserialize, Serialize};

/// Per-rank multiplicative discount applied to older rating signals.
pub const DEFAULT_DECAY_FACTOR: f32 = 0.95;

/// Weight of the stated-ingredient mean in the preference vector.
pub const DEFAULT_INITIAL_WEIGHT: f32 = 1.0;

/// Weight of liked-dish contributions.
pub const DEFAULT_LIKED_WEIGHT: f32 = 0.5;

/// Weight of disliked-dish contributions.
pub const DEFAULT_DISLIKED_WEIGHT: f32 = 0.3;

/// A dislike moves categorical weights by this fraction of a like.
pub const DEFAULT_DISLIKE_ATTR_RATIO: f32 = 0.5;

/// Rating count at which the medium confidence tier begins.
pub const DEFAULT_MEDIUM_TIER_AT: usize = 15;

/// Rating count at which the high confidence tier begins.
pub const DEFAULT_HIGH_TIER_AT: usize = 40;

/// How component signals are blended at one confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight of the taste-vector cosine score.
    pub vector: f32,
    /// Weight of the cuisine score.
    pub cuisine: f32,
    /// Weight of the flavor score.
    pub flavor: f32,
    /// Weight of the cooking-method score.
    pub method: f32,
}

impl BlendWeights {
    fn sum(&self) -> f32 {
        self.vector + self.cuisine + self.flavor + self.method
    }
}

/// Rating-count-indexed blend selection.
///
/// A sparse rating history yields a noisy taste vector, so categorical
/// signals dominate early and the vector dominates once evidence
/// accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceTiers {
    /// Ratings needed to leave the low tier.
    pub medium_at: usize,
    /// Ratings needed to enter the high tier.
    pub high_at: usize,
    /// Blend below `medium_at`.
    pub low: BlendWeights,
    /// Blend in `medium_at..high_at`.
    pub medium: BlendWeights,
    /// Blend at and above `high_at`.
    pub high: BlendWeights,
}

impl Default for ConfidenceTiers {
    fn default() -> Self {
        Self {
            medium_at: DEFAULT_MEDIUM_TIER_AT,
            high_at: DEFAULT_HIGH_TIER_AT,
            low: BlendWeights { vector: 0.40, cuisine: 0.25, flavor: 0.20, method: 0.15 },
            medium: BlendWeights { vector: 0.60, cuisine: 0.18, flavor: 0.13, method: 0.09 },
            high: BlendWeights { vector: 0.75, cuisine: 0.10, flavor: 0.08, method: 0.07 },
        }
    }
}

impl ConfidenceTiers {
    /// Blend weights for a given rating count.
    pub fn for_rating_count(&self, rating_count: usize) -> &BlendWeights {
        if rating_count >= self.high_at {
            &self.high
        } else if rating_count >= self.medium_at {
            &self.medium
        } else {
            &self.low
        }
    }
}

/// Scalar down-weighting applied per dish category during scoring.
///
/// The condiment multiplier is deliberately configurable: observed
/// deployments run it at 0.0 (condiments never surface) or 0.3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DishTypeMultipliers {
    /// Main courses.
    pub main: f32,
    /// Side dishes.
    pub side: f32,
    /// Desserts.
    pub dessert: f32,
    /// Beverages.
    pub beverage: f32,
    /// Condiments.
    pub condiment: f32,
}

impl Default for DishTypeMultipliers {
    fn default() -> Self {
        Self { main: 1.0, side: 0.6, dessert: 0.7, beverage: 0.4, condiment: 0.3 }
    }
}

impl DishTypeMultipliers {
    /// Multiplier for a dish type.
    pub fn for_type(&self, dish_type: DishType) -> f32 {
        match dish_type {
            DishType::Main => self.main,
            DishType::Side => self.side,
            DishType::Dessert => self.dessert,
            DishType::Beverage => self.beverage,
            DishType::Condiment => self.condiment,
        }
    }
}

/// All engine tunables, injected into the builder/scorer/aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-rank decay factor for rating recency.
    pub decay_factor: f32,

    /// Weight of the stated-ingredient mean.
    pub initial_weight: f32,

    /// Weight of liked-dish contributions.
    pub liked_weight: f32,

    /// Weight of disliked-dish contributions.
    pub disliked_weight: f32,

    /// Dislike-to-like ratio for categorical deltas.
    pub dislike_attr_ratio: f32,

    /// Confidence-tier blend table.
    pub tiers: ConfidenceTiers,

    /// Dish-type multipliers.
    pub multipliers: DishTypeMultipliers,

    /// Dish scores averaged per eatery (top-N mean).
    pub top_dishes_per_eatery: usize,

    /// Eateries surfaced per meal bucket (valid range 3-4).
    pub eateries_per_bucket: usize,

    /// Dishes listed per surfaced eatery (valid range 4-5).
    pub dishes_shown_per_eatery: usize,

    /// Weight of the top-dish mean in the eatery score.
    pub score_weight: f32,

    /// Weight of the variety bonus in the eatery score.
    pub variety_weight: f32,

    /// Unique-ingredient count that saturates the variety bonus.
    pub variety_divisor: f32,

    /// Dishes selected for cold-start onboarding.
    pub onboarding_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decay_factor: DEFAULT_DECAY_FACTOR,
            initial_weight: DEFAULT_INITIAL_WEIGHT,
            liked_weight: DEFAULT_LIKED_WEIGHT,
            disliked_weight: DEFAULT_DISLIKED_WEIGHT,
            dislike_attr_ratio: DEFAULT_DISLIKE_ATTR_RATIO,
            tiers: ConfidenceTiers::default(),
            multipliers: DishTypeMultipliers::default(),
            top_dishes_per_eatery: 3,
            eateries_per_bucket: 3,
            dishes_shown_per_eatery: 4,
            score_weight: 0.85,
            variety_weight: 0.15,
            variety_divisor: 10.0,
            onboarding_count: 10,
        }
    }
}

impl EngineConfig {
    /// Load config from environment variables with fallback to defaults
    ///
    /// Environment variables:
    /// - `LEMENU_DECAY_FACTOR` - Rating recency decay factor
    /// - `LEMENU_CONDIMENT_MULTIPLIER` - Condiment dish-type multiplier
    /// - `LEMENU_EATERIES_PER_BUCKET` - Eateries surfaced per bucket
    /// - `LEMENU_DISHES_PER_EATERY` - Dishes listed per eatery
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("LEMENU_DECAY_FACTOR") {
            if let Ok(decay) = raw.parse::<f32>() {
                config.decay_factor = decay;
            }
        }

        if let Ok(raw) = std::env::var("LEMENU_CONDIMENT_MULTIPLIER") {
            if let Ok(multiplier) = raw.parse::<f32>() {
                config.multipliers.condiment = multiplier;
            }
        }

        if let Ok(raw) = std::env::var("LEMENU_EATERIES_PER_BUCKET") {
            if let Ok(count) = raw.parse::<usize>() {
                config.eateries_per_bucket = count;
            }
        }

        if let Ok(raw) = std::env::var("LEMENU_DISHES_PER_EATERY") {
            if let Ok(count) = raw.parse::<usize>() {
                config.dishes_shown_per_eatery = count;
            }
        }

        config
    }

    /// Validate configuration
    ///
    /// # Returns
    ///
    /// `Result<(), String>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<(), String> {
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(format!(
                "Decay factor must be in (0, 1], got {}",
                self.decay_factor
            ));
        }

        for (label, weight) in [
            ("initial_weight", self.initial_weight),
            ("liked_weight", self.liked_weight),
            ("disliked_weight", self.disliked_weight),
            ("dislike_attr_ratio", self.dislike_attr_ratio),
            ("score_weight", self.score_weight),
            ("variety_weight", self.variety_weight),
        ] {
            if weight < 0.0 {
                return Err(format!("{} cannot be negative, got {}", label, weight));
            }
        }

        if self.tiers.medium_at >= self.tiers.high_at {
            return Err(format!(
                "Confidence tiers out of order: medium_at {} must be below high_at {}",
                self.tiers.medium_at, self.tiers.high_at
            ));
        }

        for (label, blend) in [
            ("low", &self.tiers.low),
            ("medium", &self.tiers.medium),
            ("high", &self.tiers.high),
        ] {
            if (blend.sum() - 1.0).abs() > 1e-4 {
                return Err(format!(
                    "Blend weights for {} tier must sum to 1.0, got {}",
                    label,
                    blend.sum()
                ));
            }
        }

        if !(3..=4).contains(&self.eateries_per_bucket) {
            return Err(format!(
                "Eateries per bucket must be 3 or 4, got {}",
                self.eateries_per_bucket
            ));
        }

        if !(4..=5).contains(&self.dishes_shown_per_eatery) {
            return Err(format!(
                "Dishes shown per eatery must be 4 or 5, got {}",
                self.dishes_shown_per_eatery
            ));
        }

        if self.top_dishes_per_eatery == 0 {
            return Err("Top dishes per eatery must be greater than zero".to_string());
        }

        if self.variety_divisor <= 0.0 {
            return Err(format!(
                "Variety divisor must be positive, got {}",
                self.variety_divisor
            ));
        }

        if self.onboarding_count == 0 {
            return Err("Onboarding count must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.decay_factor, 0.95);
        assert_eq!(config.multipliers.condiment, 0.3);
        assert_eq!(config.eateries_per_bucket, 3);
        assert_eq!(config.dishes_shown_per_eatery, 4);
    }

    #[test]
    fn test_tier_selection_boundaries() {
        let tiers = ConfidenceTiers::default();
        assert_eq!(tiers.for_rating_count(0).vector, 0.40);
        assert_eq!(tiers.for_rating_count(14).vector, 0.40);
        assert_eq!(tiers.for_rating_count(15).vector, 0.60);
        assert_eq!(tiers.for_rating_count(39).vector, 0.60);
        assert_eq!(tiers.for_rating_count(40).vector, 0.75);
        assert_eq!(tiers.for_rating_count(400).vector, 0.75);
    }

    #[test]
    fn test_multiplier_table() {
        let multipliers = DishTypeMultipliers::default();
        assert_eq!(multipliers.for_type(DishType::Main), 1.0);
        assert_eq!(multipliers.for_type(DishType::Side), 0.6);
        assert_eq!(multipliers.for_type(DishType::Dessert), 0.7);
        assert_eq!(multipliers.for_type(DishType::Beverage), 0.4);
        assert_eq!(multipliers.for_type(DishType::Condiment), 0.3);
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("LEMENU_DECAY_FACTOR", "0.9");
        std::env::set_var("LEMENU_CONDIMENT_MULTIPLIER", "0.0");
        std::env::set_var("LEMENU_EATERIES_PER_BUCKET", "4");
        std::env::set_var("LEMENU_DISHES_PER_EATERY", "5");

        let config = EngineConfig::from_env();

        assert_eq!(config.decay_factor, 0.9);
        assert_eq!(config.multipliers.condiment, 0.0);
        assert_eq!(config.eateries_per_bucket, 4);
        assert_eq!(config.dishes_shown_per_eatery, 5);
        assert!(config.validate().is_ok());

        // Clean up
        std::env::remove_var("LEMENU_DECAY_FACTOR");
        std::env::remove_var("LEMENU_CONDIMENT_MULTIPLIER");
        std::env::remove_var("LEMENU_EATERIES_PER_BUCKET");
        std::env::remove_var("LEMENU_DISHES_PER_EATERY");
    }

    #[test]
    fn test_validate_rejects_bad_decay() {
        let config = EngineConfig { decay_factor: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = EngineConfig { decay_factor: 1.5, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbalanced_blend() {
        let mut config = EngineConfig::default();
        config.tiers.low.vector = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tier_order() {
        let mut config = EngineConfig::default();
        config.tiers.medium_at = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_counts() {
        let config = EngineConfig { eateries_per_bucket: 2, ..Default::default() };
        assert!(config.validate().is_err());
        let config = EngineConfig { dishes_shown_per_eatery: 6, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
