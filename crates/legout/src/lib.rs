// legout - Personalization & Ranking Engine
//
// *Le Goût* (The Taste) - Embedding-based menu personalization with hybrid scoring

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Eatery aggregation and per-bucket ranking.
pub mod aggregate;
/// Categorical preference inference and merging.
pub mod attributes;
/// Engine configuration.
pub mod config;
/// Cold-start diversity selection.
pub mod diversity;
/// Preference-vector construction.
pub mod preference;
/// Parallel per-user refresh pipeline.
pub mod refresh;
/// Hybrid dish scoring.
pub mod scoring;

pub use aggregate::{EateryAggregator, EateryPick, Recommendations};
pub use attributes::{infer_attribute_preferences, AttributeDeltas};
pub use config::{BlendWeights, ConfidenceTiers, DishTypeMultipliers, EngineConfig};
pub use diversity::{select_onboarding_dishes, OnboardingSelection};
pub use preference::compute_preference_vector;
pub use refresh::{refresh_user, refresh_users, RefreshJob};
pub use scoring::{DishScore, HybridScorer};

/// Engine library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
