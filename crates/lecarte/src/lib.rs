// lecarte - Menu Data Model & Boundary Contracts
//
// *La Carte* (The Menu) - Shared records, vocabularies, and store contracts

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Fixed-dimension dish embeddings and the vector model contract.
pub mod embedding;
/// Dish catalog records.
pub mod dish;
/// Daily menus and meal buckets.
pub mod menu;
/// Dish-name normalization (the sole catalog join key).
pub mod normalize;
/// Rating events and the ordering-enforced rating history.
pub mod rating;
/// Catalog and preference store contracts with in-memory implementations.
pub mod store;
/// Per-user preference state.
pub mod user;
/// Closed categorical vocabularies.
pub mod vocab;

pub use dish::DishRecord;
pub use embedding::{cosine_similarity, Embedding, FoodVectorModel, StaticVocabModel, EMBEDDING_DIM};
pub use menu::{DailyMenus, MealBucket, MenuSlice};
pub use normalize::normalize_dish_name;
pub use rating::{Rating, RatingEvent, RatingHistory};
pub use store::{DishCatalogStore, InMemoryCatalog, InMemoryPreferences, PreferenceStore};
pub use user::UserPreferenceState;
pub use vocab::{CookingMethod, CuisineType, DietaryRestriction, DietaryTag, DishType, FlavorProfile};

/// Data model library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
