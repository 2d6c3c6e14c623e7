// Catalog and preference store contracts
//
// The engine is storage-agnostic: it consumes these traits and the caller
// decides the backend. The in-memory implementations back the test suites
// and any caller that materializes rows fetched elsewhere.

use crate::dish::DishRecord;
use crate::rating::{RatingEvent, RatingHistory};
use crate::user::UserPreferenceState;
use std::collections::HashMap;

/// Result type for store operations
pub type StoreResult<T> = Result<T, Error>;

/// Store errors
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The requested user has no stored state.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The backend failed to serve the request.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Read/write contract for the dish catalog.
///
/// Ingestion writes rows (extraction + embedding); the engine only reads.
pub trait DishCatalogStore {
    /// Batch lookup by normalized name. Names without a row are simply
    /// absent from the result, never an error.
    fn get_dishes_batch(&self, names: &[String]) -> StoreResult<HashMap<String, DishRecord>>;

    /// Batch upsert keyed on normalized name. Returns rows written.
    fn upsert_dishes_batch(&mut self, dishes: Vec<DishRecord>) -> StoreResult<usize>;
}

/// Persistence contract for user preference state and rating history.
pub trait PreferenceStore {
    /// Load one user's state.
    fn load_user(&self, user_id: &str) -> StoreResult<UserPreferenceState>;

    /// Persist one user's state.
    fn save_user(&mut self, user_id: &str, state: &UserPreferenceState) -> StoreResult<()>;

    /// Record a rating and mark the user's vector stale.
    fn append_rating(&mut self, user_id: &str, event: RatingEvent) -> StoreResult<()>;

    /// Full rating history for a user, ordering enforced.
    fn rating_history(&self, user_id: &str) -> StoreResult<RatingHistory>;
}

/// HashMap-backed dish catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    dishes: HashMap<String, DishRecord>,
}

impl InMemoryCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored dishes.
    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Borrow the full catalog map (the engine's dish-lookup input).
    pub fn all(&self) -> &HashMap<String, DishRecord> {
        &self.dishes
    }
}

impl DishCatalogStore for InMemoryCatalog {
    fn get_dishes_batch(&self, names: &[String]) -> StoreResult<HashMap<String, DishRecord>> {
        Ok(names
            .iter()
            .filter_map(|name| self.dishes.get(name).map(|d| (name.clone(), d.clone())))
            .collect())
    }

    fn upsert_dishes_batch(&mut self, dishes: Vec<DishRecord>) -> StoreResult<usize> {
        let written = dishes.len();
        for dish in dishes {
            self.dishes.insert(dish.normalized_name.clone(), dish);
        }
        Ok(written)
    }
}

/// HashMap-backed preference store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    users: HashMap<String, UserPreferenceState>,
    ratings: HashMap<String, Vec<RatingEvent>>,
}

impl InMemoryPreferences {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, replacing any existing state.
    pub fn insert_user(&mut self, user_id: impl Into<String>, state: UserPreferenceState) {
        self.users.insert(user_id.into(), state);
    }

    /// IDs of all registered users.
    pub fn user_ids(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn load_user(&self, user_id: &str) -> StoreResult<UserPreferenceState> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }

    fn save_user(&mut self, user_id: &str, state: &UserPreferenceState) -> StoreResult<()> {
        self.users.insert(user_id.to_string(), state.clone());
        Ok(())
    }

    fn append_rating(&mut self, user_id: &str, event: RatingEvent) -> StoreResult<()> {
        let state = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;
        state.vector_stale = true;
        self.ratings.entry(user_id.to_string()).or_default().push(event);
        Ok(())
    }

    fn rating_history(&self, user_id: &str) -> StoreResult<RatingHistory> {
        if !self.users.contains_key(user_id) {
            return Err(Error::UserNotFound(user_id.to_string()));
        }
        let events = self.ratings.get(user_id).cloned().unwrap_or_default();
        Ok(RatingHistory::new(events))
    }
}
