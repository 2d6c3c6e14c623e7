// Daily menus and meal buckets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the three meal windows partitioning menus and recommendations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MealBucket {
    /// Breakfast and brunch menus.
    BreakfastBrunch,
    /// Lunch and late-lunch menus.
    Lunch,
    /// Dinner menus.
    Dinner,
}

impl MealBucket {
    /// All buckets in day order.
    pub const ALL: &'static [MealBucket] =
        &[MealBucket::BreakfastBrunch, MealBucket::Lunch, MealBucket::Dinner];

    /// Map a scraped meal-event title (optionally suffixed with " Menu")
    /// onto a bucket. Unknown titles are skipped by ingestion.
    pub fn from_event_title(title: &str) -> Option<MealBucket> {
        let name = title.trim().trim_end_matches("Menu").trim();
        match name {
            "Breakfast" | "Brunch" => Some(MealBucket::BreakfastBrunch),
            "Lunch" | "Late Lunch" => Some(MealBucket::Lunch),
            "Dinner" => Some(MealBucket::Dinner),
            _ => None,
        }
    }
}

/// One eatery's menu for one bucket: raw item names in menu order.
///
/// Ephemeral — rebuilt per scoring run by the scraper, never stored by the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSlice {
    /// Eatery display name.
    pub eatery_name: String,

    /// Campus location line.
    pub location: String,

    /// Meal bucket this slice belongs to.
    pub bucket: MealBucket,

    /// Raw item names, in menu order.
    pub items: Vec<String>,
}

/// All menu slices for one day, grouped by bucket.
pub type DailyMenus = BTreeMap<MealBucket, Vec<MenuSlice>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_from_event_title() {
        assert_eq!(MealBucket::from_event_title("Breakfast Menu"), Some(MealBucket::BreakfastBrunch));
        assert_eq!(MealBucket::from_event_title("Brunch"), Some(MealBucket::BreakfastBrunch));
        assert_eq!(MealBucket::from_event_title("Late Lunch Menu"), Some(MealBucket::Lunch));
        assert_eq!(MealBucket::from_event_title("Dinner Menu"), Some(MealBucket::Dinner));
        assert_eq!(MealBucket::from_event_title("Grab & Go"), None);
    }

    #[test]
    fn test_bucket_wire_names() {
        assert_eq!(
            serde_json::to_string(&MealBucket::BreakfastBrunch).unwrap(),
            "\"breakfast_brunch\""
        );
        assert_eq!(serde_json::to_string(&MealBucket::Lunch).unwrap(), "\"lunch\"");
    }
}
