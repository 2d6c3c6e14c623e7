// Dish-name normalization
//
// The normalized name is the sole join key between raw menu text and
// catalog records. Ingestion and scoring must use this exact function;
// any divergence is a silent lookup miss, not an error.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(.*?\)\s*").expect("valid parenthesized-suffix pattern"));

/// Normalize a raw menu item name for catalog keying.
///
/// Strips parenthesized segments (e.g. translations), lowercases, collapses
/// whitespace, and trims. Idempotent.
pub fn normalize_dish_name(name: &str) -> String {
    let stripped = PARENTHESIZED.replace_all(name, "");
    let lowered = stripped.trim().to_lowercase();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sweet Chili Chicken Drumsticks", "sweet chili chicken drumsticks")]
    #[case("Lo Mein (撈麵)", "lo mein")]
    #[case("  General   Tso's  Chicken ", "general tso's chicken")]
    #[case("Dumplings (pork) ", "dumplings")]
    #[case("", "")]
    fn test_normalize_dish_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_dish_name(raw), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_dish_name("Tofu & Vegetable Lo Mein (V)");
        assert_eq!(normalize_dish_name(&once), once);
    }

    #[test]
    fn test_interior_parenthetical_joins_neighbors() {
        // Matches the ingestion behavior exactly: the parenthetical and its
        // surrounding whitespace are removed in one pass.
        assert_eq!(normalize_dish_name("Chicken (spicy) Rice"), "chickenrice");
    }
}
