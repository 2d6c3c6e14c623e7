// Closed categorical vocabularies
//
// These enumerations are validated at ingestion time; the engine never
// stores or scores an unknown category. Wire names match the ingestion
// vocabulary exactly (kebab-case).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a wire string is outside a closed vocabulary.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown {vocabulary} category: {value}")]
pub struct UnknownCategory {
    /// Which vocabulary rejected the value.
    pub vocabulary: &'static str,
    /// The rejected wire string.
    pub value: String,
}

macro_rules! closed_vocab {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// All categories, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Wire name of this category.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(UnknownCategory {
                        vocabulary: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

closed_vocab! {
    /// Flavor profile a dish carries.
    FlavorProfile ("flavor_profile") {
        /// Savory.
        Savory => "savory",
        /// Sweet.
        Sweet => "sweet",
        /// Spicy.
        Spicy => "spicy",
        /// Sour.
        Sour => "sour",
        /// Umami.
        Umami => "umami",
        /// Mild.
        Mild => "mild",
        /// Smoky.
        Smoky => "smoky",
        /// Tangy.
        Tangy => "tangy",
        /// Rich.
        Rich => "rich",
        /// Fresh.
        Fresh => "fresh",
    }
}

closed_vocab! {
    /// Cooking method used to prepare a dish.
    CookingMethod ("cooking_method") {
        /// Fried.
        Fried => "fried",
        /// Grilled.
        Grilled => "grilled",
        /// Baked.
        Baked => "baked",
        /// Steamed.
        Steamed => "steamed",
        /// Stir-fried.
        StirFried => "stir-fried",
        /// Roasted.
        Roasted => "roasted",
        /// Braised.
        Braised => "braised",
        /// Raw.
        Raw => "raw",
        /// Sauteed.
        Sauteed => "sauteed",
        /// Smoked.
        Smoked => "smoked",
    }
}

closed_vocab! {
    /// Cuisine a dish belongs to. `Other` is the catch-all and carries no
    /// preference signal.
    CuisineType ("cuisine_type") {
        /// Chinese.
        Chinese => "chinese",
        /// Japanese.
        Japanese => "japanese",
        /// Korean.
        Korean => "korean",
        /// Indian.
        Indian => "indian",
        /// Mexican.
        Mexican => "mexican",
        /// Italian.
        Italian => "italian",
        /// American.
        American => "american",
        /// Mediterranean.
        Mediterranean => "mediterranean",
        /// Thai.
        Thai => "thai",
        /// Vietnamese.
        Vietnamese => "vietnamese",
        /// French.
        French => "french",
        /// Middle-Eastern.
        MiddleEastern => "middle-eastern",
        /// Unclassified cuisine.
        Other => "other",
    }
}

closed_vocab! {
    /// Dietary attribute recorded on a dish.
    DietaryTag ("dietary_attr") {
        /// Suitable for vegetarians.
        Vegetarian => "vegetarian",
        /// Suitable for vegans.
        Vegan => "vegan",
        /// Contains no gluten.
        GlutenFree => "gluten-free",
        /// Contains no dairy.
        DairyFree => "dairy-free",
        /// Halal.
        Halal => "halal",
        /// Contains nuts.
        ContainsNuts => "contains-nuts",
        /// Contains shellfish.
        ContainsShellfish => "contains-shellfish",
    }
}

closed_vocab! {
    /// Dietary restriction stated by a user.
    DietaryRestriction ("dietary_restriction") {
        /// Requires vegetarian (or vegan) dishes.
        Vegetarian => "vegetarian",
        /// Requires vegan dishes.
        Vegan => "vegan",
        /// Requires gluten-free dishes.
        GlutenFree => "gluten-free",
        /// Requires dairy-free dishes.
        DairyFree => "dairy-free",
        /// Requires halal dishes.
        Halal => "halal",
        /// Forbids dishes containing nuts.
        NoNuts => "no-nuts",
        /// Forbids dishes containing shellfish.
        NoShellfish => "no-shellfish",
    }
}

closed_vocab! {
    /// Coarse dish category, used for scoring multipliers and display rules.
    DishType ("dish_type") {
        /// Main course.
        Main => "main",
        /// Side dish.
        Side => "side",
        /// Condiment.
        Condiment => "condiment",
        /// Beverage.
        Beverage => "beverage",
        /// Dessert.
        Dessert => "dessert",
    }
}
