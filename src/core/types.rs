//! Data model for the three input documents and the derived item shape.
//!
//! The menu calendar, recipe catalog, and ingredient catalog are loosely
//! joined: menu rows reference recipes by id, and rows without a recipe are
//! matched against ingredients by name. All document types derive
//! Deserialize with defensive defaults — absent fields resolve to absent,
//! never to zero.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Menu calendar
// ============================================================================

/// Date-key (`YYYY-MM-DD`) → one day's menu. Keys are unique; insertion
/// order of days and of everything beneath them is preserved.
pub type MenuCalendar = IndexMap<String, DayMenu>;

/// Station name → menu rows, in source order.
pub type StationMap = IndexMap<String, Vec<MenuRow>>;

/// A day's data comes in two shapes: a list of venue blocks that must be
/// flattened, or a direct meal-name → station map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DayMenu {
    Venues(Vec<VenueBlock>),
    Meals(IndexMap<String, StationMap>),
}

/// One venue's nested menu structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueBlock {
    #[serde(default)]
    pub menu_name: Option<String>,

    #[serde(default)]
    pub menu_weeks: Vec<MenuWeek>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuWeek {
    #[serde(default)]
    pub menu_days: Vec<MenuDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDay {
    #[serde(default)]
    pub menu_day_meal_options: Vec<MealOption>,
}

/// A station within a venue's day ("GRILL", "SALAD BAR", ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOption {
    #[serde(default)]
    pub meal_option_name: Option<String>,

    #[serde(default)]
    pub menu_rows: Vec<MenuRow>,
}

/// One served item. Immutable once loaded; possibly unlinked to any recipe.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuRow {
    #[serde(default, alias = "name")]
    pub menu_row_name: Option<String>,

    #[serde(default)]
    pub recipe_id: Option<String>,

    /// Row-level portion override; takes precedence over catalog portions.
    #[serde(default)]
    pub menu_row_portion_size: Option<f64>,

    #[serde(default)]
    pub menu_row_portion_size_unit: Option<String>,
}

// ============================================================================
// Recipe catalog
// ============================================================================

/// Recipe id → recipe record. Read-only reference data.
pub type RecipeCatalog = IndexMap<String, Recipe>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub recipe_name: Option<String>,

    /// Language code → name; only "EN" is consulted for display.
    #[serde(default)]
    pub recipe_name_translations: HashMap<String, String>,

    #[serde(default)]
    pub recipe_nutritive_values: Option<RecipeNutrition>,

    #[serde(default)]
    pub recipe_allergens: Vec<RecipeAllergen>,

    /// Language code → comma-joined annotated ingredient text.
    #[serde(default)]
    pub recipe_list_of_ingredients_translations: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeAllergen {
    #[serde(default)]
    pub allergen_name: String,
}

/// Recipe-side nutrition; every sub-field is individually optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeNutrition {
    #[serde(default)]
    pub energy_kcal: Option<ValueField>,

    #[serde(default)]
    pub protein: Option<ValueField>,

    #[serde(default)]
    pub carbohydrate: Option<ValueField>,

    #[serde(default)]
    pub fat: Option<ValueField>,

    #[serde(default)]
    pub fiber: Option<ValueField>,

    #[serde(default)]
    pub sugar: Option<ValueField>,

    #[serde(default)]
    pub sodium: Option<ValueField>,

    #[serde(default)]
    pub portion_size: Option<f64>,

    // The upstream feed misspells this key; match it as-is.
    #[serde(default, rename = "portitionSizeUnit")]
    pub portion_size_unit: Option<String>,
}

/// Wrapper the recipe feed uses for numeric values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueField {
    #[serde(default)]
    pub value: Option<f64>,
}

// ============================================================================
// Ingredient catalog
// ============================================================================

/// Ingredient id → ingredient record. Fallback match target only.
pub type IngredientCatalog = IndexMap<String, Ingredient>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub ingredient_name: Option<String>,

    #[serde(default)]
    pub ingredient_nutritive_values: Option<IngredientNutrition>,
}

/// Ingredient-side nutrition schema — parallel to the recipe schema but
/// with bare numbers and British field names ("fibre", "sugars").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientNutrition {
    #[serde(default)]
    pub energy_kcal: Option<f64>,

    #[serde(default)]
    pub protein: Option<f64>,

    #[serde(default)]
    pub carbohydrate: Option<f64>,

    #[serde(default)]
    pub fat: Option<f64>,

    #[serde(default)]
    pub fibre: Option<f64>,

    #[serde(default)]
    pub sugars: Option<f64>,

    #[serde(default)]
    pub sodium: Option<f64>,

    #[serde(default)]
    pub portion: Option<f64>,

    #[serde(default)]
    pub portion_unit: Option<String>,
}

// ============================================================================
// Meal periods
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// The key used for this meal in direct-form calendar data.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ============================================================================
// Derived item shape
// ============================================================================

/// Rounded-to-integer nutrition facts. Only produced when a source record
/// actually carried nutrition; wholly-missing data stays `None` upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutritionFacts {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub fiber: i64,
    pub sugar: i64,
    pub sodium: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortionSize {
    pub size: f64,
    pub unit: String,
}

impl Default for PortionSize {
    fn default() -> Self {
        Self {
            size: 1.0,
            unit: "serving".to_string(),
        }
    }
}

impl fmt::Display for PortionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.size, self.unit)
    }
}

/// One menu row reconciled against both catalogs. Derived, never persisted;
/// recomputed fresh on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedItem {
    pub recipe_id: Option<String>,
    pub menu_row_name: Option<String>,
    pub display_name: String,
    pub nutrition: Option<NutritionFacts>,
    pub allergens: Vec<String>,
    /// `None` when the recipe carries no ingredient text — distinct from
    /// an empty list.
    pub ingredients: Option<Vec<String>>,
    pub portion: PortionSize,
}

/// Station name → enriched items, still in source order.
pub type MealSections = IndexMap<String, Vec<EnrichedItem>>;

// ============================================================================
// Tests
// ============================================================================
