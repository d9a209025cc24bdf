//! Item enrichment — reconciling a raw menu row against the recipe and
//! ingredient catalogs.
//!
//! The recipe record (when the row links to one) is authoritative for the
//! display name, nutrition, allergens, ingredients, and portion. Rows
//! without usable recipe data fall back to a fuzzy ingredient-name match:
//! normalized names matched by substring containment in either direction,
//! first hit in catalog order. That heuristic has no uniqueness guarantee —
//! it is kept for compatibility with the existing data.

use crate::core::types::{
    EnrichedItem, Ingredient, IngredientCatalog, MenuRow, NutritionFacts, PortionSize, Recipe,
    RecipeCatalog,
};
use regex::Regex;
use std::sync::OnceLock;

fn non_alnum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("static pattern"))
}

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("static pattern"))
}

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([^)]*\)").expect("static pattern"))
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Lowercase, strip everything outside `[a-z0-9\s]`, trim.
pub fn normalize_name(name: &str) -> String {
    non_alnum_re()
        .replace_all(&name.to_lowercase(), "")
        .trim()
        .to_string()
}

fn recipe_for<'a>(row: &MenuRow, recipes: &'a RecipeCatalog) -> Option<&'a Recipe> {
    row.recipe_id.as_ref().and_then(|id| recipes.get(id))
}

/// First ingredient whose normalized name contains the row's normalized
/// name or vice versa. Catalog iteration order decides between multiple
/// candidates.
fn matching_ingredient<'a>(
    ingredients: &'a IngredientCatalog,
    row_name: &str,
) -> Option<&'a Ingredient> {
    let clean = normalize_name(row_name);
    ingredients.values().find(|ingredient| {
        ingredient
            .ingredient_name
            .as_deref()
            .map(normalize_name)
            .is_some_and(|name| {
                !name.is_empty() && (name.contains(&clean) || clean.contains(&name))
            })
    })
}

/// Display name precedence: recipe EN translation, recipe raw name, row
/// name, then the literal "Unknown Item".
pub fn display_name(row: &MenuRow, recipes: &RecipeCatalog) -> String {
    let row_name = || {
        row.menu_row_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown Item".to_string())
    };

    match recipe_for(row, recipes) {
        Some(recipe) => recipe
            .recipe_name_translations
            .get("EN")
            .cloned()
            .filter(|name| !name.is_empty())
            .or_else(|| recipe.recipe_name.clone().filter(|name| !name.is_empty()))
            .unwrap_or_else(row_name),
        None => row_name(),
    }
}

/// Nutrition facts: recipe values when the recipe carries a nutrition
/// record (missing sub-fields treated as 0, each rounded), else the fuzzy
/// ingredient fallback. No match on either path means no nutrition at all —
/// zero is never substituted for wholly-missing data.
pub fn nutrition(
    row: &MenuRow,
    recipes: &RecipeCatalog,
    ingredients: &IngredientCatalog,
) -> Option<NutritionFacts> {
    if let Some(nv) = recipe_for(row, recipes).and_then(|r| r.recipe_nutritive_values.as_ref()) {
        let field = |v: &Option<crate::core::types::ValueField>| {
            round(v.as_ref().and_then(|f| f.value).unwrap_or(0.0))
        };
        return Some(NutritionFacts {
            calories: field(&nv.energy_kcal),
            protein: field(&nv.protein),
            carbs: field(&nv.carbohydrate),
            fat: field(&nv.fat),
            fiber: field(&nv.fiber),
            sugar: field(&nv.sugar),
            sodium: field(&nv.sodium),
        });
    }

    let row_name = row.menu_row_name.as_deref()?;
    let nv = matching_ingredient(ingredients, row_name)?
        .ingredient_nutritive_values
        .as_ref()?;
    let field = |v: Option<f64>| round(v.unwrap_or(0.0));
    Some(NutritionFacts {
        calories: field(nv.energy_kcal),
        protein: field(nv.protein),
        carbs: field(nv.carbohydrate),
        fat: field(nv.fat),
        // Ingredient data spells these "fibre" and "sugars".
        fiber: field(nv.fibre),
        sugar: field(nv.sugars),
        sodium: field(nv.sodium),
    })
}

/// Allergen names from the linked recipe; no recipe means an empty list.
/// There is no ingredient-based allergen fallback.
pub fn allergens(row: &MenuRow, recipes: &RecipeCatalog) -> Vec<String> {
    recipe_for(row, recipes)
        .map(|recipe| {
            recipe
                .recipe_allergens
                .iter()
                .map(|a| a.allergen_name.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// The recipe's EN ingredient text split on commas, with HTML tags and
/// parenthetical annotations stripped. Entries that come out empty are
/// dropped; an empty result collapses to `None`.
pub fn ingredients_list(row: &MenuRow, recipes: &RecipeCatalog) -> Option<Vec<String>> {
    let text = recipe_for(row, recipes)?
        .recipe_list_of_ingredients_translations
        .get("EN")?;

    let entries: Vec<String> = text
        .split(',')
        .map(|part| {
            let part = html_tag_re().replace_all(part, "");
            paren_re().replace_all(&part, "").trim().to_string()
        })
        .filter(|part| !part.is_empty())
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// Portion precedence: row-level override, recipe portion fields,
/// ingredient portion fields, then `1 serving`.
pub fn portion_size(
    row: &MenuRow,
    recipes: &RecipeCatalog,
    ingredients: &IngredientCatalog,
) -> PortionSize {
    if let (Some(size), Some(unit)) = (
        row.menu_row_portion_size,
        row.menu_row_portion_size_unit.as_ref(),
    ) {
        return PortionSize {
            size,
            unit: unit.clone(),
        };
    }

    if let Some(nv) = recipe_for(row, recipes).and_then(|r| r.recipe_nutritive_values.as_ref()) {
        if let (Some(size), Some(unit)) = (nv.portion_size, nv.portion_size_unit.as_ref()) {
            return PortionSize {
                size,
                unit: unit.clone(),
            };
        }
    }

    if let Some(nv) = row
        .menu_row_name
        .as_deref()
        .and_then(|name| matching_ingredient(ingredients, name))
        .and_then(|i| i.ingredient_nutritive_values.as_ref())
    {
        if let (Some(size), Some(unit)) = (nv.portion, nv.portion_unit.as_ref()) {
            return PortionSize {
                size,
                unit: unit.clone(),
            };
        }
    }

    PortionSize::default()
}

/// Resolve one menu row into its displayable form. Pure: identical inputs
/// always yield an identical item.
pub fn enrich(
    row: &MenuRow,
    recipes: &RecipeCatalog,
    ingredients: &IngredientCatalog,
) -> EnrichedItem {
    EnrichedItem {
        recipe_id: row.recipe_id.clone(),
        menu_row_name: row.menu_row_name.clone(),
        display_name: display_name(row, recipes),
        nutrition: nutrition(row, recipes, ingredients),
        allergens: allergens(row, recipes),
        ingredients: ingredients_list(row, recipes),
        portion: portion_size(row, recipes, ingredients),
    }
}
