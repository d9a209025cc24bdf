//! Section rendering — pure string producers over enriched meal sections.
//!
//! Two targets share one contract: stations are emitted in insertion order
//! (never re-sorted), empty input degrades to a fixed placeholder string,
//! and all data shaping happens upstream in the core pipeline.

pub mod html;
pub mod text;

use crate::core::types::{EnrichedItem, MealSections};

pub const NO_MEAL_DATA: &str = "No data available for this meal.";
pub const NO_MENU_ITEMS: &str = "No menu items available for this meal.";
pub const NO_DATE_DATA: &str = "No data available for this date.";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Expand the per-item detail block (nutrition, ingredients, allergens).
    pub details: bool,

    /// Drop stations with zero items before rendering.
    pub filter_empty: bool,
}

/// Stations that survive the empty-station filter, in original order.
pub(crate) fn visible_sections(
    meal: &MealSections,
    filter_empty: bool,
) -> Vec<(&String, &Vec<EnrichedItem>)> {
    meal.iter()
        .filter(|(_, items)| !filter_empty || !items.is_empty())
        .collect()
}

/// Which placeholder (if any) applies to this meal input.
pub(crate) fn placeholder(meal: Option<&MealSections>, opts: RenderOptions) -> Option<&'static str> {
    let Some(meal) = meal else {
        return Some(NO_MEAL_DATA);
    };
    if meal.is_empty() {
        return Some(NO_MEAL_DATA);
    }
    if visible_sections(meal, opts.filter_empty).is_empty() {
        return Some(NO_MENU_ITEMS);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_placeholder_absent_or_empty() {
        let opts = RenderOptions::default();
        assert_eq!(placeholder(None, opts), Some(NO_MEAL_DATA));
        let empty = IndexMap::new();
        assert_eq!(placeholder(Some(&empty), opts), Some(NO_MEAL_DATA));
    }

    #[test]
    fn test_placeholder_all_empty_stations_filtered() {
        let mut meal: MealSections = IndexMap::new();
        meal.insert("Grill".to_string(), vec![]);

        // Without filtering an empty station still counts as content.
        assert_eq!(placeholder(Some(&meal), RenderOptions::default()), None);

        let filtering = RenderOptions {
            filter_empty: true,
            ..RenderOptions::default()
        };
        assert_eq!(placeholder(Some(&meal), filtering), Some(NO_MENU_ITEMS));
    }
}
