//! Calendar flattening — turning a day's data into station → row lists.
//!
//! Handles both calendar shapes: direct `{Breakfast, Lunch, Dinner}`
//! station maps pass through, and multi-venue block lists are flattened
//! through `menuWeeks → menuDays → menuDayMealOptions → menuRows`, applying
//! the venue config's category renames and exclusions. Station and row
//! order are preserved throughout.

use crate::core::config::VenueConfig;
use crate::core::enrich;
use crate::core::types::{
    DayMenu, EnrichedItem, IngredientCatalog, Meal, MealSections, MenuCalendar, RecipeCatalog,
    StationMap,
};

/// All calendar date keys, sorted ascending.
pub fn available_dates(calendar: &MenuCalendar) -> Vec<String> {
    let mut dates: Vec<String> = calendar.keys().cloned().collect();
    dates.sort();
    dates
}

/// Station → rows for one meal of one day. `None` when the day carries no
/// data for the meal (a normal condition — the calendar does not cover
/// every meal every day).
pub fn meal_stations(day: &DayMenu, meal: Meal, config: Option<&VenueConfig>) -> Option<StationMap> {
    match day {
        DayMenu::Meals(meals) => {
            let stations = meals.get(meal.key())?;
            Some(apply_config(stations.clone(), config))
        }
        DayMenu::Venues(venues) => {
            let menu_name = config?.menu_name_for(meal)?;
            let venue = venues
                .iter()
                .find(|v| v.menu_name.as_deref() == Some(menu_name))?;

            let mut stations = StationMap::new();
            for week in &venue.menu_weeks {
                for day in &week.menu_days {
                    for option in &day.menu_day_meal_options {
                        let category = option
                            .meal_option_name
                            .clone()
                            .filter(|name| !name.is_empty())
                            .unwrap_or_else(|| "Main Station".to_string());
                        let category = rename_category(category, config);
                        let Some(category) = category else { continue };
                        stations
                            .entry(category)
                            .or_default()
                            .extend(option.menu_rows.iter().cloned());
                    }
                }
            }
            Some(stations)
        }
    }
}

/// Apply the config's exclusions and renames. Exclusion is checked against
/// the source name; renamed categories merge into an existing target
/// station, preserving first-seen order.
fn apply_config(stations: StationMap, config: Option<&VenueConfig>) -> StationMap {
    let Some(config) = config else {
        return stations;
    };
    let mut out = StationMap::new();
    for (name, rows) in stations {
        match rename_category(name, Some(config)) {
            Some(name) => out.entry(name).or_default().extend(rows),
            None => {}
        }
    }
    out
}

/// `None` when the category is excluded; otherwise the (possibly renamed)
/// category name.
fn rename_category(name: String, config: Option<&VenueConfig>) -> Option<String> {
    let Some(config) = config else {
        return Some(name);
    };
    if config.exclude.contains(&name) {
        return None;
    }
    Some(config.rename.get(&name).cloned().unwrap_or(name))
}

/// Enrich every row of a station map, preserving order. Recomputed fresh
/// on every render.
pub fn enrich_stations(
    stations: &StationMap,
    recipes: &RecipeCatalog,
    ingredients: &IngredientCatalog,
) -> MealSections {
    stations
        .iter()
        .map(|(name, rows)| {
            let items: Vec<EnrichedItem> = rows
                .iter()
                .map(|row| enrich::enrich(row, recipes, ingredients))
                .collect();
            (name.clone(), items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn venue_day() -> DayMenu {
        serde_json::from_str(
            r#"
[
  {
    "menuName": "North Hall Lunch Service",
    "menuWeeks": [
      {
        "menuDays": [
          {
            "menuDayMealOptions": [
              {
                "mealOptionName": "DRINKS",
                "menuRows": [{ "menuRowName": "Horchata" }]
              },
              {
                "mealOptionName": "BOBA DRINKS",
                "menuRows": [{ "menuRowName": "Milk Tea" }]
              },
              {
                "menuRows": [{ "menuRowName": "Chips" }]
              },
              {
                "mealOptionName": "GRILL",
                "menuRows": [
                  { "menuRowName": "Burger", "recipeId": "R1" },
                  { "menuRowName": "Fries" }
                ]
              }
            ]
          }
        ]
      }
    ]
  },
  {
    "menuName": "North Hall Dinner Service",
    "menuWeeks": []
  }
]
"#,
        )
        .unwrap()
    }

    fn north_hall() -> VenueConfig {
        crate::core::config::parse_config(
            r#"
name: North Hall
meals:
  lunch: "North Hall Lunch Service"
  dinner: "North Hall Dinner Service"
rename:
  DRINKS: "LATIN TOPPING BAR"
exclude:
  - "BOBA DRINKS"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_flatten_venue_blocks() {
        let stations = meal_stations(&venue_day(), Meal::Lunch, Some(&north_hall())).unwrap();
        let names: Vec<&String> = stations.keys().collect();
        // Renamed, excluded-dropped, defaulted, in encounter order.
        assert_eq!(names, ["LATIN TOPPING BAR", "Main Station", "GRILL"]);
        assert_eq!(stations["GRILL"].len(), 2);
        assert_eq!(
            stations["GRILL"][0].menu_row_name.as_deref(),
            Some("Burger")
        );
    }

    #[test]
    fn test_flatten_venue_with_no_weeks_is_empty() {
        let stations = meal_stations(&venue_day(), Meal::Dinner, Some(&north_hall())).unwrap();
        assert!(stations.is_empty());
    }

    #[test]
    fn test_flatten_missing_meal_config_is_none() {
        // Breakfast has no configured menuName.
        assert!(meal_stations(&venue_day(), Meal::Breakfast, Some(&north_hall())).is_none());
    }

    #[test]
    fn test_venue_day_without_config_is_none() {
        assert!(meal_stations(&venue_day(), Meal::Lunch, None).is_none());
    }

    #[test]
    fn test_direct_day_passthrough() {
        let day: DayMenu = serde_json::from_str(
            r#"{ "Lunch": { "Grill": [{ "menuRowName": "Burger" }], "Salad Bar": [] } }"#,
        )
        .unwrap();
        let stations = meal_stations(&day, Meal::Lunch, None).unwrap();
        let names: Vec<&String> = stations.keys().collect();
        assert_eq!(names, ["Grill", "Salad Bar"]);
        assert!(meal_stations(&day, Meal::Dinner, None).is_none());
    }

    #[test]
    fn test_direct_day_applies_renames() {
        let day: DayMenu = serde_json::from_str(
            r#"{ "Lunch": { "DRINKS": [{ "menuRowName": "Horchata" }], "BOBA DRINKS": [] } }"#,
        )
        .unwrap();
        let stations = meal_stations(&day, Meal::Lunch, Some(&north_hall())).unwrap();
        let names: Vec<&String> = stations.keys().collect();
        assert_eq!(names, ["LATIN TOPPING BAR"]);
    }

    #[test]
    fn test_available_dates_sorted() {
        let calendar: MenuCalendar = serde_json::from_str(
            r#"{ "2025-04-02": { "Lunch": {} }, "2025-03-28": { "Lunch": {} } }"#,
        )
        .unwrap();
        assert_eq!(available_dates(&calendar), ["2025-03-28", "2025-04-02"]);
    }

    #[test]
    fn test_enrich_stations_preserves_order() {
        let day: DayMenu = serde_json::from_str(
            r#"
{
  "Lunch": {
    "Grill": [{ "menuRowName": "Burger" }, { "menuRowName": "Fries" }],
    "Salad Bar": [{ "menuRowName": "House Salad" }]
  }
}
"#,
        )
        .unwrap();
        let stations = meal_stations(&day, Meal::Lunch, None).unwrap();
        let sections = enrich_stations(&stations, &IndexMap::new(), &IndexMap::new());
        let names: Vec<&String> = sections.keys().collect();
        assert_eq!(names, ["Grill", "Salad Bar"]);
        assert_eq!(sections["Grill"][0].display_name, "Burger");
        assert_eq!(sections["Grill"][1].display_name, "Fries");
    }
}
