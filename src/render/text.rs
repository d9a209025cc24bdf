//! Terminal renderer.

use crate::core::allergens;
use crate::core::tracker::SelectionTracker;
use crate::core::types::{EnrichedItem, MealSections};
use crate::render::{placeholder, visible_sections, RenderOptions, NO_MEAL_DATA};
use std::fmt::Write;

/// Render one meal's stations as plain text. Stations keep their
/// insertion order; the fixed placeholder replaces an empty meal.
pub fn render_meal(meal: Option<&MealSections>, opts: RenderOptions) -> String {
    let Some(meal) = meal else {
        return format!("{}\n", NO_MEAL_DATA);
    };
    if let Some(message) = placeholder(Some(meal), opts) {
        return format!("{}\n", message);
    }

    let mut out = String::new();
    for (station, items) in visible_sections(meal, opts.filter_empty) {
        let _ = writeln!(out, "{}", station);
        for item in items {
            let _ = writeln!(out, "  {}{}", item.display_name, inline_tags(item));
            if opts.details {
                write_details(&mut out, item);
            }
        }
        out.push('\n');
    }
    out
}

/// Up to two icon labels inline, with a `...` marker past two allergens.
fn inline_tags(item: &EnrichedItem) -> String {
    let icons = allergens::icons_for(&item.allergens);
    if icons.is_empty() {
        return String::new();
    }
    let mut tags = String::new();
    if item.allergens.len() <= 2 {
        for icon in &icons {
            let _ = write!(tags, " [{}]", icon.label);
        }
    } else {
        for icon in icons.iter().take(2) {
            let _ = write!(tags, " [{}]", icon.label);
        }
        tags.push_str(" ...");
    }
    tags
}

/// Detail block: nutrition grid, ingredients, and the full allergen list.
/// Emitted only when the item actually has something to show.
fn write_details(out: &mut String, item: &EnrichedItem) {
    if item.nutrition.is_none() && item.allergens.is_empty() {
        return;
    }

    if let Some(n) = &item.nutrition {
        let _ = writeln!(
            out,
            "      {} Cal | Protein {}g | Carbs {}g | Fat {}g | Fiber {}g | Sugar {}g | Sodium {}mg",
            n.calories, n.protein, n.carbs, n.fat, n.fiber, n.sugar, n.sodium
        );
    }

    if let Some(ingredients) = &item.ingredients {
        let _ = writeln!(out, "      Ingredients: {}", ingredients.join(", "));
    }

    if !item.allergens.is_empty() {
        let names: Vec<&str> = allergens::icons_for(&item.allergens)
            .iter()
            .map(|icon| icon.name)
            .collect();
        if !names.is_empty() {
            let _ = writeln!(out, "      Allergens: {}", names.join(", "));
        }
    }
}

/// Calorie-counting view: every item numbered for the stepper loop, with
/// its portion label and current count. Returns the text plus the items in
/// index order.
pub fn render_counter(
    meal: &MealSections,
    tracker: &SelectionTracker,
    opts: RenderOptions,
) -> (String, Vec<EnrichedItem>) {
    let mut out = String::new();
    let mut indexed = Vec::new();

    if let Some(message) = placeholder(Some(meal), opts) {
        let _ = writeln!(out, "{}", message);
        return (out, indexed);
    }

    for (station, items) in visible_sections(meal, opts.filter_empty) {
        let _ = writeln!(out, "{}", station);
        for item in items {
            let _ = writeln!(
                out,
                "  [{}] {} ({}) x{}",
                indexed.len() + 1,
                item.display_name,
                item.portion,
                tracker.count_for(item)
            );
            indexed.push(item.clone());
        }
        out.push('\n');
    }
    (out, indexed)
}

/// The selection summary table with per-item lines and the running totals
/// row. Rebuilt in full on every mutation.
pub fn render_summary(tracker: &SelectionTracker) -> String {
    if tracker.is_empty() {
        return "No items selected.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:<16} {:>8} {:>8} {:>8} {:>8}",
        "Item", "Portions", "Calories", "Protein", "Carbs", "Fat"
    );
    for item in tracker.items() {
        let portions = format!("{} x {}", item.portion_count, item.portion);
        let count = i64::from(item.portion_count);
        let (calories, protein, carbs, fat) = match &item.nutrition {
            Some(n) => (
                (n.calories * count).to_string(),
                format!("{}g", n.protein * count),
                format!("{}g", n.carbs * count),
                format!("{}g", n.fat * count),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string(), "-".to_string()),
        };
        let _ = writeln!(
            out,
            "{:<32} {:<16} {:>8} {:>8} {:>8} {:>8}",
            item.display_name, portions, calories, protein, carbs, fat
        );
    }

    let totals = tracker.totals();
    let _ = writeln!(
        out,
        "{:<32} {:<16} {:>8} {:>7}g {:>7}g {:>7}g",
        "Total", "", totals.calories, totals.protein, totals.carbs, totals.fat
    );
    out
}
