//! Static-HTML renderer.
//!
//! Emits the same class vocabulary the hosted page uses (section-heading,
//! menu-item, tag-icons, nutrition-details, ...) so the output can drop
//! into the existing stylesheet. The detail block is emitted whenever an
//! item has nutrition or allergens; showing and hiding it is the page's
//! concern.

use crate::core::allergens::{self, AllergenIcon};
use crate::core::dates;
use crate::core::types::{EnrichedItem, Meal, MealSections};
use crate::render::{placeholder, visible_sections, RenderOptions, NO_MEAL_DATA};
use std::fmt::Write;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn icon_img(icon: &AllergenIcon) -> String {
    format!(
        r#"<img src="{}" alt="{}" title="{}" class="tag-icon-img">"#,
        icon.asset, icon.name, icon.name
    )
}

/// Render one meal's stations as an HTML fragment.
pub fn render_meal(meal: Option<&MealSections>, opts: RenderOptions) -> String {
    let Some(meal) = meal else {
        return escape(NO_MEAL_DATA);
    };
    if let Some(message) = placeholder(Some(meal), opts) {
        return escape(message);
    }

    let mut out = String::new();
    for (station, items) in visible_sections(meal, opts.filter_empty) {
        let _ = writeln!(out, "<div>");
        let _ = writeln!(
            out,
            r#"<h3 class="section-heading">{}</h3>"#,
            escape(station)
        );
        let _ = writeln!(out, "<ul>");
        for item in items {
            write_item(&mut out, item);
        }
        let _ = writeln!(out, "</ul>");
        let _ = writeln!(out, "</div>");
    }
    out
}

fn write_item(out: &mut String, item: &EnrichedItem) {
    let icons = allergens::icons_for(&item.allergens);
    let has_info = item.nutrition.is_some() || !item.allergens.is_empty();

    let _ = write!(out, r#"<li class="menu-item">"#);
    let _ = write!(
        out,
        r#"<span class="menu-item-name">{}</span>"#,
        escape(&item.display_name)
    );

    let _ = write!(out, r#"<span class="tag-icons">"#);
    if item.allergens.len() <= 2 {
        for icon in &icons {
            let _ = write!(out, "{}", icon_img(icon));
        }
    } else {
        for icon in icons.iter().take(2) {
            let _ = write!(out, "{}", icon_img(icon));
        }
        let _ = write!(
            out,
            r#"<span class="more-allergens" title="More allergens">...</span>"#
        );
    }
    let _ = write!(out, "</span>");

    if has_info {
        write_details(out, item, &icons);
    }
    let _ = writeln!(out, "</li>");
}

fn write_details(out: &mut String, item: &EnrichedItem, icons: &[&'static AllergenIcon]) {
    let _ = write!(out, r#"<div class="nutrition-details"><div class="nutrition-grid">"#);

    if let Some(n) = &item.nutrition {
        let cells = [
            ("Calories", format!("{} Cal", n.calories)),
            ("Protein", format!("{}g", n.protein)),
            ("Carbs", format!("{}g", n.carbs)),
            ("Fat", format!("{}g", n.fat)),
            ("Fiber", format!("{}g", n.fiber)),
            ("Sugar", format!("{}g", n.sugar)),
            ("Sodium", format!("{}mg", n.sodium)),
        ];
        for (label, value) in cells {
            let _ = write!(
                out,
                r#"<div class="nutrition-item"><span class="nutrition-label">{}</span><span class="nutrition-value">{}</span></div>"#,
                label, value
            );
        }
    }

    if let Some(ingredients) = &item.ingredients {
        let _ = write!(
            out,
            r#"<div class="nutrition-item ingredients-section"><span class="nutrition-label">Ingredients</span><div class="ingredients-list">"#
        );
        for ingredient in ingredients {
            let _ = write!(
                out,
                r#"<span class="ingredient-item">{}</span>"#,
                escape(ingredient)
            );
        }
        let _ = write!(out, "</div></div>");
    }

    if !item.allergens.is_empty() && !icons.is_empty() {
        let _ = write!(
            out,
            r#"<div class="nutrition-item allergens-section"><span class="nutrition-label">Allergens</span><div class="allergen-icons">"#
        );
        for icon in icons {
            let _ = write!(out, "{}", icon_img(icon));
        }
        let _ = write!(out, "</div></div>");
    }

    let _ = write!(out, "</div></div>");
}

/// A whole day as one fragment: the display-date header plus one section
/// per requested meal.
pub fn render_day(
    date_key: &str,
    meals: &[(Meal, Option<MealSections>)],
    opts: RenderOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<h2 id="selected-date">{}</h2>"#,
        escape(&dates::format_display(date_key))
    );
    for (meal, sections) in meals {
        let _ = writeln!(out, r#"<div class="meal-section" id="{}">"#, meal.key().to_lowercase());
        let _ = writeln!(out, "<h2>{}</h2>", meal);
        let _ = write!(out, "{}", render_meal(sections.as_ref(), opts));
        let _ = writeln!(out, "</div>");
    }
    out
}
