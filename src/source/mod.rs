//! Document sources — local files and HTTP URLs.
//!
//! All three input documents are static JSON fetched read-only. Fetches are
//! sequential and every required document must load before any rendering
//! happens; a failure is terminal for the command (no retry, no partial
//! rendering).

pub mod http;
pub mod local;

use crate::core::types::{IngredientCatalog, MenuCalendar, RecipeCatalog};
use serde::de::DeserializeOwned;
use std::path::Path;

/// The three lookup tables, loaded and ready to query.
#[derive(Debug, Clone, Default)]
pub struct MenuData {
    pub calendar: MenuCalendar,
    pub recipes: RecipeCatalog,
    pub ingredients: IngredientCatalog,
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch and parse one JSON document from a path or URL.
pub fn fetch<T: DeserializeOwned>(source: &str) -> Result<T, String> {
    let text = if is_url(source) {
        http::fetch_text(source)?
    } else {
        local::read_text(Path::new(source))?
    };
    serde_json::from_str(&text).map_err(|e| format!("invalid JSON from {}: {}", source, e))
}

/// Load the menu calendar plus the optional recipe and ingredient catalogs.
/// Missing catalog sources yield empty catalogs; any actual fetch or parse
/// failure aborts the whole load.
pub fn load_documents(
    menu: &str,
    recipes: Option<&str>,
    ingredients: Option<&str>,
) -> Result<MenuData, String> {
    let load = || -> Result<MenuData, String> {
        let calendar = fetch(menu)?;
        let recipes = match recipes {
            Some(source) => fetch(source)?,
            None => RecipeCatalog::default(),
        };
        let ingredients = match ingredients {
            Some(source) => fetch(source)?,
            None => IngredientCatalog::default(),
        };
        Ok(MenuData {
            calendar,
            recipes,
            ingredients,
        })
    };
    load().map_err(|e| format!("Error loading menu data: {}", e))
}
