//! Venue configuration — YAML parsing and validation.
//!
//! The per-venue variants of this pipeline differ only in which venue block
//! to select per meal period, how categories are renamed, which categories
//! are dropped, and whether empty stations are filtered. All of that is
//! data, not code: one shared pipeline driven by a `VenueConfig`.

use crate::core::types::Meal;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// One venue's rendering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueConfig {
    /// Human-readable venue name.
    pub name: String,

    /// Meal period → the `menuName` of the venue block carrying that meal.
    /// Empty for venues whose calendar is already in direct station-map
    /// form.
    #[serde(default)]
    pub meals: IndexMap<Meal, String>,

    /// Category rename table, applied after flattening.
    #[serde(default)]
    pub rename: IndexMap<String, String>,

    /// Categories dropped entirely.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Drop stations with zero items before rendering (the filtering
    /// variant); all-empty then shows its own placeholder.
    #[serde(default)]
    pub drop_empty_stations: bool,
}

impl VenueConfig {
    /// The venue-block `menuName` to select for a meal, if configured.
    pub fn menu_name_for(&self, meal: Meal) -> Option<&str> {
        self.meals.get(&meal).map(String::as_str)
    }
}

/// Parse a venue config file from disk.
pub fn parse_config_file(path: &Path) -> Result<VenueConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a venue config from a YAML string.
pub fn parse_config(yaml: &str) -> Result<VenueConfig, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &VenueConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.name.is_empty() {
        errors.push(ValidationError {
            message: "name must not be empty".to_string(),
        });
    }

    for (meal, menu_name) in &config.meals {
        if menu_name.is_empty() {
            errors.push(ValidationError {
                message: format!("meal '{}' has an empty menuName", meal),
            });
        }
    }

    for (from, to) in &config.rename {
        if from == to {
            errors.push(ValidationError {
                message: format!("category '{}' renames to itself", from),
            });
        }
        if config.exclude.contains(to) {
            errors.push(ValidationError {
                message: format!(
                    "rename target '{}' (from '{}') is in the exclude list",
                    to, from
                ),
            });
        }
    }

    errors
}
