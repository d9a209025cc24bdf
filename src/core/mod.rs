//! Core menu pipeline — data model, dates, enrichment, flattening, and the
//! calorie-counter state.

pub mod allergens;
pub mod config;
pub mod dates;
pub mod enrich;
pub mod menu;
pub mod tracker;
pub mod types;
