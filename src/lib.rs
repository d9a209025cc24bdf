//! Mealboard: a dining-hall menu viewer.
//!
//! Date-aware rendering, allergen tags, and a running calorie tally, driven
//! by three static JSON documents and a per-venue YAML config.

pub mod cli;
pub mod core;
pub mod render;
pub mod source;
