//! Date resolution — today's key, closest-date fallback, display formatting,
//! and the hour-based meal-period pick.

use crate::core::types::Meal;
use chrono::{Local, NaiveDate, Timelike};

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Today's local calendar date as a `YYYY-MM-DD` key.
pub fn today_key() -> String {
    Local::now().format(KEY_FORMAT).to_string()
}

fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), KEY_FORMAT).ok()
}

/// The member of `dates` closest in absolute time to `target`.
///
/// Returns `None` when `dates` is empty or `target` does not parse.
/// Ties go to the first minimal element in input order; unparseable
/// candidates are treated as infinitely far.
pub fn closest_date(dates: &[String], target: &str) -> Option<String> {
    let target = parse_key(target)?;
    dates
        .iter()
        .min_by_key(|key| {
            parse_key(key).map_or(i64::MAX, |date| {
                date.signed_duration_since(target).num_days().abs()
            })
        })
        .cloned()
}

/// Render a date key as `"<Weekday>, <Month> <Day>, <Year>"`.
///
/// Malformed keys degrade to the literal `"Invalid Date"` — the string is
/// displayed verbatim, never raised as an error.
pub fn format_display(key: &str) -> String {
    match parse_key(key) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Meal period for an hour of the day: breakfast in `[5,11)`, lunch in
/// `[11,16)`, dinner otherwise.
pub fn meal_for_hour(hour: u32) -> Meal {
    match hour {
        5..=10 => Meal::Breakfast,
        11..=15 => Meal::Lunch,
        _ => Meal::Dinner,
    }
}

/// Meal period for the current local wall-clock time.
pub fn current_meal() -> Meal {
    meal_for_hour(Local::now().hour())
}
