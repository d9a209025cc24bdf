//! Selection tracker — the calorie counter's portion state.
//!
//! An explicit state object with mutation methods, replacing the page-scope
//! globals of earlier variants. Entries are unique by (recipe id, row name),
//! held in selection order, and removed outright when their count reaches
//! zero. Lives only in memory for the duration of a session.

use crate::core::types::{EnrichedItem, NutritionFacts, PortionSize};

/// One selected menu item with its portion count.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub recipe_id: Option<String>,
    pub menu_row_name: Option<String>,
    pub display_name: String,
    pub nutrition: Option<NutritionFacts>,
    pub portion: PortionSize,
    pub portion_count: u32,
}

/// Aggregate nutrition across all selections. Each contribution is the
/// item's per-portion value times its portion count, rounded per item
/// before summation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    items: Vec<SelectedItem>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn position(&self, item: &EnrichedItem) -> Option<usize> {
        self.items.iter().position(|selected| {
            selected.recipe_id == item.recipe_id && selected.menu_row_name == item.menu_row_name
        })
    }

    /// Current portion count for an item; 0 when unselected.
    pub fn count_for(&self, item: &EnrichedItem) -> u32 {
        self.position(item)
            .map_or(0, |index| self.items[index].portion_count)
    }

    /// Step an item's portion count. Increase inserts at count 1 when the
    /// item is absent; decrease drops the entry entirely at count 0, and
    /// decreasing an absent item is a no-op.
    pub fn adjust(&mut self, item: &EnrichedItem, increase: bool) {
        match self.position(item) {
            None if increase => self.items.push(SelectedItem {
                recipe_id: item.recipe_id.clone(),
                menu_row_name: item.menu_row_name.clone(),
                display_name: item.display_name.clone(),
                nutrition: item.nutrition.clone(),
                portion: item.portion.clone(),
                portion_count: 1,
            }),
            None => {}
            Some(index) if increase => self.items[index].portion_count += 1,
            Some(index) => {
                self.items[index].portion_count -= 1;
                if self.items[index].portion_count == 0 {
                    self.items.remove(index);
                }
            }
        }
    }

    /// Remove the entry at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Per-item contributions rounded before summation. Items without
    /// nutrition data contribute nothing (never a silent zero for display,
    /// but absent data cannot add to a sum).
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for item in &self.items {
            let Some(nutrition) = &item.nutrition else {
                continue;
            };
            let count = i64::from(item.portion_count);
            totals.calories += per_item(nutrition.calories, count);
            totals.protein += per_item(nutrition.protein, count);
            totals.carbs += per_item(nutrition.carbs, count);
            totals.fat += per_item(nutrition.fat, count);
        }
        totals
    }
}

// Per-portion values are already integers, so the per-item rounding the
// totals contract requires reduces to an exact multiply.
fn per_item(value: i64, count: i64) -> i64 {
    value * count
}
