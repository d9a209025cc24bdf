//! Fixed allergen/dietary tag table.
//!
//! Allergen names coming out of recipe records map to display icons here.
//! Unmapped names simply produce no icon — new upstream tags are not an
//! error.

/// One displayable tag: the canonical name, a short text label for
/// terminal output, and the icon asset path for HTML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllergenIcon {
    pub name: &'static str,
    pub label: &'static str,
    pub asset: &'static str,
}

pub const TAG_ICONS: [AllergenIcon; 15] = [
    AllergenIcon { name: "Vegan", label: "VG", asset: "icons/vegan.svg" },
    AllergenIcon { name: "Vegetarian", label: "V", asset: "icons/vegetarian.svg" },
    AllergenIcon { name: "Gluten", label: "G", asset: "icons/gluten.svg" },
    AllergenIcon { name: "Dairy", label: "D", asset: "icons/dairy.svg" },
    AllergenIcon { name: "Eggs", label: "E", asset: "icons/eggs.svg" },
    AllergenIcon { name: "Soy", label: "S", asset: "icons/soy.svg" },
    AllergenIcon { name: "Peanut", label: "PN", asset: "icons/peanut.svg" },
    AllergenIcon { name: "Tree-Nuts", label: "TN", asset: "icons/treenut.svg" },
    AllergenIcon { name: "Fish", label: "F", asset: "icons/fish.svg" },
    AllergenIcon { name: "Crustacean-Shellfish", label: "SF", asset: "icons/crustacean.svg" },
    AllergenIcon { name: "Alcohol", label: "A", asset: "icons/alcohol.svg" },
    AllergenIcon { name: "Sesame", label: "SE", asset: "icons/sesame.svg" },
    AllergenIcon { name: "Halal", label: "H", asset: "icons/halal.png" },
    AllergenIcon { name: "Low-Carbon-Footprint", label: "LC", asset: "icons/lowcarbonfootprint.svg" },
    AllergenIcon { name: "High-Carbon-Footprint", label: "HC", asset: "icons/highcarbonfootprint.svg" },
];

/// Look up the icon for an allergen name. `None` for unmapped names.
pub fn icon_for(name: &str) -> Option<&'static AllergenIcon> {
    TAG_ICONS.iter().find(|icon| icon.name == name)
}

/// Icons for a list of allergen names, unmapped names dropped.
pub fn icons_for(names: &[String]) -> Vec<&'static AllergenIcon> {
    names.iter().filter_map(|name| icon_for(name)).collect()
}
