use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{CategoryValue, EmployeeTable, GroupField};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category → Color32
// ---------------------------------------------------------------------------

/// Fields whose values appear as bars or boxes.
const CHARTED_FIELDS: [GroupField; 4] = [
    GroupField::Attrition,
    GroupField::Department,
    GroupField::OverTime,
    GroupField::WorkLifeBalance,
];

/// One colour per category value, shared by every chart so a value keeps
/// its colour across panels and filter changes.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<CategoryValue, Color32>,
    default_color: Color32,
}

impl Default for CategoryColors {
    fn default() -> Self {
        CategoryColors {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl CategoryColors {
    pub fn new(values: &BTreeSet<CategoryValue>) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();
        CategoryColors {
            mapping,
            ..Default::default()
        }
    }

    /// Colours for every charted value in the unfiltered table.
    pub fn for_table(table: &EmployeeTable) -> Self {
        let values: BTreeSet<CategoryValue> = CHARTED_FIELDS
            .iter()
            .flat_map(|&field| table.unique_values(field))
            .collect();
        Self::new(&values)
    }

    /// Look up the colour for a category value.
    pub fn color_for(&self, value: &CategoryValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
