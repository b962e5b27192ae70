//! Build table row model and table-level transformations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rating::{RatingClass, RATING_CLASS_ORDER};

/// Weight band in whole pounds for one rating class.
///
/// A missing min means "no lower bound" (treated as 0); a missing max means
/// "no upper bound". Carrier CSVs carry max-only bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeightRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl WeightRange {
    /// Band with an upper bound only, the shape CSV imports produce
    pub fn max_only(max: u32) -> Self {
        Self { min: None, max: Some(max) }
    }

    /// Whether a weight falls inside the band, bounds inclusive
    pub fn contains(&self, weight_lbs: u32) -> bool {
        let min = self.min.unwrap_or(0);
        match self.max {
            Some(max) => weight_lbs >= min && weight_lbs <= max,
            None => weight_lbs >= min,
        }
    }
}

/// One height row of a carrier build table.
///
/// Classes without an entry in `weight_ranges` are simply not offered at this
/// height; the classification walk skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTableRow {
    pub height_inches: u32,
    pub weight_ranges: BTreeMap<RatingClass, WeightRange>,
}

impl BuildTableRow {
    pub fn new(height_inches: u32) -> Self {
        Self {
            height_inches,
            weight_ranges: BTreeMap::new(),
        }
    }

    /// The band for a class, if this row offers one
    pub fn range(&self, class: RatingClass) -> Option<WeightRange> {
        self.weight_ranges.get(&class).copied()
    }

    /// The band's upper bound for a class, if both exist
    pub fn max_weight(&self, class: RatingClass) -> Option<u32> {
        self.weight_ranges.get(&class).and_then(|range| range.max)
    }

    pub fn has_weight_data(&self) -> bool {
        !self.weight_ranges.is_empty()
    }
}

/// A full build table: one row per height
pub type BuildTableData = Vec<BuildTableRow>;

/// Copy of the table ordered by ascending height
pub fn sorted_by_height(data: &[BuildTableRow]) -> BuildTableData {
    let mut sorted = data.to_vec();
    sorted.sort_by_key(|row| row.height_inches);
    sorted
}

/// Restrict a table to the given classes, dropping rows left without bands.
///
/// This is the save-time pass applied when a carrier chart only offers a
/// subset of classes: deselected bands disappear, and a height whose every
/// band was deselected disappears with them.
pub fn filter_by_classes(data: &[BuildTableRow], active: &[RatingClass]) -> BuildTableData {
    data.iter()
        .map(|row| BuildTableRow {
            height_inches: row.height_inches,
            weight_ranges: row
                .weight_ranges
                .iter()
                .filter(|(class, _)| active.contains(class))
                .map(|(&class, &range)| (class, range))
                .collect(),
        })
        .filter(BuildTableRow::has_weight_data)
        .collect()
}

/// Rateable classes that appear in at least one row, in severity order
pub fn active_rating_classes(data: &[BuildTableRow]) -> Vec<RatingClass> {
    RATING_CLASS_ORDER
        .iter()
        .copied()
        .filter(|class| class.is_rateable())
        .filter(|class| data.iter().any(|row| row.weight_ranges.contains_key(class)))
        .collect()
}

/// BMI band for one rating class, same absence semantics as [`WeightRange`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BmiRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl BmiRange {
    pub fn max_only(max: f64) -> Self {
        Self { min: None, max: Some(max) }
    }

    /// Whether a BMI value falls inside the band, bounds inclusive
    pub fn contains(&self, bmi: f64) -> bool {
        let min = self.min.unwrap_or(0.0);
        match self.max {
            Some(max) => bmi >= min && bmi <= max,
            None => bmi >= min,
        }
    }
}

/// A BMI-based table: one band per offered class, height-independent
pub type BmiTable = BTreeMap<RatingClass, BmiRange>;

/// Rateable classes with a band in a BMI table, in severity order
pub fn active_bmi_classes(table: &BmiTable) -> Vec<RatingClass> {
    RATING_CLASS_ORDER
        .iter()
        .copied()
        .filter(|class| class.is_rateable())
        .filter(|class| table.contains_key(class))
        .collect()
}
