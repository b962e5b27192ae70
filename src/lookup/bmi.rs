//! BMI computation and BMI-table classification
//!
//! Some carriers publish their build guidance as BMI bands instead of
//! height/weight grids. The walk is the same best-to-worst scan as the
//! weight path, but bands are height-independent and thresholds are BMI
//! values rather than pounds.

use serde::{Deserialize, Serialize};

use crate::lookup::build::RatingLookupResult;
use crate::rating::{RatingClass, PRIME_CLASSES, TABLE_CLASSES};
use crate::table::{feet_and_inches_to_inches, BmiTable};

/// US-unit BMI, rounded to one decimal. Returns 0.0 when height or weight
/// is zero, which callers treat as "not computable".
pub fn calculate_bmi(height_feet: u32, height_inches: u32, weight_lbs: u32) -> f64 {
    let total_inches = feet_and_inches_to_inches(height_feet, height_inches);
    if total_inches == 0 || weight_lbs == 0 {
        return 0.0;
    }
    let inches = total_inches as f64;
    round_to_tenth((weight_lbs as f64 * 703.0) / (inches * inches))
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// WHO descriptive category for a BMI value
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else if bmi < 35.0 {
        "Obese Class I"
    } else if bmi < 40.0 {
        "Obese Class II"
    } else {
        "Obese Class III"
    }
}

/// Verdict of a BMI-table lookup. Thresholds are BMI-denominated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiLookupResult {
    pub rating_class: RatingClass,
    pub has_table: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_exceeded: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_class: Option<RatingClass>,
}

impl BmiLookupResult {
    pub fn unknown(has_table: bool) -> Self {
        Self {
            rating_class: RatingClass::Unknown,
            has_table,
            threshold_exceeded: None,
            threshold_class: None,
        }
    }

    /// Collapse into the weight-table result shape.
    ///
    /// `threshold_exceeded` does not carry over: it is a BMI value here and
    /// a pound value there. Callers that need the BMI threshold keep the
    /// original result.
    pub fn into_rating_result(self) -> RatingLookupResult {
        RatingLookupResult {
            rating_class: self.rating_class,
            has_table: self.has_table,
            threshold_exceeded: None,
            threshold_class: self.threshold_class,
        }
    }
}

/// Classify an applicant against a BMI table.
///
/// A missing table reads as `has_table = false`; a table with no rateable
/// bands, or an uncomputable BMI, reads as unknown with `has_table = true`.
pub fn lookup_bmi_rating(
    height_feet: u32,
    height_inches: u32,
    weight_lbs: u32,
    bmi_table: Option<&BmiTable>,
) -> BmiLookupResult {
    let table = match bmi_table {
        Some(table) => table,
        None => return BmiLookupResult::unknown(false),
    };

    if !table.keys().any(|class| class.is_rateable()) {
        return BmiLookupResult::unknown(true);
    }

    let client_bmi = calculate_bmi(height_feet, height_inches, weight_lbs);
    if client_bmi <= 0.0 {
        return BmiLookupResult::unknown(true);
    }

    for (idx, &class) in PRIME_CLASSES.iter().enumerate() {
        if let Some(range) = table.get(&class) {
            if range.contains(client_bmi) {
                let threshold_class = if idx == 0 { None } else { Some(PRIME_CLASSES[idx - 1]) };
                return BmiLookupResult {
                    rating_class: class,
                    has_table: true,
                    threshold_exceeded: threshold_class
                        .and_then(|better| table.get(&better))
                        .and_then(|range| range.max),
                    threshold_class,
                };
            }
        }
    }

    let standard_max = table
        .get(&RatingClass::Standard)
        .and_then(|range| range.max);

    let mut prev_class = RatingClass::Standard;
    for &class in TABLE_CLASSES.iter() {
        if let Some(range) = table.get(&class) {
            if range.contains(client_bmi) {
                return BmiLookupResult {
                    rating_class: class,
                    has_table: true,
                    threshold_exceeded: standard_max,
                    threshold_class: Some(prev_class),
                };
            }
            prev_class = class;
        }
    }

    BmiLookupResult {
        rating_class: RatingClass::TableRated,
        has_table: true,
        threshold_exceeded: standard_max,
        threshold_class: Some(prev_class),
    }
}
