//! Weight classification against a build table row

use serde::{Deserialize, Serialize};

use crate::lookup::locator::find_row_for_height;
use crate::rating::{RatingClass, PRIME_CLASSES, TABLE_CLASSES};
use crate::table::{feet_and_inches_to_inches, BuildTableRow};

/// Verdict of a height/weight lookup.
///
/// `has_table` distinguishes "no table configured" from "table consulted but
/// no determination". When a tier better than the verdict exists,
/// `threshold_class` names it and `threshold_exceeded` carries its max weight
/// in pounds, when that tier has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLookupResult {
    pub rating_class: RatingClass,
    pub has_table: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_exceeded: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_class: Option<RatingClass>,
}

impl RatingLookupResult {
    /// Result carrying no verdict
    pub fn unknown(has_table: bool) -> Self {
        Self {
            rating_class: RatingClass::Unknown,
            has_table,
            threshold_exceeded: None,
            threshold_class: None,
        }
    }
}

/// Classify a weight against one row, walking classes best to worst.
///
/// A class is considered only when the row offers a band for it. Prime
/// matches below the best tier report the next-better prime class and its
/// max. Lettered-table matches and the table_rated fall-through report the
/// standard max as the exceeded threshold and, as the threshold class, the
/// last lettered table passed over (or standard when none was present).
pub fn rating_from_row(weight_lbs: u32, row: &BuildTableRow) -> RatingLookupResult {
    for (idx, &class) in PRIME_CLASSES.iter().enumerate() {
        if let Some(range) = row.range(class) {
            if range.contains(weight_lbs) {
                let threshold_class = if idx == 0 { None } else { Some(PRIME_CLASSES[idx - 1]) };
                return RatingLookupResult {
                    rating_class: class,
                    has_table: true,
                    threshold_exceeded: threshold_class.and_then(|better| row.max_weight(better)),
                    threshold_class,
                };
            }
        }
    }

    let mut prev_class = RatingClass::Standard;
    for &class in TABLE_CLASSES.iter() {
        if let Some(range) = row.range(class) {
            if range.contains(weight_lbs) {
                return RatingLookupResult {
                    rating_class: class,
                    has_table: true,
                    threshold_exceeded: row.max_weight(RatingClass::Standard),
                    threshold_class: Some(prev_class),
                };
            }
            prev_class = class;
        }
    }

    // Heavier than every band the row offers
    RatingLookupResult {
        rating_class: RatingClass::TableRated,
        has_table: true,
        threshold_exceeded: row.max_weight(RatingClass::Standard),
        threshold_class: Some(prev_class),
    }
}

/// Look up the rating class for an applicant's height and weight.
///
/// Height is clamped to the table's covered range, so very short or very
/// tall applicants rate against the nearest edge row.
pub fn lookup_build_rating(
    height_feet: u32,
    height_inches: u32,
    weight_lbs: u32,
    build_table: &[BuildTableRow],
) -> RatingLookupResult {
    if build_table.is_empty() {
        return RatingLookupResult::unknown(false);
    }

    let total_height_inches = feet_and_inches_to_inches(height_feet, height_inches);

    let row = match find_row_for_height(total_height_inches, build_table) {
        Some(row) => row,
        // Table exists but produced no governing row
        None => return RatingLookupResult::unknown(true),
    };

    if !row.has_weight_data() {
        return RatingLookupResult::unknown(true);
    }

    rating_from_row(weight_lbs, row)
}
