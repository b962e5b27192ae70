//! Actionable "lose X lbs to reach the next tier" guidance

use serde::{Deserialize, Serialize};

use crate::lookup::bmi::{calculate_bmi, lookup_bmi_rating, round_to_tenth};
use crate::lookup::build::lookup_build_rating;
use crate::lookup::locator::find_row_for_height;
use crate::rating::RatingClass;
use crate::table::{feet_and_inches_to_inches, BmiTable, BuildTableRow};

/// Max weight in pounds at which a table offers a class for a height, if the
/// governing row carries a ceiling for that class
pub fn weight_for_rating(
    height_feet: u32,
    height_inches: u32,
    target_rating: RatingClass,
    build_table: &[BuildTableRow],
) -> Option<u32> {
    if build_table.is_empty() {
        return None;
    }
    let total_height_inches = feet_and_inches_to_inches(height_feet, height_inches);
    let row = find_row_for_height(total_height_inches, build_table)?;
    row.max_weight(target_rating)
}

/// Guidance toward the next better rating tier.
///
/// `weight_to_next_rating` is strictly positive when present; an applicant
/// already under the next tier's ceiling gets the ceiling without a number
/// to lose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightGuidance {
    pub current_rating: RatingClass,
    pub next_better_rating: Option<RatingClass>,
    pub weight_to_next_rating: Option<u32>,
    pub max_weight_for_next_rating: Option<u32>,
}

/// Compute weight guidance for an applicant.
///
/// None when no table is configured or the lookup produced no verdict. The
/// best class gets a guidance object with nothing left to reach. When the
/// next tier exists but the table carries no ceiling for it, the tier is
/// still named with both numbers absent.
pub fn weight_guidance(
    height_feet: u32,
    height_inches: u32,
    weight_lbs: u32,
    build_table: &[BuildTableRow],
) -> Option<WeightGuidance> {
    let current = lookup_build_rating(height_feet, height_inches, weight_lbs, build_table);
    if !current.has_table || current.rating_class == RatingClass::Unknown {
        return None;
    }

    if current.rating_class == RatingClass::PreferredPlus {
        return Some(WeightGuidance {
            current_rating: RatingClass::PreferredPlus,
            next_better_rating: None,
            weight_to_next_rating: None,
            max_weight_for_next_rating: None,
        });
    }

    let next_better = current.rating_class.next_better()?;
    let max_for_next = match weight_for_rating(height_feet, height_inches, next_better, build_table)
    {
        Some(max) => max,
        None => {
            return Some(WeightGuidance {
                current_rating: current.rating_class,
                next_better_rating: Some(next_better),
                weight_to_next_rating: None,
                max_weight_for_next_rating: None,
            });
        }
    };

    let weight_to_lose = weight_lbs.saturating_sub(max_for_next);
    Some(WeightGuidance {
        current_rating: current.rating_class,
        next_better_rating: Some(next_better),
        weight_to_next_rating: (weight_to_lose > 0).then_some(weight_to_lose),
        max_weight_for_next_rating: Some(max_for_next),
    })
}

/// BMI-table counterpart of [`WeightGuidance`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiGuidance {
    pub current_rating: RatingClass,
    pub current_bmi: f64,
    pub next_better_rating: Option<RatingClass>,
    pub bmi_to_next_rating: Option<f64>,
    pub max_bmi_for_next_rating: Option<f64>,
}

/// Compute BMI guidance for an applicant against a BMI table
pub fn bmi_guidance(
    height_feet: u32,
    height_inches: u32,
    weight_lbs: u32,
    bmi_table: Option<&BmiTable>,
) -> Option<BmiGuidance> {
    let current = lookup_bmi_rating(height_feet, height_inches, weight_lbs, bmi_table);
    if !current.has_table || current.rating_class == RatingClass::Unknown {
        return None;
    }

    let current_bmi = calculate_bmi(height_feet, height_inches, weight_lbs);

    if current.rating_class == RatingClass::PreferredPlus {
        return Some(BmiGuidance {
            current_rating: RatingClass::PreferredPlus,
            current_bmi,
            next_better_rating: None,
            bmi_to_next_rating: None,
            max_bmi_for_next_rating: None,
        });
    }

    let next_better = current.rating_class.next_better()?;
    let max_bmi_for_next = bmi_table
        .and_then(|table| table.get(&next_better))
        .and_then(|range| range.max);

    let max_bmi_for_next = match max_bmi_for_next {
        Some(max) => max,
        None => {
            return Some(BmiGuidance {
                current_rating: current.rating_class,
                current_bmi,
                next_better_rating: Some(next_better),
                bmi_to_next_rating: None,
                max_bmi_for_next_rating: None,
            });
        }
    };

    let bmi_reduction = current_bmi - max_bmi_for_next;
    Some(BmiGuidance {
        current_rating: current.rating_class,
        current_bmi,
        next_better_rating: Some(next_better),
        bmi_to_next_rating: (bmi_reduction > 0.0).then(|| round_to_tenth(bmi_reduction)),
        max_bmi_for_next_rating: Some(max_bmi_for_next),
    })
}
