//! Rating lookups against carrier tables
//!
//! This module turns an applicant's height and weight into an underwriting
//! verdict:
//! 1. **Row location**: the table row governing a height, with out-of-range
//!    heights clamped to the nearest edge row
//! 2. **Classification**: a best-to-worst walk over the row's weight bands,
//!    with threshold reporting for the tier just missed
//! 3. **Guidance**: how many pounds (or BMI points) separate the applicant
//!    from the next better tier
//!
//! BMI tables get the same treatment through their own walk, since their
//! bands are height-independent and float-valued.
//!
//! # Example
//!
//! ```rust,ignore
//! use underwriting_engine::{lookup_build_rating, weight_guidance};
//!
//! let result = lookup_build_rating(5, 10, 195, &table);
//! // result.rating_class == RatingClass::StandardPlus
//!
//! let guidance = weight_guidance(5, 10, 195, &table).unwrap();
//! println!("lose {:?} lbs for {:?}", guidance.weight_to_next_rating, guidance.next_better_rating);
//! ```

mod bmi;
mod build;
mod guidance;
mod locator;

pub use bmi::{bmi_category, calculate_bmi, lookup_bmi_rating, BmiLookupResult};
pub use build::{lookup_build_rating, rating_from_row, RatingLookupResult};
pub use guidance::{
    bmi_guidance, weight_for_rating, weight_guidance, BmiGuidance, WeightGuidance,
};
pub use locator::find_row_for_height;
