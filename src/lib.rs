//! Underwriting Engine - Build-table classification for life insurance underwriting
//!
//! This library provides:
//! - Carrier build-table CSV import/export with forgiving, total parsing
//! - Height/weight rating classification with threshold reporting
//! - BMI-based classification for carriers that publish BMI bands
//! - Weight and BMI guidance toward the next better rating tier
//! - Comparison of AI-estimated ratings against table verdicts

pub mod chart;
pub mod lookup;
pub mod rating;
pub mod table;

// Re-export commonly used types
pub use chart::{lookup_rating_unified, BuildChart, BuildTableType};
pub use lookup::{
    bmi_guidance, calculate_bmi, lookup_bmi_rating, lookup_build_rating, weight_guidance,
    BmiGuidance, RatingLookupResult, WeightGuidance,
};
pub use rating::{rating_comparison_message, ratings_match, RatingClass};
pub use table::{
    export_build_table_to_csv, generate_csv_template, parse_build_table_csv, BuildTableData,
    BuildTableRow, CsvParseResult, WeightRange,
};
