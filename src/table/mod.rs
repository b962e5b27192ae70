//! Build table data structures, CSV codec, and file loading

mod codec;
mod data;
mod height;
pub mod loader;

pub use codec::{
    export_build_table_to_csv, generate_csv_template, parse_build_table_csv, parse_weight_value,
    CsvParseResult,
};
pub use data::{
    active_bmi_classes, active_rating_classes, filter_by_classes, sorted_by_height, BmiRange,
    BmiTable, BuildTableData, BuildTableRow, WeightRange,
};
pub use height::{
    feet_and_inches_to_inches, format_height_for_csv, inches_to_feet_and_inches,
    parse_height_string, supported_heights, MAX_TABLE_HEIGHT_INCHES, MIN_TABLE_HEIGHT_INCHES,
};
pub use loader::{load_build_chart, load_build_table, BuildTableFileError};
