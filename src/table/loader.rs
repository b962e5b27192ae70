//! Loading build tables and charts from disk

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::chart::BuildChart;
use crate::table::codec::parse_build_table_csv;
use crate::table::data::BuildTableData;

/// Default carrier table shipped with the repo, used by demos and tests
pub const DEFAULT_BUILD_TABLE_PATH: &str = "data/build_tables/sample_carrier.csv";

#[derive(Debug, Error)]
pub enum BuildTableFileError {
    #[error("failed to read build table file: {0}")]
    Io(#[from] std::io::Error),

    #[error("build table CSV is invalid: {}", .errors.join("; "))]
    Parse { errors: Vec<String> },

    #[error("failed to parse build chart JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load and parse a build-table CSV.
///
/// Row-level problems that still leave a usable table are logged as warnings;
/// a CSV with no usable rows is an error.
pub fn load_build_table<P: AsRef<Path>>(path: P) -> Result<BuildTableData, BuildTableFileError> {
    let content = fs::read_to_string(path)?;
    let result = parse_build_table_csv(&content);

    for warning in &result.warnings {
        log::warn!("{}", warning);
    }

    match result.data {
        Some(data) => {
            for error in &result.errors {
                log::warn!("skipped row: {}", error);
            }
            Ok(data)
        }
        None => Err(BuildTableFileError::Parse { errors: result.errors }),
    }
}

/// Load a carrier chart from a JSON file
pub fn load_build_chart<P: AsRef<Path>>(path: P) -> Result<BuildChart, BuildTableFileError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
