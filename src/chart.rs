//! Carrier build charts
//!
//! A chart is a named, persisted table configuration for one carrier: either
//! a height/weight grid or a BMI band table, plus bookkeeping fields. The
//! unified lookup dispatches on the chart's type so product evaluation never
//! cares which kind the carrier publishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lookup::{lookup_bmi_rating, lookup_build_rating, RatingLookupResult};
use crate::rating::RatingClass;
use crate::table::{active_bmi_classes, active_rating_classes, BmiTable, BuildTableData};

/// Which kind of table a chart carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTableType {
    HeightWeight,
    Bmi,
}

impl BuildTableType {
    pub fn label(self) -> &'static str {
        match self {
            BuildTableType::HeightWeight => "Height/Weight",
            BuildTableType::Bmi => "BMI",
        }
    }
}

impl Default for BuildTableType {
    fn default() -> Self {
        BuildTableType::HeightWeight
    }
}

/// A named carrier build chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildChart {
    pub name: String,

    #[serde(default)]
    pub table_type: BuildTableType,

    /// Height/weight rows; empty for BMI charts
    #[serde(default)]
    pub build_data: BuildTableData,

    /// BMI bands; None for height/weight charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_table: Option<BmiTable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether this is the carrier's default chart
    #[serde(default)]
    pub is_default: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BuildChart {
    /// Chart wrapping a height/weight grid
    pub fn height_weight(name: &str, build_data: BuildTableData) -> Self {
        Self {
            name: name.to_string(),
            table_type: BuildTableType::HeightWeight,
            build_data,
            bmi_table: None,
            notes: None,
            is_default: false,
            updated_at: None,
        }
    }

    /// Chart wrapping a BMI band table
    pub fn bmi(name: &str, bmi_table: BmiTable) -> Self {
        Self {
            name: name.to_string(),
            table_type: BuildTableType::Bmi,
            build_data: Vec::new(),
            bmi_table: Some(bmi_table),
            notes: None,
            is_default: false,
            updated_at: None,
        }
    }

    /// Rateable classes the chart actually offers, in severity order
    pub fn active_classes(&self) -> Vec<RatingClass> {
        match self.table_type {
            BuildTableType::HeightWeight => active_rating_classes(&self.build_data),
            BuildTableType::Bmi => self
                .bmi_table
                .as_ref()
                .map(active_bmi_classes)
                .unwrap_or_default(),
        }
    }
}

/// Classify an applicant against whichever table the chart carries.
///
/// BMI verdicts are collapsed into the weight-table result shape; their
/// BMI-denominated thresholds are available via [`lookup_bmi_rating`].
pub fn lookup_rating_unified(
    height_feet: u32,
    height_inches: u32,
    weight_lbs: u32,
    chart: &BuildChart,
) -> RatingLookupResult {
    match chart.table_type {
        BuildTableType::HeightWeight => {
            lookup_build_rating(height_feet, height_inches, weight_lbs, &chart.build_data)
        }
        BuildTableType::Bmi => {
            lookup_bmi_rating(height_feet, height_inches, weight_lbs, chart.bmi_table.as_ref())
                .into_rating_result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::PRIME_CLASSES;
    use crate::table::{BmiRange, BuildTableRow, WeightRange};

    fn weight_chart() -> BuildChart {
        let mut row = BuildTableRow::new(70);
        for (&class, max) in PRIME_CLASSES.iter().zip([150u32, 170, 190, 210]) {
            row.weight_ranges.insert(class, WeightRange::max_only(max));
        }
        BuildChart::height_weight("Carrier A 2024", vec![row])
    }

    fn bmi_chart() -> BuildChart {
        let mut table = BmiTable::new();
        table.insert(RatingClass::PreferredPlus, BmiRange::max_only(25.0));
        table.insert(RatingClass::Preferred, BmiRange::max_only(28.0));
        table.insert(RatingClass::Standard, BmiRange::max_only(34.0));
        BuildChart::bmi("Carrier B BMI", table)
    }

    #[test]
    fn test_unified_lookup_dispatches_on_type() {
        // 5'10" 185 lbs: within the weight grid's standard_plus band,
        // but BMI 26.5 lands in the BMI chart's preferred band
        let result = lookup_rating_unified(5, 10, 185, &weight_chart());
        assert_eq!(result.rating_class, RatingClass::StandardPlus);

        let result = lookup_rating_unified(5, 10, 185, &bmi_chart());
        assert_eq!(result.rating_class, RatingClass::Preferred);
        assert_eq!(result.threshold_exceeded, None);
        assert_eq!(result.threshold_class, Some(RatingClass::PreferredPlus));
    }

    #[test]
    fn test_bmi_chart_without_table_has_no_coverage() {
        let mut chart = bmi_chart();
        chart.bmi_table = None;
        let result = lookup_rating_unified(5, 10, 185, &chart);
        assert_eq!(result.rating_class, RatingClass::Unknown);
        assert!(!result.has_table);
    }

    #[test]
    fn test_active_classes_per_type() {
        assert_eq!(
            weight_chart().active_classes(),
            vec![
                RatingClass::PreferredPlus,
                RatingClass::Preferred,
                RatingClass::StandardPlus,
                RatingClass::Standard
            ]
        );
        assert_eq!(
            bmi_chart().active_classes(),
            vec![
                RatingClass::PreferredPlus,
                RatingClass::Preferred,
                RatingClass::Standard
            ]
        );
    }

    #[test]
    fn test_chart_serde_round_trip() {
        let mut chart = weight_chart();
        chart.notes = Some("from carrier underwriting guide".to_string());
        chart.is_default = true;
        chart.updated_at = Some("2024-11-02T16:45:00Z".parse().unwrap());

        let json = serde_json::to_string(&chart).unwrap();
        assert!(json.contains("\"table_type\":\"height_weight\""));
        assert!(json.contains("\"is_default\":true"));

        let parsed: BuildChart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, chart.name);
        assert_eq!(parsed.table_type, BuildTableType::HeightWeight);
        assert_eq!(parsed.build_data, chart.build_data);
        assert_eq!(parsed.updated_at, chart.updated_at);
    }

    #[test]
    fn test_chart_json_defaults() {
        let parsed: BuildChart = serde_json::from_str("{\"name\":\"bare\"}").unwrap();
        assert_eq!(parsed.table_type, BuildTableType::HeightWeight);
        assert!(parsed.build_data.is_empty());
        assert_eq!(parsed.bmi_table, None);
        assert!(!parsed.is_default);
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(BuildTableType::HeightWeight.label(), "Height/Weight");
        assert_eq!(BuildTableType::Bmi.label(), "BMI");
    }
}
