//! AWS Lambda handler for build-table classification
//!
//! Accepts a carrier build table (raw CSV or pre-parsed rows, or a BMI
//! threshold table) plus a batch of applicants via JSON, and returns the
//! rating verdict, guidance, and AI-comparison message for each applicant.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use underwriting_engine::table::{parse_build_table_csv, sorted_by_height, BmiTable};
use underwriting_engine::{
    bmi_guidance, calculate_bmi, lookup_rating_unified, rating_comparison_message,
    weight_guidance, BmiGuidance, BuildChart, BuildTableData, BuildTableType, RatingClass,
    WeightGuidance,
};

/// Input for a classification run
#[derive(Debug, Deserialize)]
pub struct ClassificationRequest {
    /// Raw build-table CSV, parsed with the standard codec
    #[serde(default)]
    pub table_csv: Option<String>,

    /// Pre-parsed build-table rows, used when no CSV is supplied
    #[serde(default)]
    pub rows: Option<BuildTableData>,

    /// BMI ceilings per class for BMI-type charts
    #[serde(default)]
    pub bmi_table: Option<BmiTable>,

    /// "height_weight" (default) or "bmi"
    #[serde(default)]
    pub table_type: BuildTableType,

    pub applicants: Vec<ApplicantInput>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicantInput {
    #[serde(default)]
    pub applicant_id: Option<String>,
    pub height_feet: u32,
    pub height_inches: u32,
    pub weight_lbs: u32,
    #[serde(default)]
    pub predicted_rating: Option<String>,
}

/// Output of a classification run
#[derive(Debug, Serialize)]
pub struct ClassificationResponse {
    pub results: Vec<ApplicantResult>,
    pub row_count: usize,
    pub table_type: BuildTableType,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_id: Option<String>,
    pub rating_class: RatingClass,
    pub rating_label: String,
    pub has_table: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_exceeded: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_class: Option<RatingClass>,
    pub bmi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_guidance: Option<WeightGuidance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_guidance: Option<BmiGuidance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_message: Option<String>,
}

fn classify_applicant(applicant: &ApplicantInput, chart: &BuildChart) -> ApplicantResult {
    let result = lookup_rating_unified(
        applicant.height_feet,
        applicant.height_inches,
        applicant.weight_lbs,
        chart,
    );

    let (weight_guidance, bmi_guidance) = match chart.table_type {
        BuildTableType::HeightWeight => (
            weight_guidance(
                applicant.height_feet,
                applicant.height_inches,
                applicant.weight_lbs,
                &chart.build_data,
            ),
            None,
        ),
        BuildTableType::Bmi => (
            None,
            bmi_guidance(
                applicant.height_feet,
                applicant.height_inches,
                applicant.weight_lbs,
                chart.bmi_table.as_ref(),
            ),
        ),
    };

    let comparison_message = applicant
        .predicted_rating
        .as_deref()
        .and_then(|ai| rating_comparison_message(ai, result.rating_class));

    ApplicantResult {
        applicant_id: applicant.applicant_id.clone(),
        rating_class: result.rating_class,
        rating_label: result.rating_class.label().to_string(),
        has_table: result.has_table,
        threshold_exceeded: result.threshold_exceeded,
        threshold_class: result.threshold_class,
        bmi: calculate_bmi(
            applicant.height_feet,
            applicant.height_inches,
            applicant.weight_lbs,
        ),
        weight_guidance,
        bmi_guidance,
        comparison_message,
    }
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body))
        .unwrap()
}

fn json_response(body: &ClassificationResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ClassificationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    // Resolve the build table, preferring raw CSV over pre-parsed rows
    let mut warnings = Vec::new();
    let build_data = if let Some(ref csv) = request.table_csv {
        let parsed = parse_build_table_csv(csv);
        warnings = parsed.warnings;
        match parsed.data {
            Some(data) => {
                for error in &parsed.errors {
                    warnings.push(format!("skipped row: {}", error));
                }
                data
            }
            None => {
                return Ok(error_response(422, &parsed.errors.join("; ")));
            }
        }
    } else {
        sorted_by_height(&request.rows.unwrap_or_default())
    };

    // A missing bmi_table stays distinct from an empty one
    let chart = BuildChart {
        name: "request chart".to_string(),
        table_type: request.table_type,
        build_data,
        bmi_table: request.bmi_table,
        notes: None,
        is_default: false,
        updated_at: None,
    };

    let row_count = match chart.table_type {
        BuildTableType::HeightWeight => chart.build_data.len(),
        BuildTableType::Bmi => chart.bmi_table.as_ref().map(|table| table.len()).unwrap_or(0),
    };

    // Classify applicants in parallel
    let results: Vec<ApplicantResult> = request
        .applicants
        .par_iter()
        .map(|applicant| classify_applicant(applicant, &chart))
        .collect();

    let execution_time_ms = start.elapsed().as_millis() as u64;

    let response = ClassificationResponse {
        results,
        row_count,
        table_type: chart.table_type,
        execution_time_ms,
        warnings,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
