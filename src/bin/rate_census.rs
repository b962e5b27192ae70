//! Batch-rate an applicant census against a carrier build table
//!
//! Outputs one row per applicant with rating, threshold, and guidance columns
//! for comparison with carrier worksheets. Guidance amounts are pounds for
//! height/weight charts and BMI points for BMI charts.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use csv::Reader;
use rayon::prelude::*;

use underwriting_engine::table::loader::DEFAULT_BUILD_TABLE_PATH;
use underwriting_engine::table::{load_build_chart, load_build_table};
use underwriting_engine::{
    bmi_guidance, calculate_bmi, lookup_rating_unified, rating_comparison_message, ratings_match,
    weight_guidance, BuildChart, BuildTableType, RatingClass, RatingLookupResult,
};

#[derive(Debug, Parser)]
#[command(
    name = "rate_census",
    version,
    about = "Batch-rate an applicant census against a carrier build table"
)]
struct Cli {
    /// Census CSV with ApplicantId, HeightFeet, HeightInches, WeightLbs,
    /// and an optional PredictedRating column
    #[arg(default_value = "data/census/sample_census.csv")]
    census: PathBuf,

    /// Carrier build-table CSV
    #[arg(short, long, default_value = DEFAULT_BUILD_TABLE_PATH)]
    table: PathBuf,

    /// Carrier chart JSON; takes precedence over --table
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "census_ratings.csv")]
    output: PathBuf,
}

/// Raw CSV row matching the census columns
#[derive(Debug, serde::Deserialize)]
struct CensusRow {
    #[serde(rename = "ApplicantId")]
    applicant_id: String,
    #[serde(rename = "HeightFeet")]
    height_feet: u32,
    #[serde(rename = "HeightInches")]
    height_inches: u32,
    #[serde(rename = "WeightLbs")]
    weight_lbs: u32,
    #[serde(rename = "PredictedRating")]
    predicted_rating: Option<String>,
}

/// One classified applicant, flattened for CSV output
#[derive(Debug)]
struct RatedApplicant {
    applicant_id: String,
    height_feet: u32,
    height_inches: u32,
    weight_lbs: u32,
    bmi: f64,
    result: RatingLookupResult,
    next_better_rating: Option<RatingClass>,
    to_next_rating: Option<String>,
    max_for_next_rating: Option<String>,
    comparison: Option<String>,
}

fn load_census(path: &Path) -> Result<Vec<CensusRow>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("failed to open census {}", path.display()))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: CensusRow = result.context("malformed census row")?;
        rows.push(row);
    }
    Ok(rows)
}

fn load_chart(cli: &Cli) -> Result<BuildChart> {
    if let Some(chart_path) = &cli.chart {
        load_build_chart(chart_path)
            .with_context(|| format!("failed to load chart {}", chart_path.display()))
    } else {
        let data = load_build_table(&cli.table)
            .with_context(|| format!("failed to load build table {}", cli.table.display()))?;
        Ok(BuildChart::height_weight("census build table", data))
    }
}

fn rate_applicant(row: &CensusRow, chart: &BuildChart) -> RatedApplicant {
    let result = lookup_rating_unified(row.height_feet, row.height_inches, row.weight_lbs, chart);
    let bmi = calculate_bmi(row.height_feet, row.height_inches, row.weight_lbs);

    let (next_better_rating, to_next_rating, max_for_next_rating) = match chart.table_type {
        BuildTableType::HeightWeight => {
            match weight_guidance(
                row.height_feet,
                row.height_inches,
                row.weight_lbs,
                &chart.build_data,
            ) {
                Some(guidance) => (
                    guidance.next_better_rating,
                    guidance.weight_to_next_rating.map(|lbs| lbs.to_string()),
                    guidance
                        .max_weight_for_next_rating
                        .map(|lbs| lbs.to_string()),
                ),
                None => (None, None, None),
            }
        }
        BuildTableType::Bmi => {
            match bmi_guidance(
                row.height_feet,
                row.height_inches,
                row.weight_lbs,
                chart.bmi_table.as_ref(),
            ) {
                Some(guidance) => (
                    guidance.next_better_rating,
                    guidance.bmi_to_next_rating.map(|bmi| format!("{:.1}", bmi)),
                    guidance
                        .max_bmi_for_next_rating
                        .map(|bmi| format!("{:.1}", bmi)),
                ),
                None => (None, None, None),
            }
        }
    };

    let comparison = row
        .predicted_rating
        .as_deref()
        .and_then(|ai| rating_comparison_message(ai, result.rating_class));

    RatedApplicant {
        applicant_id: row.applicant_id.clone(),
        height_feet: row.height_feet,
        height_inches: row.height_inches,
        weight_lbs: row.weight_lbs,
        bmi,
        result,
        next_better_rating,
        to_next_rating,
        max_for_next_rating,
        comparison,
    }
}

fn tag_or_empty(class: Option<RatingClass>) -> &'static str {
    class.map(|c| c.as_str()).unwrap_or("")
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let census = load_census(&cli.census)?;
    println!(
        "Loaded {} applicants from {}",
        census.len(),
        cli.census.display()
    );

    let chart = load_chart(&cli)?;
    let chart_detail = match chart.table_type {
        BuildTableType::HeightWeight => format!("{} rows", chart.build_data.len()),
        BuildTableType::Bmi => format!(
            "{} classes",
            chart.bmi_table.as_ref().map(|table| table.len()).unwrap_or(0)
        ),
    };
    println!(
        "Rating against \"{}\" ({}, {})",
        chart.name,
        chart.table_type.label(),
        chart_detail
    );

    let rate_start = Instant::now();
    let rated: Vec<RatedApplicant> = census
        .par_iter()
        .map(|row| rate_applicant(row, &chart))
        .collect();
    println!("Rated {} applicants in {:?}", rated.len(), rate_start.elapsed());

    let mut file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    writeln!(
        file,
        "ApplicantId,HeightFeet,HeightInches,WeightLbs,Bmi,RatingClass,ThresholdExceeded,ThresholdClass,NextBetterRating,ToNextRating,MaxForNextRating,Comparison"
    )?;
    for applicant in &rated {
        writeln!(
            file,
            "{},{},{},{},{:.1},{},{},{},{},{},{},{}",
            applicant.applicant_id,
            applicant.height_feet,
            applicant.height_inches,
            applicant.weight_lbs,
            applicant.bmi,
            applicant.result.rating_class.as_str(),
            applicant
                .result
                .threshold_exceeded
                .map(|lbs| lbs.to_string())
                .unwrap_or_default(),
            tag_or_empty(applicant.result.threshold_class),
            tag_or_empty(applicant.next_better_rating),
            applicant.to_next_rating.as_deref().unwrap_or(""),
            applicant.max_for_next_rating.as_deref().unwrap_or(""),
            applicant.comparison.as_deref().unwrap_or(""),
        )?;
    }
    println!("Output written to {}", cli.output.display());

    let mut distribution: BTreeMap<RatingClass, usize> = BTreeMap::new();
    for applicant in &rated {
        *distribution.entry(applicant.result.rating_class).or_default() += 1;
    }
    println!("\nRating distribution:");
    for (class, count) in &distribution {
        println!("  {:<16} {}", class.as_str(), count);
    }

    let predicted: Vec<&CensusRow> = census
        .iter()
        .filter(|row| row.predicted_rating.is_some())
        .collect();
    if !predicted.is_empty() {
        let agreed = census
            .iter()
            .zip(rated.iter())
            .filter(|(row, applicant)| {
                row.predicted_rating
                    .as_deref()
                    .map(|ai| ratings_match(ai, applicant.result.rating_class))
                    .unwrap_or(false)
            })
            .count();
        println!(
            "\nAI agreement: {} of {} predictions within one class",
            agreed,
            predicted.len()
        );
    }

    println!(
        "\nRun completed {} in {:?}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        start.elapsed()
    );
    Ok(())
}
