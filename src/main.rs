//! Underwriting Engine CLI
//!
//! Demonstration run: load the sample carrier table, classify a handful of
//! applicants, and write the normalized CSV export.

use std::fs::File;
use std::io::Write;

use chrono::Utc;

use underwriting_engine::lookup::bmi_category;
use underwriting_engine::table::loader::DEFAULT_BUILD_TABLE_PATH;
use underwriting_engine::table::{
    active_rating_classes, format_height_for_csv, load_build_table, BmiRange, BmiTable,
};
use underwriting_engine::{
    calculate_bmi, export_build_table_to_csv, lookup_build_rating, lookup_rating_unified,
    rating_comparison_message, weight_guidance, BuildChart, RatingClass,
};

fn main() {
    env_logger::init();

    println!("Underwriting Engine v0.1.0");
    println!("==========================\n");

    let table =
        load_build_table(DEFAULT_BUILD_TABLE_PATH).expect("Unable to load sample carrier table");

    let first = table.first().map(|row| row.height_inches).unwrap_or(0);
    let last = table.last().map(|row| row.height_inches).unwrap_or(0);
    println!(
        "Carrier table: {} ({} rows, {} through {})",
        DEFAULT_BUILD_TABLE_PATH,
        table.len(),
        format_height_for_csv(first),
        format_height_for_csv(last)
    );
    let offered: Vec<&str> = active_rating_classes(&table)
        .iter()
        .map(|class| class.label())
        .collect();
    println!("Offered classes: {}\n", offered.join(", "));

    // Applicant: (id, feet, inches, weight, AI estimate)
    let applicants = [
        ("A-1001", 5u32, 10u32, 168u32, "Preferred Plus"),
        ("A-1002", 5, 10, 195, "Preferred"),
        ("A-1004", 6, 2, 240, "Standard"),
        ("A-1006", 5, 0, 118, "Preferred Plus"),
        ("A-1009", 6, 4, 300, "Table Rated"),
    ];

    println!(
        "{:<8} {:>6} {:>6}  {:<15} {:<14} {}",
        "ID", "Height", "Weight", "AI Estimate", "Table Verdict", "Guidance"
    );
    println!("{}", "-".repeat(92));

    for (id, feet, inches, weight, estimate) in applicants {
        let result = lookup_build_rating(feet, inches, weight, &table);
        let guidance = weight_guidance(feet, inches, weight, &table)
            .and_then(|g| match (g.next_better_rating, g.weight_to_next_rating) {
                (Some(next), Some(lose)) => {
                    Some(format!("lose {} lbs for {}", lose, next.label()))
                }
                (Some(next), None) => Some(format!("{} has no ceiling here", next.label())),
                _ => None,
            })
            .unwrap_or_else(|| "at best class".to_string());

        println!(
            "{:<8} {:>6} {:>6}  {:<15} {:<14} {}",
            id,
            format!("{}'{}\"", feet, inches),
            weight,
            estimate,
            result.rating_class.label(),
            guidance
        );
        if let Some(message) = rating_comparison_message(estimate, result.rating_class) {
            println!("{:<8} note: {}", "", message);
        }
    }

    // The same applicants through a BMI chart
    let mut bmi_bands = BmiTable::new();
    bmi_bands.insert(RatingClass::PreferredPlus, BmiRange::max_only(25.0));
    bmi_bands.insert(RatingClass::Preferred, BmiRange::max_only(28.0));
    bmi_bands.insert(RatingClass::StandardPlus, BmiRange::max_only(31.0));
    bmi_bands.insert(RatingClass::Standard, BmiRange::max_only(34.0));
    bmi_bands.insert(RatingClass::TableB, BmiRange::max_only(38.0));
    let mut chart = BuildChart::bmi("Sample Carrier BMI", bmi_bands);
    chart.updated_at = Some(Utc::now());

    println!(
        "\nBMI chart \"{}\" (as of {}):",
        chart.name,
        chart.updated_at.expect("timestamp just set").format("%Y-%m-%d")
    );
    for (id, feet, inches, weight, _) in applicants.iter().take(3) {
        let bmi = calculate_bmi(*feet, *inches, *weight);
        let verdict = lookup_rating_unified(*feet, *inches, *weight, &chart);
        println!(
            "  {}: BMI {:.1} ({}) -> {}",
            id,
            bmi,
            bmi_category(bmi),
            verdict.rating_class.label()
        );
    }

    // Write the normalized export
    let csv_path = "build_table_export.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    writeln!(file, "{}", export_build_table_to_csv(&table, None)).expect("Unable to write CSV");
    println!("\nNormalized table written to: {}", csv_path);
}
