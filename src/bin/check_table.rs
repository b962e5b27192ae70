//! Build-table CSV validation and normalization CLI

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use underwriting_engine::table::{
    active_rating_classes, filter_by_classes, format_height_for_csv,
};
use underwriting_engine::{
    export_build_table_to_csv, generate_csv_template, parse_build_table_csv, RatingClass,
};

#[derive(Debug, Parser)]
#[command(
    name = "check_table",
    version,
    about = "Validate and normalize carrier build-table CSVs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a CSV and report errors, warnings, and coverage.
    Validate {
        /// Path to the build-table CSV
        file: PathBuf,
    },
    /// Parse a CSV and print it back in canonical export form.
    Normalize {
        /// Path to the build-table CSV
        file: PathBuf,
        /// Keep only these rating classes (comma separated, e.g. preferred,standard)
        #[arg(long, value_delimiter = ',')]
        classes: Vec<String>,
        /// Write the normalized CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a blank CSV template covering every supported height.
    Template {
        /// Restrict template columns to these rating classes (comma separated)
        #[arg(long, value_delimiter = ',')]
        classes: Vec<String>,
        /// Write the template here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { file } => validate(&file),
        Command::Normalize { file, classes, output } => {
            normalize(&file, &classes, output.as_deref())
        }
        Command::Template { classes, output } => template(&classes, output.as_deref()),
    }
}

fn parse_classes(tags: &[String]) -> Result<Vec<RatingClass>> {
    tags.iter()
        .map(|tag| {
            RatingClass::parse_label(tag)
                .with_context(|| format!("unknown rating class: {}", tag))
        })
        .collect()
}

fn validate(file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    log::info!("validating {}", file.display());
    let result = parse_build_table_csv(&content);

    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    for error in &result.errors {
        println!("error: {}", error);
    }

    let data = match result.data {
        Some(data) => data,
        None => bail!("{}: no usable build table", file.display()),
    };

    let first = data[0].height_inches;
    let last = data[data.len() - 1].height_inches;
    let offered: Vec<&str> = active_rating_classes(&data)
        .iter()
        .map(|class| class.as_str())
        .collect();

    println!(
        "{}: {} rows, {} through {}",
        file.display(),
        data.len(),
        format_height_for_csv(first),
        format_height_for_csv(last)
    );
    println!("classes: {}", offered.join(", "));

    if !result.errors.is_empty() {
        bail!("{} row(s) could not be parsed", result.errors.len());
    }
    Ok(())
}

fn normalize(file: &Path, class_tags: &[String], output: Option<&Path>) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    log::info!("normalizing {}", file.display());
    let result = parse_build_table_csv(&content);

    for warning in &result.warnings {
        eprintln!("warning: {}", warning);
    }
    for error in &result.errors {
        eprintln!("error: {}", error);
    }

    let data = match result.data {
        Some(data) => data,
        None => bail!("{}: no usable build table", file.display()),
    };

    let csv = if class_tags.is_empty() {
        export_build_table_to_csv(&data, None)
    } else {
        let classes = parse_classes(class_tags)?;
        let filtered = filter_by_classes(&data, &classes);
        if filtered.is_empty() {
            bail!("no rows left after restricting to: {}", class_tags.join(", "));
        }
        export_build_table_to_csv(&filtered, Some(&classes))
    };

    write_or_print(&csv, output)
}

fn template(class_tags: &[String], output: Option<&Path>) -> Result<()> {
    let csv = if class_tags.is_empty() {
        generate_csv_template(None)
    } else {
        let classes = parse_classes(class_tags)?;
        generate_csv_template(Some(&classes))
    };
    write_or_print(&csv, output)
}

fn write_or_print(csv: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", csv))
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{}", csv),
    }
    Ok(())
}
