//! Carrier build-table CSV codec
//!
//! Carrier spreadsheets arrive in a narrow dialect: a `height` column plus up
//! to four prime-class weight columns, one row per height, weights as
//! max-only thresholds. Parsing is total: malformed rows become recorded
//! errors or warnings, never panics, and one good row is enough to produce a
//! usable table.

use std::collections::HashSet;

use crate::rating::{RatingClass, PRIME_CLASSES};
use crate::table::data::{BuildTableData, BuildTableRow, WeightRange};
use crate::table::height::{format_height_for_csv, parse_height_string, supported_heights};

/// Outcome of parsing a build-table CSV.
///
/// `data` is Some when at least one row parsed; `errors` and `warnings` may be
/// non-empty either way, so a successful parse can still report skipped rows.
#[derive(Debug, Clone)]
pub struct CsvParseResult {
    pub data: Option<BuildTableData>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CsvParseResult {
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    fn failure(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { data: None, errors, warnings }
    }
}

/// Parse a weight cell into whole pounds.
///
/// Empty cells and the `-` / `—` placeholders mean "class not offered".
/// Anything that is not a plain integer in 0..=999 is also treated as absent.
pub fn parse_weight_value(value: &str) -> Option<u32> {
    let cleaned = value.trim();
    if cleaned.is_empty() || cleaned == "-" || cleaned == "\u{2014}" {
        return None;
    }
    cleaned.parse::<u32>().ok().filter(|&pounds| pounds <= 999)
}

/// Split one CSV line into fields.
///
/// A `"` opens a quoted field only at the start of a field; inside a quoted
/// field `""` is an escaped quote. A quote anywhere else is literal data, so
/// exported heights like `5'10"` survive unquoted.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' && current.is_empty() {
            in_quotes = true;
        } else if ch == ',' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

/// Normalize a header cell to the canonical column names.
///
/// Lowercases, collapses whitespace/hyphen runs to underscores, strips
/// quotes, then maps the common shorthands (`Pref+`, `Std Plus`, ...) onto
/// `preferred_plus` / `standard_plus`.
fn normalize_header(header: &str) -> String {
    let lower = header.trim().to_lowercase();
    let mut normalized = String::with_capacity(lower.len());
    let mut last_was_separator = false;
    for ch in lower.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !last_was_separator {
                normalized.push('_');
            }
            last_was_separator = true;
        } else if ch == '\'' || ch == '"' {
            // Quotes are dropped without breaking a separator run
        } else {
            normalized.push(ch);
            last_was_separator = false;
        }
    }
    normalized
        .replace("pref+", "preferred_plus")
        .replace("pref_plus", "preferred_plus")
        .replace("preferredplus", "preferred_plus")
        .replace("std+", "standard_plus")
        .replace("std_plus", "standard_plus")
        .replace("standardplus", "standard_plus")
}

/// Parse carrier build-table CSV content.
///
/// ```text
/// height,preferred_plus,preferred,standard_plus,standard
/// 4'10",119,132,148,178
/// 4'11",124,137,151,181
/// ```
///
/// Rows with an unparseable height are recorded as errors and skipped; rows
/// whose every weight cell is absent are recorded as warnings and skipped.
/// When the same height appears twice the later row wins, with a warning.
/// Surviving rows are returned sorted by ascending height.
pub fn parse_build_table_csv(content: &str) -> CsvParseResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut rows: Vec<BuildTableRow> = Vec::new();

    // Excel's UTF-8 export opens the document with a byte-order mark
    let lines: Vec<&str> = content
        .trim_start_matches('\u{feff}')
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        return CsvParseResult::failure(
            vec!["CSV must have a header row and at least one data row".to_string()],
            warnings,
        );
    }

    let headers: Vec<String> = parse_csv_line(lines[0])
        .iter()
        .map(|header| normalize_header(header))
        .collect();

    let height_index = match headers.iter().position(|h| h == "height") {
        Some(idx) => idx,
        None => {
            return CsvParseResult::failure(
                vec!["CSV must have a \"height\" column".to_string()],
                warnings,
            );
        }
    };

    // Columns are matched by normalized name; order in the file is free
    let weight_columns: Vec<(RatingClass, usize)> = PRIME_CLASSES
        .iter()
        .filter_map(|&class| {
            headers
                .iter()
                .position(|h| h == class.as_str())
                .map(|idx| (class, idx))
        })
        .collect();

    if weight_columns.is_empty() {
        return CsvParseResult::failure(
            vec![
                "CSV must have at least one weight column (preferred_plus, preferred, standard_plus, or standard)"
                    .to_string(),
            ],
            warnings,
        );
    }

    let mut seen_heights: HashSet<u32> = HashSet::new();

    for (i, line) in lines.iter().enumerate().skip(1) {
        let line_num = i + 1;
        let values = parse_csv_line(line);

        let height_value = values
            .get(height_index)
            .map(|v| v.trim())
            .unwrap_or("");
        let height_inches = match parse_height_string(height_value) {
            Some(height) => height,
            None => {
                errors.push(format!("Row {}: Invalid height \"{}\"", line_num, height_value));
                continue;
            }
        };

        if !seen_heights.insert(height_inches) {
            warnings.push(format!(
                "Row {}: Duplicate height {}, using later value",
                line_num,
                format_height_for_csv(height_inches)
            ));
            rows.retain(|row| row.height_inches != height_inches);
        }

        let mut row = BuildTableRow::new(height_inches);
        for &(class, idx) in &weight_columns {
            let cell = values.get(idx).map(String::as_str).unwrap_or("");
            if let Some(max) = parse_weight_value(cell) {
                row.weight_ranges.insert(class, WeightRange::max_only(max));
            }
        }

        if !row.has_weight_data() {
            warnings.push(format!(
                "Row {}: No valid weight values for {}",
                line_num,
                format_height_for_csv(height_inches)
            ));
            continue;
        }

        rows.push(row);
    }

    if rows.is_empty() {
        errors.push("No valid data rows found".to_string());
        return CsvParseResult::failure(errors, warnings);
    }

    rows.sort_by_key(|row| row.height_inches);

    CsvParseResult {
        data: Some(rows),
        errors,
        warnings,
    }
}

/// Which prime classes a CSV operation covers: the requested subset in
/// canonical order, or all four when the request is empty
fn select_csv_classes(classes: Option<&[RatingClass]>) -> Vec<RatingClass> {
    match classes {
        Some(active) if !active.is_empty() => PRIME_CLASSES
            .iter()
            .copied()
            .filter(|class| active.contains(class))
            .collect(),
        _ => PRIME_CLASSES.to_vec(),
    }
}

/// Render a build table back to CSV.
///
/// Writes max thresholds only; a band without a max exports as an empty cell.
/// Classes outside the prime four never appear in the CSV dialect.
pub fn export_build_table_to_csv(
    data: &[BuildTableRow],
    active_classes: Option<&[RatingClass]>,
) -> String {
    let export_classes = select_csv_classes(active_classes);
    let mut lines = Vec::with_capacity(data.len() + 1);

    let mut header = vec!["height".to_string()];
    header.extend(export_classes.iter().map(|class| class.as_str().to_string()));
    lines.push(header.join(","));

    for row in data {
        let mut fields = vec![format_height_for_csv(row.height_inches)];
        for &class in &export_classes {
            let cell = row
                .max_weight(class)
                .map(|max| max.to_string())
                .unwrap_or_default();
            fields.push(cell);
        }
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// Blank CSV template covering every supported height
pub fn generate_csv_template(active_classes: Option<&[RatingClass]>) -> String {
    let template_classes = select_csv_classes(active_classes);
    let mut lines = Vec::new();

    let mut header = vec!["height".to_string()];
    header.extend(template_classes.iter().map(|class| class.as_str().to_string()));
    lines.push(header.join(","));

    let empty_values = vec![""; template_classes.len()].join(",");
    for height in supported_heights() {
        lines.push(format!("{},{}", format_height_for_csv(height), empty_values));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
height,preferred_plus,preferred,standard_plus,standard
4'10\",119,132,148,178
4'11\",124,137,151,181
5'0\",128,141,155,185";

    #[test]
    fn test_parse_happy_path() {
        let result = parse_build_table_csv(SAMPLE_CSV);
        assert!(result.is_success());
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());

        let data = result.data.unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].height_inches, 58);
        assert_eq!(data[0].max_weight(RatingClass::PreferredPlus), Some(119));
        assert_eq!(data[2].max_weight(RatingClass::Standard), Some(185));
    }

    #[test]
    fn test_parse_weight_value() {
        assert_eq!(parse_weight_value("185"), Some(185));
        assert_eq!(parse_weight_value(" 172 "), Some(172));
        assert_eq!(parse_weight_value("0"), Some(0));
        assert_eq!(parse_weight_value("999"), Some(999));
        assert_eq!(parse_weight_value(""), None);
        assert_eq!(parse_weight_value("-"), None);
        assert_eq!(parse_weight_value("\u{2014}"), None);
        assert_eq!(parse_weight_value("1000"), None);
        assert_eq!(parse_weight_value("-5"), None);
        assert_eq!(parse_weight_value("12.5"), None);
        assert_eq!(parse_weight_value("n/a"), None);
    }

    #[test]
    fn test_header_synonyms_and_order() {
        let csv = "Standard,Pref+,HEIGHT,Std Plus\n180,150,5'9\",170";
        let result = parse_build_table_csv(csv);
        assert!(result.is_success());
        let data = result.data.unwrap();
        assert_eq!(data[0].height_inches, 69);
        assert_eq!(data[0].max_weight(RatingClass::PreferredPlus), Some(150));
        assert_eq!(data[0].max_weight(RatingClass::StandardPlus), Some(170));
        assert_eq!(data[0].max_weight(RatingClass::Standard), Some(180));
        assert_eq!(data[0].max_weight(RatingClass::Preferred), None);
    }

    #[test]
    fn test_missing_height_column() {
        let result = parse_build_table_csv("preferred,standard\n150,180");
        assert!(!result.is_success());
        assert_eq!(result.errors, vec!["CSV must have a \"height\" column"]);
    }

    #[test]
    fn test_missing_weight_columns() {
        let result = parse_build_table_csv("height,notes\n5'10\",fine");
        assert!(!result.is_success());
        assert_eq!(
            result.errors,
            vec!["CSV must have at least one weight column (preferred_plus, preferred, standard_plus, or standard)"]
        );
    }

    #[test]
    fn test_header_only_input() {
        let result = parse_build_table_csv("height,preferred\n");
        assert!(!result.is_success());
        assert_eq!(
            result.errors,
            vec!["CSV must have a header row and at least one data row"]
        );
    }

    #[test]
    fn test_invalid_height_is_error_not_fatal() {
        let csv = "height,standard\nbanana,180\n5'10\",185";
        let result = parse_build_table_csv(csv);
        assert!(result.is_success());
        assert_eq!(result.errors, vec!["Row 2: Invalid height \"banana\""]);
        assert_eq!(result.data.unwrap().len(), 1);
    }

    #[test]
    fn test_row_without_weights_is_warning() {
        let csv = "height,standard\n5'9\",-\n5'10\",185";
        let result = parse_build_table_csv(csv);
        assert!(result.is_success());
        assert_eq!(
            result.warnings,
            vec!["Row 2: No valid weight values for 5'9\""]
        );
        assert_eq!(result.data.unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_height_later_wins() {
        let csv = "height,standard\n5'10\",180\n5'11\",190\n5'10\",200";
        let result = parse_build_table_csv(csv);
        assert!(result.is_success());
        assert_eq!(
            result.warnings,
            vec!["Row 4: Duplicate height 5'10\", using later value"]
        );

        let data = result.data.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].height_inches, 70);
        assert_eq!(data[0].max_weight(RatingClass::Standard), Some(200));
    }

    #[test]
    fn test_no_valid_rows_fails_with_row_errors() {
        let csv = "height,standard\nbad,180\nworse,190";
        let result = parse_build_table_csv(csv);
        assert!(!result.is_success());
        assert_eq!(
            result.errors,
            vec![
                "Row 2: Invalid height \"bad\"",
                "Row 3: Invalid height \"worse\"",
                "No valid data rows found"
            ]
        );
    }

    #[test]
    fn test_blank_lines_and_crlf_ignored() {
        let csv = "height,standard\r\n\r\n5'10\",185\r\n   \r\n5'11\",190\r\n";
        let result = parse_build_table_csv(csv);
        assert!(result.is_success());
        assert!(result.errors.is_empty());
        assert_eq!(result.data.unwrap().len(), 2);
    }

    #[test]
    fn test_leading_bom_ignored() {
        let csv = format!("\u{feff}{}", SAMPLE_CSV);
        let result = parse_build_table_csv(&csv);
        assert!(result.is_success());
        assert!(result.errors.is_empty());

        let data = result.data.unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].height_inches, 58);
        assert_eq!(data[0].max_weight(RatingClass::PreferredPlus), Some(119));
    }

    #[test]
    fn test_quoted_height_with_escaped_quote() {
        let csv = "height,standard\n\"5'10\"\"\",185";
        let result = parse_build_table_csv(csv);
        assert!(result.is_success());
        assert_eq!(result.data.unwrap()[0].height_inches, 70);
    }

    #[test]
    fn test_export_matches_canonical_form() {
        let result = parse_build_table_csv(SAMPLE_CSV);
        let data = result.data.unwrap();
        let exported = export_build_table_to_csv(&data, None);
        assert_eq!(exported, SAMPLE_CSV);
    }

    #[test]
    fn test_export_parse_round_trip() {
        let csv = "height,preferred,standard\n5-10,160,\n71,\u{2014},205\n5'8\",155,190";
        let parsed = parse_build_table_csv(csv).data.unwrap();
        let exported = export_build_table_to_csv(&parsed, None);
        let reparsed = parse_build_table_csv(&exported);
        assert!(reparsed.is_success());
        assert_eq!(reparsed.data.unwrap(), parsed);
    }

    #[test]
    fn test_export_respects_active_classes() {
        let data = parse_build_table_csv(SAMPLE_CSV).data.unwrap();
        let exported = export_build_table_to_csv(
            &data,
            Some(&[RatingClass::Standard, RatingClass::PreferredPlus]),
        );
        let mut lines = exported.lines();
        // Canonical column order regardless of request order
        assert_eq!(lines.next(), Some("height,preferred_plus,standard"));
        assert_eq!(lines.next(), Some("4'10\",119,178"));
    }

    #[test]
    fn test_export_empty_selection_means_all() {
        let data = parse_build_table_csv(SAMPLE_CSV).data.unwrap();
        let exported = export_build_table_to_csv(&data, Some(&[]));
        assert!(exported.starts_with("height,preferred_plus,preferred,standard_plus,standard"));
    }

    #[test]
    fn test_template_shape() {
        let template = generate_csv_template(None);
        let lines: Vec<&str> = template.lines().collect();
        // Header plus one row for each height 4'0" through 8'0"
        assert_eq!(lines.len(), 1 + 49);
        assert_eq!(lines[0], "height,preferred_plus,preferred,standard_plus,standard");
        assert_eq!(lines[1], "4'0\",,,,");
        assert_eq!(lines[lines.len() - 1], "8'0\",,,,");

        let parsed = parse_build_table_csv(&template);
        // Every row is empty, so the template parses to nothing but warnings
        assert!(!parsed.is_success());
        assert_eq!(parsed.warnings.len(), 49);
    }
}
