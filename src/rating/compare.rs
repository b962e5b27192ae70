//! Comparison between free-form rating labels and table verdicts
//!
//! AI-extracted ratings arrive as display text ("Preferred Plus", "Table B");
//! table lookups produce [`RatingClass`] values. Agreement is judged on the
//! severity order with a one-step tolerance, so adjacent classes count as
//! consistent.

use crate::rating::RatingClass;

/// Normalize a rating label to its canonical snake_case tag form.
///
/// Lowercases and collapses every run of whitespace, underscores, and hyphens
/// into a single underscore, so "Preferred  Plus", "preferred-plus", and
/// "PREFERRED_PLUS" all normalize to "preferred_plus".
pub fn normalize_rating_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    let mut normalized = String::with_capacity(lower.len());
    let mut last_was_separator = false;
    for ch in lower.chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            if !last_was_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            last_was_separator = true;
        } else {
            normalized.push(ch);
            last_was_separator = false;
        }
    }
    // A trailing separator run leaves a dangling underscore
    if normalized.ends_with('_') {
        normalized.pop();
    }
    normalized
}

/// Whether an AI-estimated rating label agrees with a table verdict.
///
/// True on an exact class match or when the two classes sit within one step
/// of each other in the severity order. An unrecognized label never matches.
pub fn ratings_match(ai_rating: &str, build_rating: RatingClass) -> bool {
    let normalized = normalize_rating_label(ai_rating);
    if normalized == build_rating.as_str() {
        return true;
    }
    match RatingClass::from_tag(&normalized) {
        Some(ai_class) => {
            ai_class.ordinal().abs_diff(build_rating.ordinal()) <= 1
        }
        None => false,
    }
}

/// Human-readable disagreement message, or None when there is nothing to say.
///
/// Returns None when the table produced no verdict (unknown) or when the two
/// sources agree within tolerance. An AI label that parses to no known class
/// is treated as less favorable than any verdict.
pub fn rating_comparison_message(ai_rating: &str, build_rating: RatingClass) -> Option<String> {
    if build_rating == RatingClass::Unknown {
        return None;
    }
    if ratings_match(ai_rating, build_rating) {
        return None;
    }

    let build_idx = build_rating.ordinal() as isize;
    let ai_idx = RatingClass::parse_label(ai_rating)
        .map(|class| class.ordinal() as isize)
        .unwrap_or(-1);

    let rendered = build_rating.as_str().replace('_', " ");
    if build_idx > ai_idx {
        Some(format!(
            "Build table indicates {} (less favorable than AI estimate)",
            rendered
        ))
    } else {
        Some(format!(
            "Build table indicates {} (more favorable than AI estimate)",
            rendered
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rating_label() {
        assert_eq!(normalize_rating_label("Preferred Plus"), "preferred_plus");
        assert_eq!(normalize_rating_label("  Table-B "), "table_b");
        assert_eq!(normalize_rating_label("standard__plus"), "standard_plus");
        assert_eq!(normalize_rating_label("Standard"), "standard");
    }

    #[test]
    fn test_adjacent_ratings_match() {
        // One step apart in either direction counts as agreement
        assert!(ratings_match("Preferred", RatingClass::StandardPlus));
        assert!(ratings_match("Standard Plus", RatingClass::Preferred));
        assert!(ratings_match("Table A", RatingClass::Standard));
    }

    #[test]
    fn test_distant_ratings_do_not_match() {
        assert!(!ratings_match("Preferred Plus", RatingClass::Standard));
        assert!(!ratings_match("Standard", RatingClass::TableC));
    }

    #[test]
    fn test_exact_match() {
        assert!(ratings_match("preferred_plus", RatingClass::PreferredPlus));
        assert!(ratings_match("Table Rated", RatingClass::TableRated));
    }

    #[test]
    fn test_unrecognized_label_never_matches() {
        assert!(!ratings_match("super select", RatingClass::PreferredPlus));
        assert!(!ratings_match("", RatingClass::Standard));
    }

    #[test]
    fn test_comparison_message_direction() {
        let msg = rating_comparison_message("Preferred Plus", RatingClass::Standard);
        assert_eq!(
            msg.as_deref(),
            Some("Build table indicates standard (less favorable than AI estimate)")
        );

        let msg = rating_comparison_message("Table D", RatingClass::Preferred);
        assert_eq!(
            msg.as_deref(),
            Some("Build table indicates preferred (more favorable than AI estimate)")
        );
    }

    #[test]
    fn test_comparison_message_silent_cases() {
        assert_eq!(
            rating_comparison_message("Preferred", RatingClass::Unknown),
            None
        );
        assert_eq!(
            rating_comparison_message("Preferred", RatingClass::StandardPlus),
            None
        );
    }

    #[test]
    fn test_unparseable_ai_label_reads_less_favorable() {
        let msg = rating_comparison_message("no estimate", RatingClass::PreferredPlus);
        assert_eq!(
            msg.as_deref(),
            Some("Build table indicates preferred plus (less favorable than AI estimate)")
        );
    }
}
