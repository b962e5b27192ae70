//! Height parsing and formatting for build-table CSVs

/// Shortest height a build table row may describe (4'0")
pub const MIN_TABLE_HEIGHT_INCHES: u32 = 48;

/// Tallest height a build table row may describe (8'0")
pub const MAX_TABLE_HEIGHT_INCHES: u32 = 96;

/// Every height a carrier template covers, in inches
pub fn supported_heights() -> std::ops::RangeInclusive<u32> {
    MIN_TABLE_HEIGHT_INCHES..=MAX_TABLE_HEIGHT_INCHES
}

/// Split total inches into whole feet and leftover inches
pub fn inches_to_feet_and_inches(total_inches: u32) -> (u32, u32) {
    (total_inches / 12, total_inches % 12)
}

/// Combine feet and inches into total inches, saturating on overflow
pub fn feet_and_inches_to_inches(feet: u32, inches: u32) -> u32 {
    feet.saturating_mul(12).saturating_add(inches)
}

/// Parse a height cell into total inches.
///
/// Accepted forms:
/// - `5'10"` or `5'10` (feet, apostrophe, inches, optional trailing quote)
/// - `5-10` (feet, hyphen, inches)
/// - `70` (bare total inches, accepted only within the 48..=96 window)
///
/// The inches component must be 0..=11. Returns None for anything else,
/// including fractional, signed, or out-of-window bare values.
pub fn parse_height_string(text: &str) -> Option<u32> {
    let cleaned = text.trim();

    if let Some((feet, rest)) = cleaned.split_once('\'') {
        let inches = rest.strip_suffix('"').unwrap_or(rest);
        if let Some(total) = combine_components(feet, inches) {
            return Some(total);
        }
    } else if let Some((feet, inches)) = cleaned.split_once('-') {
        if let Some(total) = combine_components(feet, inches) {
            return Some(total);
        }
    }

    match parse_digits(cleaned) {
        Some(total) if supported_heights().contains(&total) => Some(total),
        _ => None,
    }
}

/// Strict feet/inches combination: both components must be bare digit runs
/// and inches must stay below a foot.
fn combine_components(feet: &str, inches: &str) -> Option<u32> {
    let feet = parse_digits(feet)?;
    let inches = parse_digits(inches)?;
    if inches >= 12 {
        return None;
    }
    feet.checked_mul(12)?.checked_add(inches)
}

/// Parse a bare digit run. `u32::from_str` also accepts a leading `+`,
/// which no height component may carry.
fn parse_digits(text: &str) -> Option<u32> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Render total inches in the canonical export form, e.g. `5'10"`
pub fn format_height_for_csv(total_inches: u32) -> String {
    let (feet, inches) = inches_to_feet_and_inches(total_inches);
    format!("{}'{}\"", feet, inches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feet_and_inches_forms() {
        assert_eq!(parse_height_string("5'10\""), Some(70));
        assert_eq!(parse_height_string("5'10"), Some(70));
        assert_eq!(parse_height_string("5-10"), Some(70));
        assert_eq!(parse_height_string("  6'2\" "), Some(74));
        assert_eq!(parse_height_string("5'0"), Some(60));
        assert_eq!(parse_height_string("4'11\""), Some(59));
    }

    #[test]
    fn test_parse_bare_inches_window() {
        assert_eq!(parse_height_string("70"), Some(70));
        assert_eq!(parse_height_string("48"), Some(48));
        assert_eq!(parse_height_string("96"), Some(96));
        // Outside the plausible window: likely a weight or a typo
        assert_eq!(parse_height_string("47"), None);
        assert_eq!(parse_height_string("97"), None);
        assert_eq!(parse_height_string("510"), None);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_height_string(""), None);
        assert_eq!(parse_height_string("tall"), None);
        assert_eq!(parse_height_string("5'13"), None);
        assert_eq!(parse_height_string("5 ' 10"), None);
        assert_eq!(parse_height_string("-5'10"), None);
        assert_eq!(parse_height_string("5'10.5"), None);
        assert_eq!(parse_height_string("70.5"), None);
        assert_eq!(parse_height_string("5'10\"\""), None);
    }

    #[test]
    fn test_parse_rejects_signed_components() {
        assert_eq!(parse_height_string("+5'10\""), None);
        assert_eq!(parse_height_string("5'+10\""), None);
        assert_eq!(parse_height_string("+5-10"), None);
        assert_eq!(parse_height_string("+70"), None);
    }

    #[test]
    fn test_format_height() {
        assert_eq!(format_height_for_csv(70), "5'10\"");
        assert_eq!(format_height_for_csv(48), "4'0\"");
        assert_eq!(format_height_for_csv(96), "8'0\"");
        assert_eq!(format_height_for_csv(59), "4'11\"");
    }

    #[test]
    fn test_parse_format_inverse_over_window() {
        for inches in supported_heights() {
            assert_eq!(parse_height_string(&format_height_for_csv(inches)), Some(inches));
        }
    }

    #[test]
    fn test_feet_inches_splitters() {
        assert_eq!(inches_to_feet_and_inches(70), (5, 10));
        assert_eq!(inches_to_feet_and_inches(48), (4, 0));
        assert_eq!(feet_and_inches_to_inches(5, 10), 70);
        assert_eq!(feet_and_inches_to_inches(6, 0), 72);
    }
}
