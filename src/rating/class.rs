//! Rating class taxonomy and severity ordering

use serde::{Deserialize, Serialize};

/// Underwriting rating class, declared best-to-worst.
///
/// The declaration order is the authoritative severity order: every ordinal
/// comparison in the engine (classification walks, adjacency checks, guidance)
/// indexes into [`RATING_CLASS_ORDER`], which mirrors this declaration.
/// `Unknown` sorts after every real class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingClass {
    PreferredPlus,
    Preferred,
    StandardPlus,
    Standard,
    TableA,
    TableB,
    TableC,
    TableD,
    TableE,
    TableF,
    TableG,
    TableH,
    TableI,
    TableJ,
    TableK,
    TableL,
    TableM,
    TableN,
    TableO,
    TableP,
    /// Substandard beyond every lettered table the carrier offers
    TableRated,
    /// No determination possible
    Unknown,
}

/// All rating classes in severity order, best first
pub const RATING_CLASS_ORDER: [RatingClass; 22] = [
    RatingClass::PreferredPlus,
    RatingClass::Preferred,
    RatingClass::StandardPlus,
    RatingClass::Standard,
    RatingClass::TableA,
    RatingClass::TableB,
    RatingClass::TableC,
    RatingClass::TableD,
    RatingClass::TableE,
    RatingClass::TableF,
    RatingClass::TableG,
    RatingClass::TableH,
    RatingClass::TableI,
    RatingClass::TableJ,
    RatingClass::TableK,
    RatingClass::TableL,
    RatingClass::TableM,
    RatingClass::TableN,
    RatingClass::TableO,
    RatingClass::TableP,
    RatingClass::TableRated,
    RatingClass::Unknown,
];

/// The four prime classes, best first. These are the only classes carrier
/// build-table CSVs carry as weight columns.
pub const PRIME_CLASSES: [RatingClass; 4] = [
    RatingClass::PreferredPlus,
    RatingClass::Preferred,
    RatingClass::StandardPlus,
    RatingClass::Standard,
];

/// The sixteen lettered substandard tables, mildest first
pub const TABLE_CLASSES: [RatingClass; 16] = [
    RatingClass::TableA,
    RatingClass::TableB,
    RatingClass::TableC,
    RatingClass::TableD,
    RatingClass::TableE,
    RatingClass::TableF,
    RatingClass::TableG,
    RatingClass::TableH,
    RatingClass::TableI,
    RatingClass::TableJ,
    RatingClass::TableK,
    RatingClass::TableL,
    RatingClass::TableM,
    RatingClass::TableN,
    RatingClass::TableO,
    RatingClass::TableP,
];

impl RatingClass {
    /// Position in the severity order (0 = preferred_plus, 21 = unknown)
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The next more favorable class, or None for the best class and unknown
    pub fn next_better(self) -> Option<RatingClass> {
        match self {
            RatingClass::PreferredPlus | RatingClass::Unknown => None,
            other => Some(RATING_CLASS_ORDER[other.ordinal() - 1]),
        }
    }

    /// The next less favorable class. `Unknown` is not a severity step, so
    /// the ladder ends at `TableRated`.
    pub fn next_worse(self) -> Option<RatingClass> {
        match self {
            RatingClass::TableRated | RatingClass::Unknown => None,
            other => Some(RATING_CLASS_ORDER[other.ordinal() + 1]),
        }
    }

    /// Whether this class represents an actual offer (prime or lettered table)
    pub fn is_rateable(self) -> bool {
        !matches!(self, RatingClass::TableRated | RatingClass::Unknown)
    }

    /// Canonical snake_case tag, as used in CSV headers and JSON
    pub fn as_str(self) -> &'static str {
        match self {
            RatingClass::PreferredPlus => "preferred_plus",
            RatingClass::Preferred => "preferred",
            RatingClass::StandardPlus => "standard_plus",
            RatingClass::Standard => "standard",
            RatingClass::TableA => "table_a",
            RatingClass::TableB => "table_b",
            RatingClass::TableC => "table_c",
            RatingClass::TableD => "table_d",
            RatingClass::TableE => "table_e",
            RatingClass::TableF => "table_f",
            RatingClass::TableG => "table_g",
            RatingClass::TableH => "table_h",
            RatingClass::TableI => "table_i",
            RatingClass::TableJ => "table_j",
            RatingClass::TableK => "table_k",
            RatingClass::TableL => "table_l",
            RatingClass::TableM => "table_m",
            RatingClass::TableN => "table_n",
            RatingClass::TableO => "table_o",
            RatingClass::TableP => "table_p",
            RatingClass::TableRated => "table_rated",
            RatingClass::Unknown => "unknown",
        }
    }

    /// Human-readable label for reports and UI payloads
    pub fn label(self) -> &'static str {
        match self {
            RatingClass::PreferredPlus => "Preferred Plus",
            RatingClass::Preferred => "Preferred",
            RatingClass::StandardPlus => "Standard Plus",
            RatingClass::Standard => "Standard",
            RatingClass::TableA => "Table A",
            RatingClass::TableB => "Table B",
            RatingClass::TableC => "Table C",
            RatingClass::TableD => "Table D",
            RatingClass::TableE => "Table E",
            RatingClass::TableF => "Table F",
            RatingClass::TableG => "Table G",
            RatingClass::TableH => "Table H",
            RatingClass::TableI => "Table I",
            RatingClass::TableJ => "Table J",
            RatingClass::TableK => "Table K",
            RatingClass::TableL => "Table L",
            RatingClass::TableM => "Table M",
            RatingClass::TableN => "Table N",
            RatingClass::TableO => "Table O",
            RatingClass::TableP => "Table P",
            RatingClass::TableRated => "Table Rated",
            RatingClass::Unknown => "Unknown",
        }
    }

    /// Parse a canonical snake_case tag
    pub fn from_tag(tag: &str) -> Option<RatingClass> {
        RATING_CLASS_ORDER
            .iter()
            .copied()
            .find(|class| class.as_str() == tag)
    }

    /// Parse a free-form label ("Preferred Plus", "table-b", "STANDARD")
    pub fn parse_label(text: &str) -> Option<RatingClass> {
        RatingClass::from_tag(&crate::rating::normalize_rating_label(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_ordinals() {
        for (idx, class) in RATING_CLASS_ORDER.iter().enumerate() {
            assert_eq!(class.ordinal(), idx);
        }
        assert_eq!(RatingClass::PreferredPlus.ordinal(), 0);
        assert_eq!(RatingClass::Standard.ordinal(), 3);
        assert_eq!(RatingClass::TableA.ordinal(), 4);
        assert_eq!(RatingClass::TableP.ordinal(), 19);
        assert_eq!(RatingClass::TableRated.ordinal(), 20);
        assert_eq!(RatingClass::Unknown.ordinal(), 21);
    }

    #[test]
    fn test_derived_ord_follows_severity() {
        // BTreeMap iteration order relies on this
        assert!(RatingClass::PreferredPlus < RatingClass::Preferred);
        assert!(RatingClass::Standard < RatingClass::TableA);
        assert!(RatingClass::TableP < RatingClass::TableRated);
        assert!(RatingClass::TableRated < RatingClass::Unknown);
    }

    #[test]
    fn test_next_better() {
        assert_eq!(RatingClass::PreferredPlus.next_better(), None);
        assert_eq!(RatingClass::Unknown.next_better(), None);
        assert_eq!(
            RatingClass::Preferred.next_better(),
            Some(RatingClass::PreferredPlus)
        );
        assert_eq!(
            RatingClass::TableA.next_better(),
            Some(RatingClass::Standard)
        );
        assert_eq!(
            RatingClass::TableRated.next_better(),
            Some(RatingClass::TableP)
        );
    }

    #[test]
    fn test_next_worse() {
        assert_eq!(
            RatingClass::PreferredPlus.next_worse(),
            Some(RatingClass::Preferred)
        );
        assert_eq!(
            RatingClass::Standard.next_worse(),
            Some(RatingClass::TableA)
        );
        assert_eq!(
            RatingClass::TableP.next_worse(),
            Some(RatingClass::TableRated)
        );
        assert_eq!(RatingClass::TableRated.next_worse(), None);
        assert_eq!(RatingClass::Unknown.next_worse(), None);

        // The two directions invert each other across the ladder
        for class in RATING_CLASS_ORDER {
            if let Some(worse) = class.next_worse() {
                assert_eq!(worse.next_better(), Some(class));
            }
        }
    }

    #[test]
    fn test_is_rateable() {
        assert!(RatingClass::PreferredPlus.is_rateable());
        assert!(RatingClass::TableP.is_rateable());
        assert!(!RatingClass::TableRated.is_rateable());
        assert!(!RatingClass::Unknown.is_rateable());
    }

    #[test]
    fn test_tags_round_trip() {
        for class in RATING_CLASS_ORDER {
            assert_eq!(RatingClass::from_tag(class.as_str()), Some(class));
        }
        assert_eq!(RatingClass::from_tag("table_q"), None);
    }

    #[test]
    fn test_parse_label_is_lenient() {
        assert_eq!(
            RatingClass::parse_label("Preferred Plus"),
            Some(RatingClass::PreferredPlus)
        );
        assert_eq!(
            RatingClass::parse_label("table-b"),
            Some(RatingClass::TableB)
        );
        assert_eq!(
            RatingClass::parse_label("STANDARD"),
            Some(RatingClass::Standard)
        );
        assert_eq!(RatingClass::parse_label("super preferred"), None);
    }

    #[test]
    fn test_serde_tags_match_as_str() {
        let json = serde_json::to_string(&RatingClass::PreferredPlus).unwrap();
        assert_eq!(json, "\"preferred_plus\"");
        let json = serde_json::to_string(&RatingClass::TableB).unwrap();
        assert_eq!(json, "\"table_b\"");
        let parsed: RatingClass = serde_json::from_str("\"table_rated\"").unwrap();
        assert_eq!(parsed, RatingClass::TableRated);
    }
}
