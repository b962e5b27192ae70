//! Rating class taxonomy and label comparison

mod class;
mod compare;

pub use class::{RatingClass, PRIME_CLASSES, RATING_CLASS_ORDER, TABLE_CLASSES};
pub use compare::{normalize_rating_label, rating_comparison_message, ratings_match};
