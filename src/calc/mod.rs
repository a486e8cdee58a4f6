/// Calculators
///
/// Closed-form statics formulas, lenient number parsing and genre statistics.

pub mod genres;
pub mod number_words;
pub mod statics;

pub use genres::{aggregate, parse_readers, GenreReport};
pub use number_words::parse_number;
pub use statics::{
    force_components, reactions, trapezoid_centroid, Centroid, Components, Reactions,
    DEFAULT_SUPPORT_DISTANCE,
};
