/// Knowledge base module
///
/// The fixed mapping from campus place names to descriptions and directions.

pub mod catalog;
pub mod models;
pub mod normalize;

pub use catalog::KnowledgeBase;
pub use models::{Hotspot, HotspotMarker, Place};
pub use normalize::normalize;
