// Data models for knowledge base entries
//
// All models deserialize from the TOML knowledge base format and serialize
// into the JSON the web endpoints return.

use serde::{Deserialize, Serialize};

/// A place on campus that the assistant can talk about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Canonical lower-case name, unique within a knowledge base
    pub key: String,
    /// Display name
    pub label: String,
    /// One-line description
    pub short: String,
    /// How to get there
    pub directions: String,
    /// Extra phrases that refer to this place ("library", "gjbc")
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Marker position on the map image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,
}

impl Place {
    pub fn new(key: &str, label: &str, short: &str, directions: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            short: short.to_string(),
            directions: directions.to_string(),
            aliases: Vec::new(),
            hotspot: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_hotspot(mut self, left: f32, top: f32) -> Self {
        self.hotspot = Some(Hotspot { left, top });
        self
    }

    /// Multi-line card used by the CLI and the desktop-style replies
    pub fn describe(&self) -> String {
        format!(
            "{}\n\n{}\n\nDirections: {}",
            self.label, self.short, self.directions
        )
    }
}

/// Percentage-based (x, y) position relative to the displayed map image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub left: f32,
    pub top: f32,
}

impl Hotspot {
    pub fn is_valid(&self) -> bool {
        (0.0..=100.0).contains(&self.left) && (0.0..=100.0).contains(&self.top)
    }
}

/// Hotspot as exposed by `GET /hotspots`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotMarker {
    pub id: String,
    pub left: f32,
    pub top: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let place = Place::new("pesu gym", "PESU Gym", "Gym up north.", "Head north.");
        let card = place.describe();
        assert!(card.starts_with("PESU Gym"));
        assert!(card.contains("Directions: Head north."));
    }

    #[test]
    fn test_hotspot_bounds() {
        assert!(Hotspot { left: 0.0, top: 100.0 }.is_valid());
        assert!(!Hotspot { left: -1.0, top: 50.0 }.is_valid());
        assert!(!Hotspot { left: 50.0, top: 100.5 }.is_valid());
    }

    #[test]
    fn test_place_from_toml_defaults() {
        let place: Place = toml::from_str(
            r#"
            key = "front gate"
            label = "Front Gate"
            short = "Main entrance."
            directions = "South end."
            "#,
        )
        .unwrap();
        assert!(place.aliases.is_empty());
        assert!(place.hotspot.is_none());
    }
}
