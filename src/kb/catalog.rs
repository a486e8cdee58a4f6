// The knowledge base: an immutable, ordered set of campus places
//
// Built once at startup, either from the built-in campus literal or from a
// TOML file, then shared read-only by everything that answers questions.

use crate::error::{AssistError, Result};
use crate::kb::models::{HotspotMarker, Place};
use crate::kb::normalize::normalize;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_FALLBACK: &str =
    "Sorry, I don't have a precise answer. Try 'List places' or ask 'Where is the library?'";

pub const DEFAULT_ROUTE_HINT: &str = "From GJBC walk into the main courtyard and head towards \
     the landmark you need: library (NW), gym (N), food court (E).";

/// A phrase that points at a place, already normalized
#[derive(Debug, Clone)]
pub struct Phrase {
    pub text: String,
    pub place: usize,
}

/// On-disk layout of a knowledge base file
#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    origin: Option<String>,
    fallback: Option<String>,
    route_hint: Option<String>,
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    places: Vec<Place>,
    index: HashMap<String, usize>,
    phrases: Vec<Phrase>,
    origin: Option<usize>,
    fallback: String,
    route_hint: String,
}

impl KnowledgeBase {
    /// Build a knowledge base, validating keys, phrases and hotspots
    ///
    /// # Arguments
    /// * `places` - Places in declaration order
    /// * `origin` - Key of the landmark that "from X" questions start at
    ///
    /// # Returns
    /// * `Err(AssistError::DuplicateKey)` - Two places share a key, or a phrase
    ///   points at two different places
    /// * `Err(AssistError::InvalidKnowledgeBase)` - Empty key, bad hotspot or
    ///   unknown origin
    pub fn new(places: Vec<Place>, origin: Option<&str>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut places = places;

        for (i, place) in places.iter_mut().enumerate() {
            place.key = normalize(&place.key);
            if place.key.is_empty() {
                return Err(AssistError::InvalidKnowledgeBase(format!(
                    "place #{} ('{}') has an empty key",
                    i + 1,
                    place.label
                )));
            }
            if let Some(hotspot) = place.hotspot {
                if !hotspot.is_valid() {
                    return Err(AssistError::InvalidKnowledgeBase(format!(
                        "hotspot for '{}' is outside 0-100%",
                        place.key
                    )));
                }
            }
            if index.insert(place.key.clone(), i).is_some() {
                return Err(AssistError::DuplicateKey(place.key.clone()));
            }
        }

        let phrases = Self::build_phrases(&places)?;

        let origin = match origin {
            Some(key) => {
                let key = normalize(key);
                let idx = index.get(&key).copied().ok_or_else(|| {
                    AssistError::InvalidKnowledgeBase(format!("origin '{}' is not a known place", key))
                })?;
                Some(idx)
            }
            None => None,
        };

        Ok(Self {
            places,
            index,
            phrases,
            origin,
            fallback: DEFAULT_FALLBACK.to_string(),
            route_hint: DEFAULT_ROUTE_HINT.to_string(),
        })
    }

    // Key first, then label, then aliases. A phrase may repeat within one place
    // (label "A Block" vs key "a block") but never across places.
    fn build_phrases(places: &[Place]) -> Result<Vec<Phrase>> {
        let mut owner: HashMap<String, usize> = HashMap::new();
        let mut phrases = Vec::new();

        for (i, place) in places.iter().enumerate() {
            let candidates = std::iter::once(place.key.clone())
                .chain(std::iter::once(normalize(&place.label)))
                .chain(place.aliases.iter().map(|a| normalize(a)));

            for text in candidates {
                if text.is_empty() {
                    continue;
                }
                match owner.get(&text) {
                    Some(&other) if other != i => {
                        return Err(AssistError::DuplicateKey(text));
                    }
                    Some(_) => continue,
                    None => {
                        owner.insert(text.clone(), i);
                        phrases.push(Phrase { text, place: i });
                    }
                }
            }
        }

        Ok(phrases)
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn with_route_hint(mut self, hint: impl Into<String>) -> Self {
        self.route_hint = hint.into();
        self
    }

    /// Load a knowledge base from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: KnowledgeBaseFile = toml::from_str(text)?;
        if file.places.is_empty() {
            return Err(AssistError::InvalidKnowledgeBase(
                "no places defined".to_string(),
            ));
        }

        let mut kb = Self::new(file.places, file.origin.as_deref())?;
        if let Some(fallback) = file.fallback {
            kb = kb.with_fallback(fallback);
        }
        if let Some(hint) = file.route_hint {
            kb = kb.with_route_hint(hint);
        }
        Ok(kb)
    }

    /// Load a knowledge base from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let kb = Self::from_toml(&text)?;
        debug!(path = %path.display(), places = kb.len(), "loaded knowledge base");
        Ok(kb)
    }

    /// Look up a place by key; the key is normalized first
    pub fn get(&self, key: &str) -> Option<&Place> {
        self.index.get(&normalize(key)).map(|&i| &self.places[i])
    }

    pub fn place(&self, idx: usize) -> &Place {
        &self.places[idx]
    }

    /// Places in declaration order
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Every phrase that names a place, in declaration order
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn labels(&self) -> Vec<String> {
        self.places.iter().map(|p| p.label.clone()).collect()
    }

    /// Keys sorted alphabetically
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.places.iter().map(|p| p.key.clone()).collect();
        keys.sort();
        keys
    }

    pub fn hotspots(&self) -> Vec<HotspotMarker> {
        self.places
            .iter()
            .filter_map(|p| {
                p.hotspot.map(|h| HotspotMarker {
                    id: p.key.clone(),
                    left: h.left,
                    top: h.top,
                })
            })
            .collect()
    }

    pub fn origin(&self) -> Option<&Place> {
        self.origin.map(|i| &self.places[i])
    }

    pub fn origin_index(&self) -> Option<usize> {
        self.origin
    }

    /// Phrases that name the origin landmark, longest first
    pub fn origin_phrases(&self) -> Vec<&str> {
        let Some(origin) = self.origin else {
            return Vec::new();
        };
        let mut phrases: Vec<&str> = self
            .phrases
            .iter()
            .filter(|p| p.place == origin)
            .map(|p| p.text.as_str())
            .collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()));
        phrases
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn route_hint(&self) -> &str {
        &self.route_hint
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// The built-in campus: the GJBC map crop plus the RR campus overview
    pub fn builtin() -> Self {
        let places = vec![
            Place::new(
                "golden jubilee block",
                "Golden Jubilee Block (GJBC)",
                "Main academic block near the food court, southeast of the map crop.",
                "From the main courtyard, head southeast. The food court and basketball court are nearby.",
            )
            .with_aliases(&["gjbc", "gjb", "gjb block", "golden jubilee", "golden"])
            .with_hotspot(74.0, 68.0),
            Place::new(
                "hornbill coffee",
                "Hornbill Coffee",
                "Coffee shop on the east side of GJBC, near the food court.",
                "From GJBC, walk east across the open area. Hornbill Coffee is on the right.",
            )
            .with_aliases(&["hornbill", "coffee"])
            .with_hotspot(85.0, 60.0),
            Place::new(
                "central library",
                "PES University Central Library",
                "Central library located northwest of GJBC.",
                "From GJBC walk northwest across the open area to reach the library building.",
            )
            .with_aliases(&["library"])
            .with_hotspot(30.0, 18.0),
            Place::new(
                "pesu gym",
                "PESU Gym",
                "Gym near the north, top-center of the map.",
                "Head north from Golden Jubilee Block across the courtyard.",
            )
            .with_aliases(&["gym"])
            .with_hotspot(46.0, 6.0),
            Place::new(
                "mechanical block",
                "Mechanical (C) Block",
                "Central landmark of the map, useful to orient yourself.",
                "From GJBC head slightly northwest to find the Mechanical block.",
            )
            .with_aliases(&["c block", "mechanical"])
            .with_hotspot(50.0, 38.0),
            Place::new(
                "badminton court",
                "PES Badminton Court",
                "Badminton courts to the northeast of the Mechanical block.",
                "From GJBC go northeast across the courtyard to reach the badminton courts.",
            )
            .with_aliases(&["badminton"])
            .with_hotspot(62.0, 28.0),
            Place::new(
                "basketball court",
                "PES GJB Basketball Court",
                "Basketball court just south of GJBC.",
                "Exit GJBC and walk south a short distance to find the basketball court.",
            )
            .with_aliases(&["basketball"])
            .with_hotspot(74.0, 80.0),
            Place::new(
                "food court",
                "PESU GJB Food Court",
                "Food court next to Golden Jubilee Block, east-southeast of it.",
                "From the GJBC main entrance, walk east-southeast to the food court.",
            )
            .with_hotspot(80.0, 72.0),
            Place::new(
                "jv technosoft",
                "JV Technosoft Pvt",
                "Tech office in the southwest of the map crop.",
                "Located southwest of the Central Library area.",
            )
            .with_hotspot(22.0, 76.0),
            Place::new(
                "front gate",
                "Front Gate",
                "Main entrance of the RR campus, at the south end.",
                "Enter the campus through the front gate.",
            )
            .with_aliases(&["main gate", "entrance"]),
            Place::new(
                "scooter parking",
                "Scooter Parking",
                "Two-wheeler parking near the front entrance.",
                "Park scooters near the front gate area.",
            ),
            Place::new(
                "car parking",
                "Car Parking",
                "Four-wheeler parking in the north zone.",
                "Drive to the north-most parking lot.",
            )
            .with_aliases(&["parking lot"]),
            Place::new(
                "student lounge",
                "Student Lounge",
                "Relaxation and hangout zone near the center of campus.",
                "Near A Block and the central pathways.",
            )
            .with_aliases(&["lounge"]),
            Place::new(
                "m block",
                "M Block",
                "Academic block in the southern region.",
                "Near the south side, close to the front gate.",
            ),
            Place::new(
                "a block",
                "A Block",
                "Central academic building with lecture halls.",
                "Find it via the main paths from the courtyard.",
            ),
            Place::new(
                "b block",
                "B Block",
                "Academic block next to A Block.",
                "Walk past A Block along the central path.",
            ),
            Place::new(
                "f block",
                "F Block",
                "Activity and events block, sports nearby.",
                "Toward the northwest region of the campus.",
            ),
            Place::new(
                "h block",
                "H Block",
                "Block located near the boys hostel.",
                "Follow the east-side pathways toward the hostels.",
            ),
            Place::new(
                "tech park",
                "Tech Park",
                "Centre for industry partnerships and labs.",
                "Near the library and the central academic blocks.",
            ),
            Place::new(
                "rr library",
                "Library (RR campus)",
                "Main library of the RR campus.",
                "Near A Block and Tech Park.",
            ),
            Place::new(
                "boys hostel",
                "Boys Hostel",
                "Boys accommodation in the east area.",
                "Follow the east-side pathways from the central area.",
            ),
            Place::new(
                "girls hostel",
                "Girls Hostel",
                "Girls accommodation in the central west area.",
                "Located near the western clusters of blocks.",
            ),
            Place::new(
                "food stall",
                "Food Stall",
                "Food stalls in the middle of the campus.",
                "Head to the middle of campus from the student lounge.",
            ),
            Place::new(
                "medical room",
                "Medical Room",
                "First aid and medical help.",
                "Near A Block and the student lounge.",
            ),
            Place::new(
                "cricket field",
                "Cricket Field",
                "Large sports field on the north side.",
                "Go north from central campus to reach the cricket field.",
            ),
            Place::new(
                "event ground",
                "Event Ground",
                "Open space used for ceremonies and events.",
                "Central open area near the student lounge.",
            ),
        ];

        match Self::new(places, Some("golden jubilee block")) {
            Ok(kb) => kb,
            // The literal above is covered by tests; an error here is a
            // programming mistake in this file.
            Err(e) => panic!("built-in knowledge base is invalid: {}", e),
        }
    }
}
