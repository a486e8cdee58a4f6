/// Place matcher
///
/// Answers free-text campus questions from the knowledge base: route
/// questions, direct phrase containment, map and list requests, fuzzy
/// lookup, and finally the fallback text.

use crate::core::scorer::Scorer;
use crate::kb::normalize::{has_word, normalize, tokens};
use crate::kb::{KnowledgeBase, Place};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Default minimum fuzzy score (0-100) for a place to count as a match
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy)]
pub struct MatcherOptions {
    pub fuzzy_threshold: u8,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// A place found for a query
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub place: &'a Place,
    /// Fuzzy confidence, `None` for exact containment
    pub score: Option<u8>,
}

/// Everything the assistant can say back
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    #[serde(rename = "kb")]
    Place {
        key: String,
        label: String,
        answer: String,
        details: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<u8>,
    },
    Directions {
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        answer: String,
    },
    Map {
        answer: String,
    },
    Places {
        answer: String,
        places: Vec<String>,
    },
    Fallback {
        answer: String,
    },
}

impl Reply {
    /// The one-line answer every reply carries
    pub fn answer(&self) -> &str {
        match self {
            Reply::Place { answer, .. }
            | Reply::Directions { answer, .. }
            | Reply::Map { answer }
            | Reply::Places { answer, .. }
            | Reply::Fallback { answer } => answer,
        }
    }

    /// Full text for terminal output
    pub fn text(&self) -> String {
        match self {
            Reply::Place {
                label,
                answer,
                details,
                score,
                ..
            } => {
                let mut out = format!("{}\n\n{}\n\nDirections: {}", label, answer, details);
                if let Some(score) = score {
                    out.push_str(&format!("\n(match confidence: {}%)", score));
                }
                out
            }
            Reply::Places { answer, places } => {
                let list: Vec<String> = places.iter().map(|p| format!("- {}", p)).collect();
                format!("{}\n{}", answer, list.join("\n"))
            }
            other => other.answer().to_string(),
        }
    }

    fn from_match(m: Match<'_>) -> Self {
        Reply::Place {
            key: m.place.key.clone(),
            label: m.place.label.clone(),
            answer: m.place.short.clone(),
            details: m.place.directions.clone(),
            score: m.score,
        }
    }
}

/// Matches queries against an injected knowledge base
pub struct Matcher {
    kb: Arc<KnowledgeBase>,
    scorer: Scorer,
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(kb: Arc<KnowledgeBase>, options: MatcherOptions) -> Self {
        Self {
            kb,
            scorer: Scorer::new(),
            options,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Answer a free-text question. Never fails: unknown input gets the fallback.
    pub fn answer(&self, query: &str) -> Reply {
        let nq = normalize(query);
        if nq.is_empty() {
            return self.fallback();
        }

        if let Some(reply) = self.route(&nq) {
            debug!(query = %nq, "route question");
            return reply;
        }

        if let Some(m) = self.direct(&nq) {
            debug!(query = %nq, key = %m.place.key, "direct match");
            return Reply::from_match(m);
        }

        if has_word(&nq, "map") {
            return Reply::Map {
                answer: "Displaying the campus map.".to_string(),
            };
        }

        if has_word(&nq, "list") || has_word(&nq, "places") {
            return Reply::Places {
                answer: "Places we know:".to_string(),
                places: self.kb.labels(),
            };
        }

        if let Some(m) = self.fuzzy(&nq) {
            debug!(query = %nq, key = %m.place.key, score = ?m.score, "fuzzy match");
            return Reply::from_match(m);
        }

        debug!(query = %nq, "no match");
        self.fallback()
    }

    /// Plain lookup: direct containment, then fuzzy. No intents, no routes.
    pub fn lookup(&self, query: &str) -> Option<Match<'_>> {
        let nq = normalize(query);
        if nq.is_empty() {
            return None;
        }
        self.direct(&nq).or_else(|| self.fuzzy(&nq))
    }

    fn fallback(&self) -> Reply {
        Reply::Fallback {
            answer: self.kb.fallback().to_string(),
        }
    }

    // "... from gjbc" questions. The origin phrase is cut out and whatever
    // remains is matched as the destination.
    fn route(&self, nq: &str) -> Option<Reply> {
        let origin = self.kb.origin_index()?;

        for phrase in self.kb.origin_phrases() {
            for prefix in ["from the ", "from "] {
                let needle = format!("{}{}", prefix, phrase);
                let Some(pos) = find_phrase(nq, &needle) else {
                    continue;
                };

                let rest = format!("{} {}", &nq[..pos], &nq[pos + needle.len()..]);
                let rest = normalize(&rest);

                let destination = self
                    .direct(&rest)
                    .or_else(|| self.fuzzy(&rest))
                    .filter(|m| m.place.key != self.kb.place(origin).key);

                return Some(match destination {
                    Some(m) => Reply::Directions {
                        key: Some(m.place.key.clone()),
                        label: Some(m.place.label.clone()),
                        answer: m.place.directions.clone(),
                    },
                    None => Reply::Directions {
                        key: None,
                        label: None,
                        answer: self.kb.route_hint().to_string(),
                    },
                });
            }
        }

        None
    }

    // Longest contained phrase wins; ties keep declaration order.
    fn direct(&self, nq: &str) -> Option<Match<'_>> {
        let mut best: Option<(usize, usize)> = None;

        for phrase in self.kb.phrases() {
            if find_phrase(nq, &phrase.text).is_none() {
                continue;
            }
            let len = phrase.text.len();
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((phrase.place, len));
            }
        }

        best.map(|(idx, _)| Match {
            place: self.kb.place(idx),
            score: None,
        })
    }

    fn fuzzy(&self, nq: &str) -> Option<Match<'_>> {
        let query_tokens = tokens(nq);
        let mut best: Option<(usize, u8)> = None;

        for phrase in self.kb.phrases() {
            let score = self.scorer.phrase_score(&query_tokens, &phrase.text);
            if score == 0 {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((phrase.place, score));
            }
        }

        best.filter(|(_, score)| *score >= self.options.fuzzy_threshold)
            .map(|(idx, score)| Match {
                place: self.kb.place(idx),
                score: Some(score),
            })
    }
}

// Byte offset of `needle` in `haystack` where it starts and ends on word
// boundaries. `haystack` is normalized, so a boundary is a space or an edge.
fn find_phrase(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let end = i + needle.len();
        let starts = i == 0 || haystack[..i].ends_with(' ');
        let ends = end == haystack.len() || haystack[end..].starts_with(' ');
        starts && ends
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::catalog::{DEFAULT_FALLBACK, DEFAULT_ROUTE_HINT};

    fn matcher() -> Matcher {
        Matcher::new(Arc::new(KnowledgeBase::builtin()), MatcherOptions::default())
    }

    fn key_of(reply: &Reply) -> Option<&str> {
        match reply {
            Reply::Place { key, .. } => Some(key),
            Reply::Directions { key, .. } => key.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn test_exact_key_returns_its_value() {
        let m = matcher();

        for place in m.knowledge_base().places() {
            let reply = m.answer(&format!("tell me about {} please", place.key));
            assert_eq!(key_of(&reply), Some(place.key.as_str()), "query for {}", place.key);
            assert_eq!(reply.answer(), place.short);
        }
    }

    #[test]
    fn test_empty_query_is_fallback() {
        let m = matcher();

        for q in ["", "   ", "\t\n", "?!?"] {
            assert_eq!(
                m.answer(q),
                Reply::Fallback {
                    answer: DEFAULT_FALLBACK.to_string()
                }
            );
        }
        assert!(m.lookup("   ").is_none());
    }

    #[test]
    fn test_alias_match() {
        let m = matcher();

        let reply = m.answer("Where is the library?");
        assert_eq!(key_of(&reply), Some("central library"));

        let reply = m.answer("gym timings");
        assert_eq!(key_of(&reply), Some("pesu gym"));
    }

    #[test]
    fn test_longest_phrase_wins() {
        let m = matcher();

        // "gjb" and "basketball" both appear; "basketball court" is longer
        let reply = m.answer("where is the gjb basketball court");
        assert_eq!(key_of(&reply), Some("basketball court"));

        // "b block" is inside "gjb block", but the longer alias wins
        let reply = m.answer("is the gjb block open");
        assert_eq!(key_of(&reply), Some("golden jubilee block"));
    }

    #[test]
    fn test_phrases_match_whole_words_only() {
        let m = matcher();

        // "h block" sits across "which block", "b block" is a prefix of "b blocks"
        assert!(m.direct("which block has the labs").is_none());
        assert!(m.direct("where is the b blocks tower").is_none());

        // "m block" sits across "from block"
        let reply = m.answer("how far is the gym from block a");
        assert_eq!(key_of(&reply), Some("pesu gym"));
        assert_eq!(m.direct("how far is the gym from block a").unwrap().place.key, "pesu gym");

        assert_eq!(find_phrase("the b block", "b block"), Some(4));
        assert_eq!(find_phrase("gjb block", "b block"), None);
        assert_eq!(find_phrase("b blocks", "b block"), None);
    }

    #[test]
    fn test_map_request() {
        let m = matcher();

        assert!(matches!(m.answer("show map"), Reply::Map { .. }));
        assert!(matches!(m.answer("MAP!"), Reply::Map { .. }));
    }

    #[test]
    fn test_list_request() {
        let m = matcher();

        match m.answer("list places") {
            Reply::Places { places, .. } => {
                assert_eq!(places.len(), m.knowledge_base().len());
                assert_eq!(places[0], "Golden Jubilee Block (GJBC)");
            }
            other => panic!("Expected places, got {:?}", other),
        }
    }

    #[test]
    fn test_fuzzy_typo() {
        let m = matcher();

        let reply = m.answer("where is the libary");
        match reply {
            Reply::Place { key, score, .. } => {
                assert_eq!(key, "central library");
                assert_eq!(score, Some(86));
            }
            other => panic!("Expected fuzzy place, got {:?}", other),
        }

        let found = m.lookup("hornbil cofee").unwrap();
        assert_eq!(found.place.key, "hornbill coffee");
        assert!(found.score.unwrap() >= DEFAULT_FUZZY_THRESHOLD);
    }

    #[test]
    fn test_fuzzy_threshold_respected() {
        let strict = Matcher::new(
            Arc::new(KnowledgeBase::builtin()),
            MatcherOptions { fuzzy_threshold: 95 },
        );
        assert!(matches!(strict.answer("where is the libary"), Reply::Fallback { .. }));
    }

    #[test]
    fn test_route_with_destination() {
        let m = matcher();

        let reply = m.answer("How do I get to the gym from GJBC?");
        assert_eq!(key_of(&reply), Some("pesu gym"));
        match &reply {
            Reply::Directions { label, .. } => assert_eq!(label.as_deref(), Some("PESU Gym")),
            other => panic!("Expected directions, got {:?}", other),
        }
        assert_eq!(
            reply.answer(),
            m.knowledge_base().get("pesu gym").unwrap().directions
        );
    }

    #[test]
    fn test_route_without_destination() {
        let m = matcher();

        for q in ["directions from gjbc", "starting from the golden jubilee block"] {
            assert_eq!(
                m.answer(q),
                Reply::Directions {
                    key: None,
                    label: None,
                    answer: DEFAULT_ROUTE_HINT.to_string()
                }
            );
        }
    }

    #[test]
    fn test_unknown_is_fallback() {
        let m = matcher();
        assert!(matches!(
            m.answer("what's the weather tomorrow"),
            Reply::Fallback { .. }
        ));
    }

    #[test]
    fn test_reply_serialization() {
        let m = matcher();

        let json = serde_json::to_value(m.answer("hornbill coffee")).unwrap();
        assert_eq!(json["type"], "kb");
        assert_eq!(json["key"], "hornbill coffee");
        assert!(json.get("score").is_none());

        let json = serde_json::to_value(m.answer("show map")).unwrap();
        assert_eq!(json["type"], "map");
        assert!(json["answer"].is_string());
    }

    #[test]
    fn test_reply_text() {
        let m = matcher();

        let text = m.answer("where is the libary").text();
        assert!(text.starts_with("PES University Central Library"));
        assert!(text.contains("(match confidence: 86%)"));

        let text = m.answer("list places").text();
        assert!(text.contains("- Hornbill Coffee"));
    }
}
