// Support-chat keyword responder
//
// Checks keyword tiers in a fixed order (positive, negative, neutral, then
// whatever was loaded from the responses file) and falls back to a
// reflective prompt. Randomness comes from the caller so replies can be
// reproduced with a seeded rng.

use crate::kb::normalize::normalize;
use rand::seq::SliceRandom;
use rand::Rng;

/// Default `key:value` lines written to a fresh responses file
pub const DEFAULT_FILE_RESPONSES: &[(&str, &str)] = &[
    ("stress", "It's okay to feel stressed sometimes. Take a moment to breathe deeply and ground yourself."),
    ("exam", "Exams can be challenging, but you're capable of handling it. Take it one step at a time."),
    ("anxiety", "Anxiety can be tough, but you're not alone. Focus on small calming steps."),
    ("sad", "It's okay to feel sad sometimes. Be kind to yourself, you deserve care and rest."),
    ("hello", "Hey there! I'm glad you reached out. How are you feeling today?"),
    ("lonely", "Feeling lonely can be heavy. Remember you matter."),
    ("tired", "You must be feeling exhausted. Rest is important, it's okay to slow down."),
    ("bye", "Take care of yourself. You're doing your best, and that's enough."),
];

const POSITIVE: &[(&str, &[&str])] = &[
    ("good", &["I'm really glad to hear you're feeling good!", "That's nice to hear, keep enjoying your day!"]),
    ("great", &["That's wonderful!", "Love that energy!"]),
    ("happy", &["That's beautiful!", "Love to hear that you're feeling happy!"]),
];

const NEGATIVE: &[(&str, &[&str])] = &[
    ("stress", &["It's okay to feel stressed. Take a deep breath and give yourself a moment to relax."]),
    ("tired", &["You must be feeling exhausted. Rest is important, it's okay to slow down."]),
    ("anxiety", &["Anxiety can be overwhelming, but you're not alone. Focus on small calming steps and breathe deeply."]),
    ("sad", &["I'm sorry you're feeling sad. It's okay to take time for yourself."]),
];

const NEUTRAL: &[(&str, &str)] = &[
    ("hello", "Hey there! I'm glad you reached out."),
    ("hi", "Hi! It's nice to hear from you."),
    ("thanks", "You're welcome."),
    ("bye", "Take care of yourself. You matter."),
];

const REFLECTIVE_FALLBACKS: &[&str] = &[
    "I hear you. Would you like to tell me a little more?",
    "That sounds important. I'm here to listen.",
    "You're not alone. Take your time, I'm here.",
];

pub struct SupportResponder {
    positive: Vec<(String, Vec<String>)>,
    negative: Vec<(String, Vec<String>)>,
    neutral: Vec<(String, String)>,
    learned: Vec<(String, String)>,
    fallbacks: Vec<String>,
}

impl Default for SupportResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl SupportResponder {
    pub fn new() -> Self {
        let tier = |entries: &[(&str, &[&str])]| -> Vec<(String, Vec<String>)> {
            entries
                .iter()
                .map(|(k, replies)| (k.to_string(), replies.iter().map(|r| r.to_string()).collect()))
                .collect()
        };

        Self {
            positive: tier(POSITIVE),
            negative: tier(NEGATIVE),
            neutral: NEUTRAL
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            learned: Vec::new(),
            fallbacks: REFLECTIVE_FALLBACKS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add responses loaded from a `key:value` file, checked after the built-in tiers
    pub fn with_file_responses(mut self, responses: Vec<(String, String)>) -> Self {
        self.learned = responses;
        self
    }

    /// Pick a reply for a message
    ///
    /// A keyword matches when some word of the message starts with it, so
    /// "stressed" hits "stress" but "this" does not hit "hi".
    pub fn respond<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> String {
        let text = format!(" {}", normalize(message));

        let hits = |key: &str| text.contains(&format!(" {}", key));

        for (key, replies) in self.positive.iter().chain(self.negative.iter()) {
            if hits(key) {
                if let Some(reply) = replies.choose(rng) {
                    return reply.clone();
                }
            }
        }

        for (key, reply) in self.neutral.iter().chain(self.learned.iter()) {
            if hits(key) {
                return reply.clone();
            }
        }

        self.fallbacks
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "I'm here to listen.".to_string())
    }

    pub fn is_fallback(&self, reply: &str) -> bool {
        self.fallbacks.iter().any(|f| f == reply)
    }
}
