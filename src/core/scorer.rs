/// Fuzzy scoring for place phrases
///
/// Turns skim-style subsequence matches into a 0-100 confidence score.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Query tokens shorter than this never take part in fuzzy scoring
const MIN_TOKEN_LEN: usize = 2;

/// Scores how closely a query resembles a phrase
pub struct Scorer {
    matcher: SkimMatcherV2,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Similarity of two single tokens (0.0-1.0)
    ///
    /// Equal tokens score 1.0. If either token is a fuzzy subsequence of the
    /// other ("libary" in "library"), the score is the ratio of their lengths.
    /// Anything else scores 0.0.
    pub fn token_similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let related = self.matcher.fuzzy_match(b, a).is_some()
            || self.matcher.fuzzy_match(a, b).is_some();
        if !related {
            return 0.0;
        }

        let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
        la.min(lb) / la.max(lb)
    }

    /// Score a phrase against query tokens (0-100)
    ///
    /// Every phrase token takes its best similarity against any query token;
    /// the score is their mean.
    ///
    /// # Arguments
    /// * `query_tokens` - Tokens of the normalized query
    /// * `phrase` - A normalized knowledge base phrase
    pub fn phrase_score(&self, query_tokens: &[&str], phrase: &str) -> u8 {
        let phrase_tokens: Vec<&str> = phrase.split_whitespace().collect();
        if phrase_tokens.is_empty() {
            return 0;
        }

        let total: f64 = phrase_tokens
            .iter()
            .map(|pt| {
                query_tokens
                    .iter()
                    .filter(|qt| qt.chars().count() >= MIN_TOKEN_LEN)
                    .map(|qt| self.token_similarity(qt, pt))
                    .fold(0.0, f64::max)
            })
            .sum();

        let mean = total / phrase_tokens.len() as f64;
        (mean * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
