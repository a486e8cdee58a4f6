/// Core functionality modules
///
/// Contains the question answering logic: place matching with fuzzy
/// scoring, the support-chat responder and the inner-journey questionnaire.

pub mod journey;
pub mod matcher;
pub mod responder;
pub mod scorer;

pub use journey::{Journey, Step};
pub use matcher::{Match, Matcher, MatcherOptions, Reply};
pub use responder::SupportResponder;
pub use scorer::Scorer;
