/// Inner-journey questionnaire
///
/// Four questions asked in order; the answers are summarized at the end and
/// the journey resets for the next traveller.

const QUESTIONS: [&str; 4] = [
    "What shall I call you?",
    "Who do you believe you are:\nA) The body\nB) The mind\nC) The emotions\nD) The awareness\n\nChoose A, B, C, or D:",
    "Now tell me in one word what you feel your true nature is. Examples: peace, void, happiness, energy, silence:",
    "How does this void feel to you:\nA) Peaceful nothingness\nB) Powerful silence\nC) Spacious awareness\nD) Presence without identity\nE) All of the above\n\nChoose A, B, C, D, or E:",
];

/// What the journey says after an answer
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Next numbered question
    Question(String),
    /// Final summary; the journey has been reset
    Summary(String),
    /// Blank answer, nothing recorded
    Ignored,
}

#[derive(Debug, Default)]
pub struct Journey {
    answers: Vec<String>,
}

impl Journey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart and return the first question
    pub fn start(&mut self) -> String {
        self.answers.clear();
        Self::prompt(0)
    }

    /// Index of the question currently waiting for an answer
    pub fn stage(&self) -> usize {
        self.answers.len()
    }

    pub fn question_count() -> usize {
        QUESTIONS.len()
    }

    pub fn answer(&mut self, text: &str) -> Step {
        let text = text.trim();
        if text.is_empty() {
            return Step::Ignored;
        }

        self.answers.push(text.to_string());

        if self.answers.len() < QUESTIONS.len() {
            return Step::Question(Self::prompt(self.answers.len()));
        }

        let summary = self.summary();
        self.answers.clear();
        Step::Summary(summary)
    }

    fn prompt(stage: usize) -> String {
        format!("[{}] {}", stage + 1, QUESTIONS[stage])
    }

    fn summary(&self) -> String {
        let name = self.answers.first().map(String::as_str).unwrap_or("Traveller");
        let who = self.answers.get(1).map(String::as_str).unwrap_or("not given");
        let nature = self.answers.get(2).map(String::as_str).unwrap_or("undefined");

        let mut summary = format!(
            "Analysis Complete for {}\n\nYour Exploration:\n- Primary belief of self: {}\n- True nature: {}\n\n",
            name,
            who.to_uppercase(),
            nature.to_uppercase()
        );

        let who_lower = who.to_lowercase();
        if who_lower == "d" || who_lower.contains("awareness") {
            summary.push_str("This aligns with pure awareness.\n");
        }

        summary.push_str("\nThank you for this inner journey, traveller of consciousness.");
        summary
    }
}
