// Lenient number parsing for calculator input
//
// Accepts plain numbers ("-3.2"), English number words ("negative forty
// five", "one hundred and two", "three point one four") and numbers with a
// unit stuck to them ("50kg").

use crate::error::{AssistError, Result};
use regex::Regex;
use std::sync::OnceLock;

const UNITS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

fn embedded_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[+-]?\d+(\.\d+)?").expect("static regex"))
}

fn grouped_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("static regex"))
}

fn word_value(word: &str) -> Option<f64> {
    if let Some(i) = UNITS.iter().position(|u| *u == word) {
        return Some(i as f64);
    }
    TENS.iter()
        .position(|t| !t.is_empty() && *t == word)
        .map(|i| (i * 10) as f64)
}

fn scale_value(word: &str) -> Option<f64> {
    match word {
        "thousand" => Some(1e3),
        "million" => Some(1e6),
        "billion" => Some(1e9),
        _ => None,
    }
}

/// Parse user input into a finite number
///
/// Ambiguous input such as "1-2" or "five five" is rejected rather than
/// guessed at.
///
/// # Returns
/// * `Err(AssistError::NotANumber)` - Nothing numeric could be read
pub fn parse_number(text: &str) -> Result<f64> {
    let s = text.trim().to_lowercase();
    let not_a_number = || AssistError::NotANumber(text.trim().to_string());

    if s.is_empty() {
        return Err(not_a_number());
    }

    if let Ok(value) = s.parse::<f64>() {
        return if value.is_finite() {
            Ok(value)
        } else {
            Err(not_a_number())
        };
    }

    // 1,000 or 12,345.6
    if grouped_number().is_match(&s) {
        return s.replace(',', "").parse::<f64>().map_err(|_| not_a_number());
    }

    if let Some(value) = parse_words(&s) {
        return Ok(value);
    }

    // "50kg" is fine, "1-2" or "3 by 4" or "5 five" is not
    if has_number_words(&s) {
        return Err(not_a_number());
    }
    let mut found = embedded_number().find_iter(&s);
    match (found.next(), found.next()) {
        (Some(m), None) => m.as_str().parse::<f64>().map_err(|_| not_a_number()),
        _ => Err(not_a_number()),
    }
}

fn has_number_words(s: &str) -> bool {
    split_compounds(s)
        .split_whitespace()
        .any(|w| word_value(w).is_some() || w == "hundred" || scale_value(w).is_some())
}

// What the previous token contributed; decides which token may follow.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Last {
    Start,
    Digit,
    Unit,
    Teen,
    Tens,
    Hundred,
    Scale,
}

// Commas become spaces; a hyphen becomes a space only inside a compound
// like "forty-five".
fn split_compounds(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let joins_words = c == '-'
                && i > 0
                && chars[i - 1].is_alphabetic()
                && chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
            if c == ',' || joins_words {
                ' '
            } else {
                c
            }
        })
        .collect()
}

fn parse_words(s: &str) -> Option<f64> {
    let (mut sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim_start()),
        None => (1.0, s),
    };

    let cleaned = split_compounds(rest);
    let mut tokens = cleaned.split_whitespace().peekable();

    if sign > 0.0 && matches!(tokens.peek(), Some(&"negative") | Some(&"minus")) {
        sign = -1.0;
        tokens.next();
    }

    let mut total = 0.0;
    let mut current = 0.0;
    let mut last = Last::Start;

    while let Some(word) = tokens.next() {
        if word == "and" {
            continue;
        }

        if let Some(value) = word_value(word) {
            let kind = if value < 10.0 {
                Last::Unit
            } else if value < 20.0 {
                Last::Teen
            } else {
                Last::Tens
            };
            let allowed = match kind {
                Last::Unit => matches!(last, Last::Start | Last::Tens | Last::Hundred | Last::Scale),
                _ => matches!(last, Last::Start | Last::Hundred | Last::Scale),
            };
            if !allowed {
                return None;
            }
            current += value;
            last = kind;
        } else if word == "hundred" {
            if matches!(last, Last::Hundred) {
                return None;
            }
            current = if current == 0.0 { 100.0 } else { current * 100.0 };
            last = Last::Hundred;
        } else if let Some(scale) = scale_value(word) {
            if matches!(last, Last::Scale) {
                return None;
            }
            let base = if current == 0.0 { 1.0 } else { current };
            total += base * scale;
            current = 0.0;
            last = Last::Scale;
        } else if word == "point" || word == "dot" {
            let mut digits = String::new();
            for token in tokens.by_ref() {
                match word_value(token) {
                    Some(d) if d < 10.0 => digits.push_str(&(d as u8).to_string()),
                    _ if token.chars().all(|c| c.is_ascii_digit()) => digits.push_str(token),
                    _ => return None,
                }
            }
            if digits.is_empty() {
                return None;
            }
            let fraction: f64 = format!("0.{}", digits).parse().ok()?;
            return Some(sign * (total + current + fraction));
        } else if let Ok(value) = word.parse::<f64>() {
            // A numeral stands alone: "5 thousand" is fine, "1 2" is not
            if !value.is_finite() || last != Last::Start {
                return None;
            }
            current += value;
            last = Last::Digit;
        } else {
            return None;
        }
    }

    (last != Last::Start).then_some(sign * (total + current))
}
