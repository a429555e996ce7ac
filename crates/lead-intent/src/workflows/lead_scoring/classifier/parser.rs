use std::sync::OnceLock;

use regex::Regex;

use crate::workflows::lead_scoring::domain::IntentLabel;

const MAX_REASONING_CHARS: usize = 350;
const NO_RESPONSE_REASONING: &str = "No response from model; default to Medium.";
const NO_EXPLANATION_REASONING: &str = "No explanation provided.";

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(high|medium|low)\b").expect("label regex compiles"))
}

fn leading_label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*(high|medium|low)\b\s*[:\-\x{2014}]?\s*").expect("prefix regex compiles")
    })
}

/// Pulls an intent label and a short reasoning out of free-form model output.
///
/// The label is the first standalone `High`/`Medium`/`Low` anywhere in the text (case-insensitive),
/// defaulting to `Medium`. Only a standalone label at the very start (plus one `:`, `-` or em dash)
/// is stripped from the reasoning, which is then capped at 350 characters.
pub fn parse_label_and_reasoning(text: &str) -> (IntentLabel, String) {
    if text.is_empty() {
        return (IntentLabel::Medium, NO_RESPONSE_REASONING.to_string());
    }

    let label = label_pattern()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|matched| IntentLabel::parse(matched.as_str()))
        .unwrap_or(IntentLabel::Medium);

    let stripped = leading_label_pattern().replace(text.trim(), "");
    let mut reasoning = stripped.trim().to_string();

    if reasoning.chars().count() > MAX_REASONING_CHARS {
        reasoning = reasoning
            .chars()
            .take(MAX_REASONING_CHARS - 3)
            .chain("...".chars())
            .collect();
    }
    if reasoning.is_empty() {
        reasoning = NO_EXPLANATION_REASONING.to_string();
    }

    (label, reasoning)
}
