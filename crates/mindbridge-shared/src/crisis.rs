//! Client-side crisis keyword heuristic.
//!
//! A coarse substring scan used only to decide when to surface support
//! resources. It is not triage: no stemming, no negation handling, English
//! phrases only.

/// Phrases that trigger the crisis resources. Matched case-insensitively as
/// substrings.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "hurt myself",
    "self harm",
    "want to die",
    "better off dead",
    "no point living",
    "cutting myself",
    "overdose",
    "jump off",
    "hang myself",
    "can't go on",
    "hopeless",
    "worthless",
    "useless",
    "hate myself",
    "want to disappear",
];

/// Returns the first configured phrase contained in `text`, if any.
pub fn first_crisis_phrase(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    CRISIS_PHRASES
        .iter()
        .copied()
        .find(|phrase| lower.contains(phrase))
}

/// Whether `text` contains any crisis phrase.
pub fn contains_crisis_indicator(text: &str) -> bool {
    first_crisis_phrase(text).is_some()
}
