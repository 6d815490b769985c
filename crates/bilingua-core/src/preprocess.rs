//! Word extraction: normalize a text fragment and pick out dictionary words.
//!
//! Normalization is an ordered list of pure string steps, applied in
//! [`STEPS`] order. Each step can be exercised on its own.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dictionary::Dictionary;

/// One normalization pass
pub type Step = fn(&str) -> String;

/// Normalization passes in the order they run
pub const STEPS: &[(&str, Step)] = &[
    ("lowercase", lowercase),
    ("decode_entities", decode_entities),
    ("strip_bracket_annotations", strip_bracket_annotations),
    ("strip_tags", strip_tags),
    ("strip_index_markers", strip_index_markers),
    ("strip_punctuation", strip_punctuation),
];

/// Characters treated as word separators
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', '"', ';', ':', '@', '#', '$', '%', '^', '&', '*', '(', ')', '-', '=',
    '_', '+', '[', ']', '{', '}', '|', '/', '`', '~', '<', '>', '\'', '\\', '…',
];

const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&apos;", "'"),
    ("&quot;", "\""),
];

static BRACKET_ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\[.*\]\)").unwrap());
// Greedy on purpose: spans from the first `<` to the last `>` on a line.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*>").unwrap());
static INDEX_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d\]").unwrap());

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, ch)| acc.replace(entity, ch))
}

/// `([...])` spans
pub fn strip_bracket_annotations(text: &str) -> String {
    BRACKET_ANNOTATION.replace_all(text, " ").into_owned()
}

/// `<...>` spans
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, " ").into_owned()
}

/// `[N]` placeholders
pub fn strip_index_markers(text: &str) -> String {
    INDEX_MARKER.replace_all(text, " ").into_owned()
}

pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect()
}

/// Run every step of [`STEPS`] over `text`
pub fn normalize(text: &str) -> String {
    STEPS
        .iter()
        .fold(text.to_string(), |acc, (_, step)| step(&acc))
}

/// Split normalized text into candidate words
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split_whitespace()
        .map(|token| token.trim_end_matches('’'))
        .filter(|token| !token.is_empty())
}

/// Dictionary words found in `text`, each once, in first-seen order
pub fn extract<'d>(text: &str, dictionary: &'d Dictionary) -> Vec<&'d str> {
    let normalized = normalize(text);
    let mut seen = HashSet::new();

    tokenize(&normalized)
        .filter_map(|token| dictionary.key_of(token))
        .filter(|key| seen.insert(*key))
        .collect()
}
