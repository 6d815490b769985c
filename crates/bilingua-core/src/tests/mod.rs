
use crate::dictionary::{Dictionary, WordEntry};

/// Dictionary built from `(key, translation, count)` triples
pub(crate) fn dictionary(entries: &[(&str, &str, u32)]) -> Dictionary {
    entries
        .iter()
        .map(|(key, translation, count)| WordEntry::with_translation(*key, *translation, *count))
        .collect()
}
