use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::inventory::types::{Entry, InventoryRecord};

/// Decompose (NFKD) and drop combining marks, so accented letters
/// fall back to their base letter.
pub fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

pub fn normalize_record(record: InventoryRecord) -> InventoryRecord {
    record
        .entries
        .into_iter()
        .map(|entry| Entry {
            label: strip_accents(&entry.label),
            value: strip_accents(&entry.value),
        })
        .collect()
}
