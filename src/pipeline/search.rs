//! Search stage: case-insensitive substring match over searchable fields

use crate::core::Listable;

/// Keep items where at least one searchable field contains `text`.
///
/// Blank text keeps everything. Missing fields never match.
pub fn apply<'a, T: Listable>(items: Vec<&'a T>, text: &str) -> Vec<&'a T> {
    if text.trim().is_empty() {
        return items;
    }

    let needle = text.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches(*item, &needle))
        .collect()
}

/// `needle` must already be lowercased
pub fn matches<T: Listable>(item: &T, needle: &str) -> bool {
    T::searchable_fields().iter().any(|field| {
        item.field_value(field)
            .is_some_and(|value| value.contains_text(needle))
    })
}
