//! Sort stage: stable ordering by a named key with a fixed direction

use crate::core::field::FieldValue;
use crate::core::{Listable, SortDirection, SortKey};
use std::cmp::Ordering;

/// Order items by the sort key named `name`.
///
/// Unknown keys leave the order unchanged. Missing and null values go last
/// whatever the direction; ties keep their input order.
pub fn apply<'a, T: Listable>(items: Vec<&'a T>, name: Option<&str>) -> Vec<&'a T> {
    let Some(key) = name.and_then(T::sort_key) else {
        return items;
    };
    by_key(items, key)
}

/// Order items by an explicit sort key
pub fn by_key<'a, T: Listable>(items: Vec<&'a T>, key: SortKey) -> Vec<&'a T> {
    let mut keyed: Vec<(Option<FieldValue>, &'a T)> = items
        .into_iter()
        .map(|item| {
            let value = item.field_value(key.field).filter(|v| !v.is_null());
            (value, item)
        })
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| compare(a.as_ref(), b.as_ref(), key.direction));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Compare two optional values, missing last in both directions
pub fn compare(a: Option<&FieldValue>, b: Option<&FieldValue>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.sort_cmp(b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}
