//! The `Listable` trait: what the list pipeline needs from an item type

use crate::core::field::FieldValue;
use crate::core::query::SortDirection;
use uuid::Uuid;

/// A named sort key bound to a field and a fixed direction.
///
/// Directions are part of the key: `views` always means "most viewed
/// first", `title` always means alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Name used in queries (e.g., "latest", "views")
    pub name: &'static str,

    /// Field read through [`Listable::field_value`]
    pub field: &'static str,

    /// Fixed direction for this key
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn ascending(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            field,
            direction: SortDirection::Asc,
        }
    }

    pub const fn descending(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Trait for records that can flow through the list pipeline.
///
/// Items are opaque to the pipeline: everything it needs is read through
/// `field_value`, so a missing field is simply `None` and never an error.
pub trait Listable: Send + Sync + 'static {
    /// Get the unique identifier for this item
    fn id(&self) -> Uuid;

    /// Human-readable label (title for articles, name for companies)
    fn label(&self) -> &str;

    /// Fields consulted by the search stage
    fn searchable_fields() -> &'static [&'static str];

    /// Sort keys understood by this item type
    fn sort_keys() -> &'static [SortKey];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Resolve a sort key by name
    fn sort_key(name: &str) -> Option<SortKey> {
        Self::sort_keys().iter().find(|key| key.name == name).copied()
    }
}
