//! Attribute stage: exact-match facets, ANDed together

use crate::core::field::FieldValue;
use crate::core::{Facet, Listable};

/// Keep items satisfying every active facet.
pub fn apply<'a, 'q, T, I>(items: Vec<&'a T>, facets: I) -> Vec<&'a T>
where
    T: Listable,
    I: IntoIterator<Item = (&'q str, &'q Facet)>,
{
    let active: Vec<(&str, &Facet)> = facets
        .into_iter()
        .filter(|(_, facet)| facet.is_active())
        .collect();

    if active.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            active
                .iter()
                .all(|(field, facet)| matches(item.field_value(field).as_ref(), facet))
        })
        .collect()
}

/// Whether a field value satisfies a single facet.
///
/// Inactive facets match everything; a missing value never satisfies an
/// active facet.
pub fn matches(value: Option<&FieldValue>, facet: &Facet) -> bool {
    if !facet.is_active() {
        return true;
    }

    let Some(value) = value else {
        return false;
    };

    match facet {
        Facet::Flag(_) => value.as_bool() == Some(true),
        Facet::Text(expected) => value.matches_text(expected.trim()),
        Facet::Any => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::Row;

    #[test]
    fn test_no_active_facets_is_identity() {
        let rows = Row::titled(&["a", "b"]);
        let all = Facet::text("all");
        let off = Facet::Flag(false);

        let result = apply(
            rows.iter().collect(),
            [("category", &all), ("featured", &off)],
        );
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_text_facet_ignores_case() {
        let mut rows = Row::titled(&["a", "b", "c"]);
        rows[0].category = Some("Research".into());
        rows[1].category = Some("policy".into());
        rows[2].category = Some("RESEARCH".into());

        let facet = Facet::text("research");
        let result = apply(rows.iter().collect(), [("category", &facet)]);

        let titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_flag_facet_requires_true() {
        let mut rows = Row::titled(&["a", "b", "c"]);
        rows[0].featured = Some(true);
        rows[1].featured = Some(false);
        rows[2].featured = None;

        let facet = Facet::Flag(true);
        let result = apply(rows.iter().collect(), [("featured", &facet)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "a");
    }

    #[test]
    fn test_list_facet_uses_membership() {
        let mut rows = Row::titled(&["a", "b"]);
        rows[0].tags = vec!["NLP".into(), "Vision".into()];
        rows[1].tags = vec!["Robotics".into()];

        let facet = Facet::text("vision");
        let result = apply(rows.iter().collect(), [("tags", &facet)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "a");
    }

    #[test]
    fn test_facets_are_anded() {
        let mut rows = Row::titled(&["a", "b", "c"]);
        rows[0].category = Some("research".into());
        rows[0].featured = Some(true);
        rows[1].category = Some("research".into());
        rows[1].featured = Some(false);
        rows[2].category = Some("policy".into());
        rows[2].featured = Some(true);

        let category = Facet::text("research");
        let featured = Facet::Flag(true);
        let result = apply(
            rows.iter().collect(),
            [("category", &category), ("featured", &featured)],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "a");
    }

    #[test]
    fn test_missing_field_fails_active_facet() {
        assert!(!matches(None, &Facet::text("x")));
        assert!(matches(None, &Facet::Any));
    }
}
