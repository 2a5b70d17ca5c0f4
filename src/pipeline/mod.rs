//! The list view pipeline
//!
//! Every listing screen (all news, breaking, trending, companies) turns a
//! fetched collection into a page the same way:
//!
//! 1. [`search`] keeps items containing the search text
//! 2. [`facets`] keeps items matching every active facet
//! 3. [`sort`] orders them by a named key with a fixed direction
//! 4. [`paginate`] slices out the requested page
//!
//! The pipeline borrows its input, never mutates it and never fails:
//! missing fields are non-matches and sort last, out-of-range pages are
//! empty.
//!
//! # Example
//!
//! ```rust,ignore
//! let query = ListQuery::new().with_search("gpt").with_sort("views").with_page(1, 10);
//! let page = pipeline::run(&articles, &query);
//! println!("{} of {} results", page.items.len(), page.total_count());
//! ```

pub mod facets;
pub mod paginate;
pub mod search;
pub mod sort;

use crate::core::{ListPage, ListQuery, Listable};

/// Run search, facets, sort and pagination over `items`
pub fn run<'a, T: Listable>(items: &'a [T], query: &ListQuery) -> ListPage<&'a T> {
    let refs: Vec<&'a T> = items.iter().collect();
    let input = refs.len();

    let matched = search::apply(refs, &query.search);
    let searched = matched.len();

    let filtered = facets::apply(matched, query.active_facets());
    let ordered = sort::apply(filtered, query.sort.as_deref());
    let page = paginate::apply(ordered, query.page, query.page_size);

    tracing::debug!(
        input,
        searched,
        total = page.total_count(),
        page = page.pagination.page,
        total_pages = page.total_pages(),
        "list pipeline run"
    );

    page
}

/// Run the pipeline and clone the resulting page
pub fn run_owned<T: Listable + Clone>(items: &[T], query: &ListQuery) -> ListPage<T> {
    run(items, query).cloned()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::core::field::FieldValue;
    use crate::core::{Listable, SortKey};
    use uuid::Uuid;

    /// Minimal listable row for stage tests
    #[derive(Debug, Clone)]
    pub struct Row {
        pub id: Uuid,
        pub title: String,
        pub category: Option<String>,
        pub tags: Vec<String>,
        pub featured: Option<bool>,
        pub views: Option<i64>,
    }

    impl Row {
        pub fn titled(titles: &[&str]) -> Vec<Row> {
            titles
                .iter()
                .map(|title| Row {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    category: Some("general".to_string()),
                    tags: Vec::new(),
                    featured: None,
                    views: None,
                })
                .collect()
        }
    }

    impl Listable for Row {
        fn id(&self) -> Uuid {
            self.id
        }

        fn label(&self) -> &str {
            &self.title
        }

        fn searchable_fields() -> &'static [&'static str] {
            &["title", "category", "tags"]
        }

        fn sort_keys() -> &'static [SortKey] {
            const KEYS: &[SortKey] = &[
                SortKey::ascending("title", "title"),
                SortKey::ascending("category", "category"),
                SortKey::descending("views", "views"),
            ];
            KEYS
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "title" => Some(self.title.clone().into()),
                "category" => self.category.clone().map(FieldValue::from),
                "tags" => Some(self.tags.clone().into()),
                "featured" => self.featured.map(FieldValue::from),
                "views" => self.views.map(FieldValue::from),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Row;
    use super::*;

    #[test]
    fn test_identity_query_truncates_to_page_size() {
        let rows = Row::titled(&["c", "a", "b", "d"]);
        let query = ListQuery::new().with_page(1, 3);

        let page = run(&rows, &query);
        let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
        assert_eq!(page.total_count(), 4);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_stages_compose_in_order() {
        let mut rows = Row::titled(&["GPT one", "GPT two", "GPT three", "Other"]);
        rows[0].views = Some(1);
        rows[1].views = Some(3);
        rows[2].views = Some(2);
        rows[3].views = Some(100);
        rows[2].category = Some("policy".into());

        let query = ListQuery::new()
            .with_search("gpt")
            .with_facet("category", "general")
            .with_sort("views")
            .with_page(1, 10);

        let page = run(&rows, &query);
        let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["GPT two", "GPT one"]);
        assert_eq!(page.total_count(), 2);
    }

    #[test]
    fn test_input_is_untouched() {
        let mut rows = Row::titled(&["b", "a"]);
        rows[0].views = Some(1);
        rows[1].views = Some(2);

        let _ = run(&rows, &ListQuery::new().with_sort("views"));
        assert_eq!(rows[0].title, "b");
        assert_eq!(rows[1].title, "a");
    }

    #[test]
    fn test_run_owned_clones_page() {
        let rows = Row::titled(&["a"]);
        let page = run_owned(&rows, &ListQuery::new());
        assert_eq!(page.items[0].id, rows[0].id);
    }
}
