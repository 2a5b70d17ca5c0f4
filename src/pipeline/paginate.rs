//! Pagination stage

use crate::core::{ListPage, PaginationMeta};

/// Slice `[(page-1)*page_size, page*page_size)` out of `items`.
///
/// Pages past the end come back empty with correct totals. `page` 0 is read
/// as page 1 and `page_size` 0 as 1.
pub fn apply<T>(items: Vec<T>, page: usize, page_size: usize) -> ListPage<T> {
    let pagination = PaginationMeta::new(page, page_size, items.len());

    let start = (pagination.page - 1)
        .saturating_mul(pagination.page_size)
        .min(items.len());
    let end = start.saturating_add(pagination.page_size).min(items.len());

    let items = items
        .into_iter()
        .skip(start)
        .take(end - start)
        .collect();

    ListPage { items, pagination }
}
