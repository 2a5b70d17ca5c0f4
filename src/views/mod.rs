//! List view controllers
//!
//! A [`ListView`] owns what a listing screen keeps between interactions:
//! the last fetched collection and the current query. Every mutation of
//! search, facets or sort sends the view back to page 1, and fetch results
//! are applied only when they belong to the latest request.

pub mod preset;
pub mod request;

pub use preset::{ViewKind, ViewPreset};
pub use request::{RequestToken, RequestTracker};

use crate::core::{
    CompanyService, Facet, ListPage, ListQuery, Listable, NewsSource, Result, query::total_pages,
};
use crate::entities::{Article, Company};
use crate::pipeline;
use std::future::Future;

/// Loading state of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// State behind one listing screen
#[derive(Debug)]
pub struct ListView<T> {
    preset: ViewPreset,
    query: ListQuery,
    items: Vec<T>,
    tracker: RequestTracker,
    state: LoadState,
}

impl<T: Listable> ListView<T> {
    pub fn new(preset: ViewPreset) -> Self {
        let query = ListQuery {
            sort: preset.default_sort.clone(),
            page_size: preset.page_size,
            ..ListQuery::default()
        };

        Self {
            preset,
            query,
            items: Vec::new(),
            tracker: RequestTracker::new(),
            state: LoadState::Idle,
        }
    }

    pub fn for_kind(kind: ViewKind) -> Self {
        Self::new(ViewPreset::for_kind(kind))
    }

    pub fn preset(&self) -> &ViewPreset {
        &self.preset
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Last successfully fetched collection, unfiltered
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Tracker shared with fetches running outside the view
    pub fn tracker(&self) -> RequestTracker {
        self.tracker.clone()
    }

    // === Query mutations (all reset to page 1) ===

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.query.page = 1;
    }

    pub fn set_facet(&mut self, name: impl Into<String>, facet: impl Into<Facet>) {
        self.query.facets.insert(name.into(), facet.into());
        self.query.page = 1;
    }

    pub fn clear_facet(&mut self, name: &str) {
        self.query.facets.shift_remove(name);
        self.query.page = 1;
    }

    pub fn clear_facets(&mut self) {
        self.query.facets.clear();
        self.query.page = 1;
    }

    /// Change the sort key; `None` falls back to the preset default
    pub fn set_sort(&mut self, key: Option<&str>) {
        self.query.sort = key
            .map(str::to_string)
            .or_else(|| self.preset.default_sort.clone());
        self.query.page = 1;
    }

    /// Reset search, facets, sort and page to the preset defaults
    pub fn reset(&mut self) {
        self.query = ListQuery {
            sort: self.preset.default_sort.clone(),
            page_size: self.preset.page_size,
            ..ListQuery::default()
        };
    }

    // === Paging ===

    /// Number of pages for the current query
    pub fn total_pages(&self) -> usize {
        let unpaged = ListQuery {
            sort: None,
            page: 1,
            page_size: usize::MAX,
            ..self.query.clone()
        };
        let filtered = pipeline::run(&self.items, &unpaged);
        total_pages(filtered.total_count(), self.query.page_size())
    }

    /// Jump to `page`, clamped to `1..=total_pages`; returns the page taken
    pub fn set_page(&mut self, page: usize) -> usize {
        self.query.page = page.clamp(1, self.total_pages());
        self.query.page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.query.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.query.page.saturating_sub(1))
    }

    /// Run the pipeline for the current query
    pub fn current_page(&self) -> ListPage<&T> {
        pipeline::run(&self.items, &self.query)
    }

    // === Fetch lifecycle ===

    /// Mark a fetch as started and get its token
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.state = LoadState::Loading;
        self.tracker.issue()
    }

    /// Apply a fetch result if `token` is still the latest request.
    ///
    /// Returns `Ok(false)` for a superseded response (discarded whatever
    /// its outcome), `Ok(true)` once fresh items are in place, and the
    /// fetch error when the latest request failed. A failed fetch keeps the
    /// previously loaded items.
    pub fn complete_fetch(&mut self, token: RequestToken, result: Result<Vec<T>>) -> Result<bool> {
        if !self.tracker.is_current(token) {
            tracing::warn!(
                view = ?self.preset.kind,
                generation = token.generation(),
                "discarding stale response"
            );
            return Ok(false);
        }

        match result {
            Ok(items) => {
                tracing::debug!(view = ?self.preset.kind, count = items.len(), "view refreshed");
                self.items = items;
                self.state = LoadState::Ready;
                let pages = self.total_pages();
                if self.query.page > pages {
                    self.query.page = pages;
                }
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(view = ?self.preset.kind, error = %err, "view refresh failed");
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Run `fetch` under a fresh token and apply its result
    pub async fn refresh_with<F, Fut>(&mut self, fetch: F) -> Result<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let token = self.begin_fetch();
        let result = fetch().await;
        self.complete_fetch(token, result)
    }
}

impl ListView<Article> {
    /// Reload the feed behind this view
    pub async fn refresh(&mut self, source: &dyn NewsSource) -> Result<bool> {
        let feed = self.preset.kind.feed().unwrap_or(crate::entities::Feed::All);
        self.refresh_with(|| source.articles(feed)).await
    }
}

impl ListView<Company> {
    /// Reload the company list
    pub async fn refresh(&mut self, service: &dyn CompanyService) -> Result<bool> {
        self.refresh_with(|| service.list()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NewsdeskError;
    use chrono::{Duration, Utc};

    fn articles(n: usize) -> Vec<Article> {
        let now = Utc::now();
        (0..n)
            .map(|i| {
                let mut article = Article::new(format!("Story {}", i), now - Duration::minutes(i as i64));
                article.views = i as u64;
                article
            })
            .collect()
    }

    fn loaded_view(n: usize) -> ListView<Article> {
        let mut view = ListView::for_kind(ViewKind::BreakingNews);
        let token = view.begin_fetch();
        view.complete_fetch(token, Ok(articles(n))).unwrap();
        view
    }

    #[test]
    fn test_new_view_uses_preset() {
        let view: ListView<Article> = ListView::for_kind(ViewKind::TrendingNews);
        assert_eq!(view.query().sort.as_deref(), Some("trending"));
        assert_eq!(view.query().page_size, 10);
        assert_eq!(view.state(), &LoadState::Idle);
    }

    #[test]
    fn test_query_changes_reset_page() {
        let mut view = loaded_view(35);
        assert_eq!(view.set_page(3), 3);

        view.set_search("story");
        assert_eq!(view.query().page, 1);

        view.set_page(2);
        view.set_facet("category", "research");
        assert_eq!(view.query().page, 1);

        view.clear_facets();
        view.set_page(2);
        view.set_sort(Some("views"));
        assert_eq!(view.query().page, 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut view = loaded_view(25);
        assert_eq!(view.set_page(99), 3);
        assert_eq!(view.set_page(0), 1);
        assert_eq!(view.prev_page(), 1);
        assert_eq!(view.next_page(), 2);
    }

    #[test]
    fn test_narrowing_search_shrinks_page_count() {
        let mut view = loaded_view(25);
        view.set_search("Story 1");
        // "Story 1" and "Story 10".."Story 19"
        assert_eq!(view.current_page().total_count(), 11);
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view: ListView<Article> = ListView::for_kind(ViewKind::AllNews);
        let slow = view.begin_fetch();
        let fast = view.begin_fetch();

        assert!(view.complete_fetch(fast, Ok(articles(3))).unwrap());
        assert!(!view.complete_fetch(slow, Ok(articles(30))).unwrap());
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.state(), &LoadState::Ready);
    }

    #[test]
    fn test_failed_fetch_keeps_items() {
        let mut view = loaded_view(5);
        let token = view.begin_fetch();
        let err = view
            .complete_fetch(token, Err(NewsdeskError::Unauthorized))
            .unwrap_err();

        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(view.items().len(), 5);
        assert!(matches!(view.state(), LoadState::Failed(_)));
    }

    #[test]
    fn test_refresh_clamps_page_when_data_shrinks() {
        let mut view = loaded_view(30);
        view.set_page(3);

        let token = view.begin_fetch();
        view.complete_fetch(token, Ok(articles(12))).unwrap();
        assert_eq!(view.query().page, 2);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut view = loaded_view(30);
        view.set_search("x");
        view.set_sort(Some("views"));
        view.reset();
        assert_eq!(view.query().search, "");
        assert_eq!(view.query().sort.as_deref(), Some("latest"));
    }
}
