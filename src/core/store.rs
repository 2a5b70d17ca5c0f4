//! Store trait for running list queries over a local collection

use crate::core::{ListPage, ListQuery, Listable};
use crate::pipeline;

/// Trait for stores that can answer list queries
///
/// Implementors only provide `list_all`; searching, filtering, sorting and
/// pagination come from the shared pipeline.
pub trait QueryableStore<T: Listable + Clone>: Send + Sync {
    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Run a list query over `list_all`
    fn query(&self, query: &ListQuery) -> ListPage<T> {
        let items = self.list_all();
        pipeline::run_owned(&items, query)
    }
}
