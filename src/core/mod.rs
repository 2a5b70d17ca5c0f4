//! Core module containing fundamental traits and types for the crate

pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod service;
pub mod store;

pub use entity::{Listable, SortKey};
pub use error::{FieldError, NewsdeskError, Result};
pub use field::FieldValue;
pub use query::{Facet, ListPage, ListQuery, PaginationMeta, SortDirection};
pub use service::{CompanyService, NewsSource};
pub use store::QueryableStore;
