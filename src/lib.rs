//! # Newsdesk
//!
//! Client-side core for an AI news portal and its admin console.
//!
//! ## Features
//!
//! - **List View Pipeline**: search, facet filtering, sorting and pagination shared by every listing
//! - **View Presets**: page size, default sort and polling per screen
//! - **Stale Response Guard**: request tokens so only the latest fetch is applied
//! - **Live Polling**: cancelable interval task for the breaking-news feed
//! - **Optimistic Engagement**: like/bookmark toggles with reconcile and revert
//! - **Company Management**: validated drafts and CRUD over a service trait
//! - **Dashboard Helpers**: sparkline and donut geometry, counter animation, compact numbers
//! - **Configuration-Based**: API endpoint, token and view overrides from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use newsdesk::prelude::*;
//!
//! let source = HttpNewsSource::new(ApiConfig::new("http://localhost:5000").with_token(token))?;
//!
//! let mut view: ListView<Article> = ListView::for_kind(ViewKind::BreakingNews);
//! view.refresh(&source).await?;
//! view.set_search("gpt");
//! view.set_sort(Some("views"));
//!
//! let page = view.current_page();
//! for article in &page.items {
//!     println!("{} ({})", article.title, compact_number(article.views));
//! }
//! ```

#[cfg(feature = "http")]
pub mod client;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod engagement;
pub mod entities;
pub mod format;
pub mod pipeline;
pub mod poll;
pub mod storage;
pub mod views;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Listable, SortKey},
        error::{FieldError, NewsdeskError},
        field::FieldValue,
        query::{Facet, ListPage, ListQuery, PaginationMeta, SortDirection},
        service::{CompanyService, NewsSource},
        store::QueryableStore,
    };

    // === Entities ===
    pub use crate::entities::{Article, Company, CompanyDraft, CompanyStatus, Feed, ReadingLevel};

    // === Views ===
    pub use crate::views::{ListView, LoadState, RequestToken, RequestTracker, ViewKind, ViewPreset};

    // === Live Behaviour ===
    pub use crate::engagement::{EngagementCache, EngagementCounts, Reaction, toggle_reaction};
    pub use crate::poll::{BREAKING_NEWS_POLL_INTERVAL, Poller};

    // === Dashboard ===
    pub use crate::dashboard::{CounterAnimation, DashboardStats, DonutSegment};
    pub use crate::format::{compact_number, time_ago};

    // === Storage ===
    #[cfg(feature = "http")]
    pub use crate::client::HttpNewsSource;
    pub use crate::storage::InMemoryNewsSource;

    // === Config ===
    pub use crate::config::{ApiConfig, ConsoleConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
