//! Per-screen listing defaults

use crate::entities::Feed;
use crate::poll::BREAKING_NEWS_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The listing screens of the console and portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    AllNews,
    BreakingNews,
    TrendingNews,
    Companies,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::AllNews,
        ViewKind::BreakingNews,
        ViewKind::TrendingNews,
        ViewKind::Companies,
    ];

    /// Feed backing an article view; `None` for the company manager
    pub fn feed(&self) -> Option<Feed> {
        match self {
            ViewKind::AllNews => Some(Feed::All),
            ViewKind::BreakingNews => Some(Feed::Breaking),
            ViewKind::TrendingNews => Some(Feed::Trending),
            ViewKind::Companies => None,
        }
    }
}

/// Listing defaults for one screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPreset {
    pub kind: ViewKind,
    pub page_size: usize,
    pub default_sort: Option<String>,
    /// Set for views that refresh on a timer
    pub poll_interval: Option<Duration>,
}

impl ViewPreset {
    /// Built-in defaults for a screen
    pub fn for_kind(kind: ViewKind) -> Self {
        let (page_size, sort, poll_interval) = match kind {
            ViewKind::AllNews => (12, "latest", None),
            ViewKind::BreakingNews => (10, "latest", Some(BREAKING_NEWS_POLL_INTERVAL)),
            ViewKind::TrendingNews => (10, "trending", None),
            ViewKind::Companies => (10, "name", None),
        };

        Self {
            kind,
            page_size,
            default_sort: Some(sort.to_string()),
            poll_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_news_polls_every_90_seconds() {
        let preset = ViewPreset::for_kind(ViewKind::BreakingNews);
        assert_eq!(preset.poll_interval, Some(Duration::from_secs(90)));
        assert_eq!(preset.kind.feed(), Some(Feed::Breaking));
    }

    #[test]
    fn test_only_breaking_news_polls() {
        for kind in ViewKind::ALL {
            let preset = ViewPreset::for_kind(kind);
            assert_eq!(
                preset.poll_interval.is_some(),
                kind == ViewKind::BreakingNews
            );
        }
    }

    #[test]
    fn test_companies_have_no_feed() {
        assert!(ViewKind::Companies.feed().is_none());
        assert_eq!(
            ViewPreset::for_kind(ViewKind::Companies).default_sort.as_deref(),
            Some("name")
        );
    }
}
