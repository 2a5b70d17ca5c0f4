//! Optimistic like/bookmark state
//!
//! A toggle is applied locally first, then either reconciled with the
//! counts the backend returns or reverted when the call fails. Fetched
//! articles are never mutated; the cache is an overlay read through
//! [`EngagementCache::snapshot`].

use crate::core::{NewsSource, Result};
use crate::entities::Article;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Bookmark,
}

impl Reaction {
    /// Path segment used by the user API
    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Bookmark => "bookmark",
        }
    }
}

/// Authoritative counts returned by the backend after a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub likes: u64,
    pub bookmarks: u64,
    pub liked: bool,
    pub bookmarked: bool,
}

impl EngagementCounts {
    pub fn of(article: &Article) -> Self {
        Self {
            likes: article.likes,
            bookmarks: article.bookmarks,
            liked: article.liked,
            bookmarked: article.bookmarked,
        }
    }

    fn toggled(mut self, reaction: Reaction) -> Self {
        let (count, active) = match reaction {
            Reaction::Like => (&mut self.likes, &mut self.liked),
            Reaction::Bookmark => (&mut self.bookmarks, &mut self.bookmarked),
        };
        *active = !*active;
        *count = if *active {
            count.saturating_add(1)
        } else {
            count.saturating_sub(1)
        };
        self
    }

    /// Whether `reaction` is currently set
    pub fn is_active(&self, reaction: Reaction) -> bool {
        match reaction {
            Reaction::Like => self.liked,
            Reaction::Bookmark => self.bookmarked,
        }
    }
}

/// An optimistic change awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReaction {
    pub article_id: Uuid,
    pub reaction: Reaction,
    /// State the reaction was switched to
    pub active: bool,
}

/// Overlay of locally known engagement counts keyed by article
#[derive(Debug, Default)]
pub struct EngagementCache {
    overrides: HashMap<Uuid, EngagementCounts>,
}

impl EngagementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts to display for an article
    pub fn snapshot(&self, article: &Article) -> EngagementCounts {
        self.overrides
            .get(&article.id)
            .copied()
            .unwrap_or_else(|| EngagementCounts::of(article))
    }

    /// Toggle `reaction` optimistically
    pub fn apply(&mut self, article: &Article, reaction: Reaction) -> PendingReaction {
        let next = self.snapshot(article).toggled(reaction);
        self.overrides.insert(article.id, next);

        PendingReaction {
            article_id: article.id,
            reaction,
            active: next.is_active(reaction),
        }
    }

    /// Replace the optimistic state with what the backend reported
    pub fn reconcile(&mut self, pending: &PendingReaction, counts: EngagementCounts) {
        self.overrides.insert(pending.article_id, counts);
    }

    /// Undo one optimistic toggle, leaving other pending changes in place
    ///
    /// Only `pending.reaction` is flipped back. Nothing happens when that
    /// reaction no longer holds the state the toggle set. The override is
    /// dropped once it matches the fetched counts again.
    pub fn revert(&mut self, article: &Article, pending: &PendingReaction) {
        let current = self.snapshot(article);
        if current.is_active(pending.reaction) != pending.active {
            return;
        }

        let restored = current.toggled(pending.reaction);
        if restored == EngagementCounts::of(article) {
            self.overrides.remove(&article.id);
        } else {
            self.overrides.insert(article.id, restored);
        }
    }

    /// Drop every override, e.g. after a fresh fetch
    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Toggle a reaction end to end: apply, call the backend, reconcile or revert
///
/// The lock is never held across the backend call.
pub async fn toggle_reaction(
    cache: &Mutex<EngagementCache>,
    source: &dyn NewsSource,
    article: &Article,
    reaction: Reaction,
) -> Result<EngagementCounts> {
    let pending = lock(cache)?.apply(article, reaction);

    match source
        .set_reaction(&pending.article_id, reaction, pending.active)
        .await
    {
        Ok(counts) => {
            lock(cache)?.reconcile(&pending, counts);
            Ok(counts)
        }
        Err(err) => {
            tracing::warn!(
                article_id = %pending.article_id,
                reaction = reaction.as_str(),
                error = %err,
                "reaction failed, reverting optimistic update"
            );
            lock(cache)?.revert(article, &pending);
            Err(err)
        }
    }
}

fn lock(cache: &Mutex<EngagementCache>) -> Result<std::sync::MutexGuard<'_, EngagementCache>> {
    cache
        .lock()
        .map_err(|e| crate::core::NewsdeskError::Internal(format!("engagement cache poisoned: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(likes: u64, liked: bool) -> Article {
        let mut article = Article::new("x", Utc::now());
        article.likes = likes;
        article.liked = liked;
        article
    }

    #[test]
    fn test_apply_like_increments() {
        let mut cache = EngagementCache::new();
        let article = article(10, false);

        let pending = cache.apply(&article, Reaction::Like);
        assert!(pending.active);

        let snapshot = cache.snapshot(&article);
        assert_eq!(snapshot.likes, 11);
        assert!(snapshot.liked);
        assert_eq!(article.likes, 10);
    }

    #[test]
    fn test_apply_unlike_decrements() {
        let mut cache = EngagementCache::new();
        let article = article(10, true);

        let pending = cache.apply(&article, Reaction::Like);
        assert!(!pending.active);
        assert_eq!(cache.snapshot(&article).likes, 9);
    }

    #[test]
    fn test_count_never_underflows() {
        let mut cache = EngagementCache::new();
        let article = article(0, true);

        cache.apply(&article, Reaction::Like);
        assert_eq!(cache.snapshot(&article).likes, 0);
    }

    #[test]
    fn test_revert_restores_fetched_state() {
        let mut cache = EngagementCache::new();
        let article = article(3, false);

        let pending = cache.apply(&article, Reaction::Bookmark);
        assert_eq!(cache.snapshot(&article).bookmarks, 1);

        cache.revert(&article, &pending);
        assert_eq!(cache.snapshot(&article), EngagementCounts::of(&article));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_revert_restores_previous_override() {
        let mut cache = EngagementCache::new();
        let article = article(3, false);

        let first = cache.apply(&article, Reaction::Like);
        cache.reconcile(
            &first,
            EngagementCounts {
                likes: 4,
                bookmarks: 0,
                liked: true,
                bookmarked: false,
            },
        );

        let second = cache.apply(&article, Reaction::Like);
        assert_eq!(cache.snapshot(&article).likes, 3);

        cache.revert(&article, &second);
        assert_eq!(cache.snapshot(&article).likes, 4);
        assert!(cache.snapshot(&article).liked);
    }

    #[test]
    fn test_revert_keeps_other_pending_reaction() {
        let mut cache = EngagementCache::new();
        let article = article(0, false);

        let like = cache.apply(&article, Reaction::Like);
        let bookmark = cache.apply(&article, Reaction::Bookmark);

        cache.revert(&article, &like);
        let snapshot = cache.snapshot(&article);
        assert_eq!(snapshot.likes, 0);
        assert!(!snapshot.liked);
        assert_eq!(snapshot.bookmarks, 1);
        assert!(snapshot.bookmarked);

        cache.revert(&article, &bookmark);
        assert_eq!(cache.snapshot(&article), EngagementCounts::of(&article));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_revert_after_reconcile_is_noop() {
        let mut cache = EngagementCache::new();
        let article = article(5, false);

        let pending = cache.apply(&article, Reaction::Like);
        let server = EngagementCounts {
            likes: 5,
            bookmarks: 0,
            liked: false,
            bookmarked: false,
        };
        cache.reconcile(&pending, server);

        cache.revert(&article, &pending);
        assert_eq!(cache.snapshot(&article), server);
    }

    #[test]
    fn test_reconcile_takes_server_counts() {
        let mut cache = EngagementCache::new();
        let article = article(10, false);

        let pending = cache.apply(&article, Reaction::Like);
        let server = EngagementCounts {
            likes: 42,
            bookmarks: 7,
            liked: true,
            bookmarked: false,
        };
        cache.reconcile(&pending, server);
        assert_eq!(cache.snapshot(&article), server);
    }
}
