//! News articles as served by the public feeds

use crate::core::field::FieldValue;
use crate::core::{Listable, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which public feed a listing reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    All,
    Breaking,
    Trending,
}

impl Feed {
    /// Backend path for this feed
    pub fn path(&self) -> &'static str {
        match self {
            Feed::All => "/api/public/news",
            Feed::Breaking => "/api/public/news/breaking",
            Feed::Trending => "/api/public/news/trending",
        }
    }

    /// Whether an article belongs in this feed
    pub fn includes(&self, article: &Article) -> bool {
        match self {
            Feed::All => true,
            Feed::Breaking => article.is_breaking,
            Feed::Trending => article.is_trending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ReadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "beginner",
            ReadingLevel::Intermediate => "intermediate",
            ReadingLevel::Advanced => "advanced",
        }
    }
}

/// A published news article
///
/// Only `id`, `title` and `published_at` are required on the wire; every
/// other field defaults so partially populated payloads still list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reading_level: Option<ReadingLevel>,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub is_breaking: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub trending_score: Option<f64>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub bookmarks: u64,
    #[serde(default)]
    pub comments: u64,
    /// Whether the current user liked this article
    #[serde(default)]
    pub liked: bool,
    /// Whether the current user bookmarked this article
    #[serde(default)]
    pub bookmarked: bool,
    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            summary: None,
            author: None,
            category: None,
            source: None,
            tags: Vec::new(),
            reading_level: None,
            ai_generated: false,
            is_breaking: false,
            is_trending: false,
            trending_score: None,
            views: 0,
            likes: 0,
            bookmarks: 0,
            comments: 0,
            liked: false,
            bookmarked: false,
            published_at,
        }
    }
}

const ARTICLE_SORT_KEYS: &[SortKey] = &[
    SortKey::descending("latest", "published_at"),
    SortKey::descending("views", "views"),
    SortKey::descending("likes", "likes"),
    SortKey::descending("bookmarks", "bookmarks"),
    SortKey::descending("comments", "comments"),
    SortKey::descending("trending", "trending_score"),
    SortKey::ascending("title", "title"),
];

impl Listable for Article {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["title", "summary", "author", "category", "tags"]
    }

    fn sort_keys() -> &'static [SortKey] {
        ARTICLE_SORT_KEYS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::String(self.id.to_string()),
            "title" => FieldValue::from(self.title.as_str()),
            "summary" => self.summary.clone().into(),
            "author" => self.author.clone().into(),
            "category" => self.category.clone().into(),
            "source" => self.source.clone().into(),
            "tags" => FieldValue::List(self.tags.clone()),
            "reading_level" => self.reading_level.map(|level| level.as_str()).into(),
            "ai_generated" => FieldValue::Boolean(self.ai_generated),
            "is_breaking" => FieldValue::Boolean(self.is_breaking),
            "is_trending" => FieldValue::Boolean(self.is_trending),
            "trending_score" => self.trending_score.into(),
            "views" => self.views.into(),
            "likes" => self.likes.into(),
            "bookmarks" => self.bookmarks.into(),
            "comments" => self.comments.into(),
            "published_at" => FieldValue::DateTime(self.published_at),
            _ => return None,
        };
        Some(value)
    }
}
