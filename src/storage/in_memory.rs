//! In-memory implementation of the backend services for testing and development

use crate::core::{CompanyService, NewsSource, NewsdeskError, QueryableStore, Result};
use crate::dashboard::{CategoryShare, DashboardStats};
use crate::engagement::{EngagementCounts, Reaction};
use crate::entities::{Article, Company, CompanyDraft, Feed};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Days covered by the dashboard views series
const SERIES_DAYS: i64 = 7;

/// In-memory news backend
///
/// Keeps insertion order so listings without a sort key are deterministic.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryNewsSource {
    articles: Arc<RwLock<IndexMap<Uuid, Article>>>,
    companies: Arc<RwLock<IndexMap<Uuid, Company>>>,
}

impl InMemoryNewsSource {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-filled with articles
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let source = Self::new();
        for article in articles {
            source.insert_article(article);
        }
        source
    }

    pub fn insert_article(&self, article: Article) {
        write(&self.articles).insert(article.id, article);
    }

    pub fn insert_company(&self, company: Company) {
        write(&self.companies).insert(company.id, company);
    }

    pub fn article(&self, id: &Uuid) -> Option<Article> {
        read(&self.articles).get(id).cloned()
    }
}

// A poisoned lock only means another thread panicked mid-write; the maps
// stay structurally valid, so keep serving them.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl NewsSource for InMemoryNewsSource {
    async fn articles(&self, feed: Feed) -> Result<Vec<Article>> {
        Ok(read(&self.articles)
            .values()
            .filter(|article| feed.includes(article))
            .cloned()
            .collect())
    }

    async fn set_reaction(
        &self,
        article_id: &Uuid,
        reaction: Reaction,
        active: bool,
    ) -> Result<EngagementCounts> {
        let mut articles = write(&self.articles);
        let article = articles
            .get_mut(article_id)
            .ok_or(NewsdeskError::NotFound {
                entity_type: "article",
                id: *article_id,
            })?;

        let (count, flag) = match reaction {
            Reaction::Like => (&mut article.likes, &mut article.liked),
            Reaction::Bookmark => (&mut article.bookmarks, &mut article.bookmarked),
        };
        if *flag != active {
            *flag = active;
            *count = if active {
                count.saturating_add(1)
            } else {
                count.saturating_sub(1)
            };
        }

        Ok(EngagementCounts::of(article))
    }

    async fn dashboard(&self) -> Result<DashboardStats> {
        let articles = read(&self.articles);
        let total_companies = read(&self.companies).len() as u64;

        let mut categories: BTreeMap<String, u64> = BTreeMap::new();
        for article in articles.values() {
            let category = article
                .category
                .clone()
                .unwrap_or_else(|| "uncategorized".to_string());
            *categories.entry(category).or_default() += 1;
        }
        let mut categories: Vec<CategoryShare> = categories
            .into_iter()
            .map(|(category, count)| CategoryShare { category, count })
            .collect();
        // BTreeMap gives name order; stable sort keeps it for equal counts
        categories.sort_by(|a, b| b.count.cmp(&a.count));

        let today = Utc::now().date_naive();
        let views_series: Vec<u64> = (0..SERIES_DAYS)
            .rev()
            .map(|days_back| {
                let day = today - Duration::days(days_back);
                articles
                    .values()
                    .filter(|a| a.published_at.date_naive() == day)
                    .map(|a| a.views)
                    .sum::<u64>()
            })
            .collect();

        Ok(DashboardStats {
            total_articles: articles.len() as u64,
            total_companies,
            total_users: 0,
            total_views: articles.values().map(|a| a.views).sum(),
            total_likes: articles.values().map(|a| a.likes).sum(),
            ai_generated_articles: articles.values().filter(|a| a.ai_generated).count() as u64,
            views_series,
            categories,
        })
    }
}

#[async_trait]
impl CompanyService for InMemoryNewsSource {
    async fn list(&self) -> Result<Vec<Company>> {
        Ok(read(&self.companies).values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Company>> {
        Ok(read(&self.companies).get(id).cloned())
    }

    async fn create(&self, draft: CompanyDraft) -> Result<Company> {
        let draft = draft.normalized();
        draft.check()?;

        let company = Company::from_draft(draft);
        write(&self.companies).insert(company.id, company.clone());
        tracing::debug!(company_id = %company.id, name = %company.name, "company created");

        Ok(company)
    }

    async fn update(&self, id: &Uuid, draft: CompanyDraft) -> Result<Company> {
        let draft = draft.normalized();
        draft.check()?;

        let mut companies = write(&self.companies);
        let company = companies.get_mut(id).ok_or(NewsdeskError::NotFound {
            entity_type: "company",
            id: *id,
        })?;
        company.apply(draft);

        Ok(company.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        write(&self.companies)
            .shift_remove(id)
            .map(|_| ())
            .ok_or(NewsdeskError::NotFound {
                entity_type: "company",
                id: *id,
            })
    }
}

impl QueryableStore<Article> for InMemoryNewsSource {
    fn list_all(&self) -> Vec<Article> {
        read(&self.articles).values().cloned().collect()
    }
}

impl QueryableStore<Company> for InMemoryNewsSource {
    fn list_all(&self) -> Vec<Company> {
        read(&self.companies).values().cloned().collect()
    }
}
