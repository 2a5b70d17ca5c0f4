//! Service traits for the backend collaborators

use crate::core::Result;
use crate::dashboard::DashboardStats;
use crate::engagement::{EngagementCounts, Reaction};
use crate::entities::{Article, Company, CompanyDraft, Feed};
use async_trait::async_trait;
use uuid::Uuid;

/// Read side of the public portal plus the per-user reactions
///
/// Implementations receive their credentials at construction; nothing is
/// looked up from ambient state.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch every article of a feed, unpaginated
    async fn articles(&self, feed: Feed) -> Result<Vec<Article>>;

    /// Set or clear a like/bookmark, returning the authoritative counts
    async fn set_reaction(
        &self,
        article_id: &Uuid,
        reaction: Reaction,
        active: bool,
    ) -> Result<EngagementCounts>;

    /// Aggregated figures for the admin dashboard
    async fn dashboard(&self) -> Result<DashboardStats>;
}

/// Service trait for the company-profile manager
///
/// Drafts are validated before anything reaches the backend.
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// List all companies
    async fn list(&self) -> Result<Vec<Company>>;

    /// Get a company by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Company>>;

    /// Create a company from a draft
    async fn create(&self, draft: CompanyDraft) -> Result<Company>;

    /// Replace the editable fields of an existing company
    async fn update(&self, id: &Uuid, draft: CompanyDraft) -> Result<Company>;

    /// Delete a company
    async fn delete(&self, id: &Uuid) -> Result<()>;
}
