//! REST implementation of the backend services
//!
//! Talks to the newsroom API over reqwest. Every request carries the bearer
//! token from [`ApiConfig`]; list endpoints may answer with a bare array or
//! with a `{ "data": [...] }` envelope.
//!
//! A 404 becomes [`NewsdeskError::NotFound`] only on routes addressing one
//! record by id. Collection endpoints (feeds, company list, dashboard)
//! report it as [`NewsdeskError::Api`] with status 404.

use crate::config::ApiConfig;
use crate::core::{CompanyService, NewsSource, NewsdeskError, Result};
use crate::dashboard::DashboardStats;
use crate::engagement::{EngagementCounts, Reaction};
use crate::entities::{Article, Company, CompanyDraft, Feed};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

const COMPANIES_PATH: &str = "/api/admin/companies";
const DASHBOARD_PATH: &str = "/api/admin/dashboard";

/// Payload shapes the backend uses interchangeably
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// News backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpNewsSource {
    client: Client,
    config: ApiConfig,
}

impl HttpNewsSource {
    /// Build a client with the configured timeout
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.url(path));
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(endpoint, status = status.as_u16(), "backend responded");

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NewsdeskError::Unauthorized),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(NewsdeskError::Api {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.into_inner())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        Self::decode(response).await
    }
}

fn company_path(id: &Uuid) -> String {
    format!("{}/{}", COMPANIES_PATH, id)
}

fn not_found(entity_type: &'static str, id: &Uuid) -> impl FnOnce(NewsdeskError) -> NewsdeskError {
    let id = *id;
    move |err| match err {
        NewsdeskError::Api { status: 404, .. } => NewsdeskError::NotFound { entity_type, id },
        other => other,
    }
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn articles(&self, feed: Feed) -> Result<Vec<Article>> {
        let articles: Vec<Article> = self.get_json(feed.path()).await?;
        tracing::debug!(?feed, count = articles.len(), "articles fetched");
        Ok(articles)
    }

    async fn set_reaction(
        &self,
        article_id: &Uuid,
        reaction: Reaction,
        active: bool,
    ) -> Result<EngagementCounts> {
        let path = format!("/api/user/articles/{}/{}", article_id, reaction.as_str());
        let method = if active { Method::POST } else { Method::DELETE };

        let response = self
            .send(self.request(method, &path), &path)
            .await
            .map_err(not_found("article", article_id))?;
        Self::decode(response).await
    }

    async fn dashboard(&self) -> Result<DashboardStats> {
        self.get_json(DASHBOARD_PATH).await
    }
}

#[async_trait]
impl CompanyService for HttpNewsSource {
    async fn list(&self) -> Result<Vec<Company>> {
        self.get_json(COMPANIES_PATH).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Company>> {
        match self.get_json(&company_path(id)).await {
            Ok(company) => Ok(Some(company)),
            Err(NewsdeskError::Api { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create(&self, draft: CompanyDraft) -> Result<Company> {
        let draft = draft.normalized();
        draft.check()?;

        let builder = self.request(Method::POST, COMPANIES_PATH).json(&draft);
        let company: Company = Self::decode(self.send(builder, COMPANIES_PATH).await?).await?;
        tracing::info!(company_id = %company.id, name = %company.name, "company created");
        Ok(company)
    }

    async fn update(&self, id: &Uuid, draft: CompanyDraft) -> Result<Company> {
        let draft = draft.normalized();
        draft.check()?;

        let path = company_path(id);
        let builder = self.request(Method::PUT, &path).json(&draft);
        let response = self
            .send(builder, &path)
            .await
            .map_err(not_found("company", id))?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let path = company_path(id);
        self.send(self.request(Method::DELETE, &path), &path)
            .await
            .map_err(not_found("company", id))?;
        tracing::info!(company_id = %id, "company deleted");
        Ok(())
    }
}
