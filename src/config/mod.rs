//! Configuration loading and management

use crate::core::{NewsdeskError, Result as NewsdeskResult};
use crate::views::{ViewKind, ViewPreset};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the backend API
///
/// Passed explicitly into the fetch layer; the token is never read from
/// ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join an absolute API path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Overrides for one listing screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: Option<usize>,
    pub sort: Option<String>,
    pub poll_interval_secs: Option<u64>,
}

/// Per-screen overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub all_news: ViewConfig,
    pub breaking_news: ViewConfig,
    pub trending_news: ViewConfig,
    pub companies: ViewConfig,
}

impl ViewsConfig {
    pub fn get(&self, kind: ViewKind) -> &ViewConfig {
        match kind {
            ViewKind::AllNews => &self.all_news,
            ViewKind::BreakingNews => &self.breaking_news,
            ViewKind::TrendingNews => &self.trending_news,
            ViewKind::Companies => &self.companies,
        }
    }
}

/// Complete configuration for the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub api: ApiConfig,

    #[serde(default)]
    pub views: ViewsConfig,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the views cannot work with
    pub fn validate(&self) -> NewsdeskResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(NewsdeskError::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(NewsdeskError::Config("api.timeout_secs must be positive".into()));
        }

        for kind in ViewKind::ALL {
            let view = self.views.get(kind);
            if view.page_size == Some(0) {
                return Err(NewsdeskError::Config(format!(
                    "{:?}: page_size must be positive",
                    kind
                )));
            }
            if view.poll_interval_secs == Some(0) {
                return Err(NewsdeskError::Config(format!(
                    "{:?}: poll_interval_secs must be positive",
                    kind
                )));
            }
        }

        Ok(())
    }

    /// Preset for a screen: built-in defaults with this config's overrides
    pub fn preset(&self, kind: ViewKind) -> ViewPreset {
        let mut preset = ViewPreset::for_kind(kind);
        let overrides = self.views.get(kind);

        if let Some(page_size) = overrides.page_size {
            preset.page_size = page_size;
        }
        if let Some(sort) = &overrides.sort {
            preset.default_sort = Some(sort.clone());
        }
        if let Some(secs) = overrides.poll_interval_secs {
            preset.poll_interval = Some(Duration::from_secs(secs));
        }

        preset
    }

    /// Create a default configuration for local development
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::new("http://localhost:5000"),
            views: ViewsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.preset(ViewKind::AllNews).page_size, 12);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ConsoleConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ConsoleConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_overrides_apply() {
        let yaml = r#"
api:
  base_url: https://news.example.com/
  token: secret
views:
  breaking_news:
    page_size: 5
    poll_interval_secs: 30
  companies:
    sort: newest
"#;
        let config = ConsoleConfig::from_yaml_str(yaml).unwrap();

        let breaking = config.preset(ViewKind::BreakingNews);
        assert_eq!(breaking.page_size, 5);
        assert_eq!(breaking.poll_interval, Some(Duration::from_secs(30)));

        let companies = config.preset(ViewKind::Companies);
        assert_eq!(companies.default_sort.as_deref(), Some("newest"));
        assert_eq!(companies.page_size, 10);

        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.api.url("/api/public/news"), "https://news.example.com/api/public/news");
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let yaml = r#"
api:
  base_url: http://localhost:5000
views:
  all_news:
    page_size: 0
"#;
        let err = ConsoleConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }
}
