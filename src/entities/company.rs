//! Company profiles managed from the admin console

use crate::core::field::FieldValue;
use crate::core::{FieldError, Listable, NewsdeskError, Result, SortKey};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Pending,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active => "active",
            CompanyStatus::Inactive => "inactive",
            CompanyStatus::Pending => "pending",
        }
    }
}

/// A company profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    pub status: CompanyStatus,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub tech_focus: Vec<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub employee_count: Option<u64>,
    #[serde(default)]
    pub funding_total: Option<f64>,
    #[serde(default)]
    pub article_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Build a new company from a draft, stamping id and timestamps
    pub fn from_draft(draft: CompanyDraft) -> Self {
        let now = Utc::now();
        let mut company = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            slug: String::new(),
            description: None,
            industry: None,
            status: CompanyStatus::Pending,
            headquarters: None,
            website: None,
            contact_email: None,
            tech_focus: Vec::new(),
            founded_year: None,
            employee_count: None,
            funding_total: None,
            article_count: 0,
            created_at: now,
            updated_at: now,
        };
        company.apply(draft);
        company.created_at = now;
        company.updated_at = now;
        company
    }

    /// Overwrite the editable fields with a draft
    pub fn apply(&mut self, draft: CompanyDraft) {
        self.slug = draft.slug.unwrap_or_else(|| slugify(&draft.name));
        self.name = draft.name;
        self.description = draft.description;
        self.industry = draft.industry;
        self.status = draft.status;
        self.headquarters = draft.headquarters;
        self.website = draft.website;
        self.contact_email = draft.contact_email;
        self.tech_focus = draft.tech_focus;
        self.founded_year = draft.founded_year;
        self.employee_count = draft.employee_count;
        self.funding_total = draft.funding_total;
        self.touch();
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

const COMPANY_SORT_KEYS: &[SortKey] = &[
    SortKey::ascending("name", "name"),
    SortKey::descending("newest", "created_at"),
    SortKey::descending("updated", "updated_at"),
    SortKey::descending("employees", "employee_count"),
    SortKey::descending("funding", "funding_total"),
    SortKey::descending("articles", "article_count"),
    SortKey::descending("founded", "founded_year"),
];

impl Listable for Company {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "description", "industry", "headquarters", "tech_focus"]
    }

    fn sort_keys() -> &'static [SortKey] {
        COMPANY_SORT_KEYS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::String(self.id.to_string()),
            "name" => FieldValue::from(self.name.as_str()),
            "slug" => FieldValue::from(self.slug.as_str()),
            "description" => self.description.clone().into(),
            "industry" => self.industry.clone().into(),
            "status" => FieldValue::from(self.status.as_str()),
            "headquarters" => self.headquarters.clone().into(),
            "website" => self.website.clone().into(),
            "tech_focus" => FieldValue::List(self.tech_focus.clone()),
            "founded_year" => self.founded_year.map(i64::from).into(),
            "employee_count" => self.employee_count.into(),
            "funding_total" => self.funding_total.into(),
            "article_count" => self.article_count.into(),
            "created_at" => FieldValue::DateTime(self.created_at),
            "updated_at" => FieldValue::DateTime(self.updated_at),
            _ => return None,
        };
        Some(value)
    }
}

/// Create/update payload for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompanyDraft {
    #[validate(length(min = 2, max = 120, message = "name must be 2 to 120 characters"))]
    pub name: String,

    /// Derived from the name when absent
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub industry: Option<String>,

    pub status: CompanyStatus,

    #[serde(default)]
    pub headquarters: Option<String>,

    #[serde(default)]
    #[validate(url(message = "website must be a valid URL"))]
    pub website: Option<String>,

    #[serde(default)]
    #[validate(email(message = "contact email must be a valid address"))]
    pub contact_email: Option<String>,

    #[serde(default)]
    pub tech_focus: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 1800, max = 2100, message = "founded year is out of range"))]
    pub founded_year: Option<i32>,

    #[serde(default)]
    pub employee_count: Option<u64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "funding cannot be negative"))]
    pub funding_total: Option<f64>,
}

impl CompanyDraft {
    pub fn new(name: impl Into<String>, status: CompanyStatus) -> Self {
        Self {
            name: name.into(),
            slug: None,
            description: None,
            industry: None,
            status,
            headquarters: None,
            website: None,
            contact_email: None,
            tech_focus: Vec::new(),
            founded_year: None,
            employee_count: None,
            funding_total: None,
        }
    }

    /// Run every field rule, collecting all failures
    pub fn check(&self) -> Result<()> {
        let mut errors: Vec<FieldError> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => NewsdeskError::from(e).field_errors().to_vec(),
        };

        match &self.slug {
            Some(slug) if !slug_regex().is_match(slug) => errors.push(FieldError::new(
                "slug",
                "slug",
                "slug must be lowercase words separated by dashes",
            )),
            None if slugify(&self.name).is_empty() => errors.push(FieldError::new(
                "slug",
                "slug",
                "name has no letters or digits to derive a slug from; set one explicitly",
            )),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(NewsdeskError::Validation(errors))
        }
    }

    /// Trim text fields and drop blank optional values
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        for field in [
            &mut self.slug,
            &mut self.description,
            &mut self.industry,
            &mut self.headquarters,
            &mut self.website,
            &mut self.contact_email,
        ] {
            *field = field
                .take()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
        }
        self.tech_focus = self
            .tech_focus
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }
}

impl From<&Company> for CompanyDraft {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            slug: Some(company.slug.clone()),
            description: company.description.clone(),
            industry: company.industry.clone(),
            status: company.status,
            headquarters: company.headquarters.clone(),
            website: company.website.clone(),
            contact_email: company.contact_email.clone(),
            tech_focus: company.tech_focus.clone(),
            founded_year: company.founded_year,
            employee_count: company.employee_count,
            funding_total: company.funding_total,
        }
    }
}

fn slug_regex() -> &'static Regex {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    SLUG_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap())
}

/// Lowercase, dash-separated form of a name
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
