//! Typed error handling for the fetch layer and CRUD services
//!
//! The list pipeline itself never fails; everything that talks to a
//! backend or validates input reports a [`NewsdeskError`].
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(&id).await {
//!     Ok(company) => println!("Found: {}", company.name),
//!     Err(NewsdeskError::NotFound { id, .. }) => println!("Company {} not found", id),
//!     Err(NewsdeskError::Unauthorized) => println!("Token rejected"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name (e.g., "website")
    pub field: String,
    /// Machine-readable code (e.g., "url", "length")
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The main error type for the crate
#[derive(Debug, Error)]
pub enum NewsdeskError {
    /// Entity was not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// Input failed validation
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// The backend rejected our credentials
    #[error("unauthorized: missing or rejected access token")]
    Unauthorized,

    /// The backend answered with a non-success status
    #[error("request to {endpoint} failed with status {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Network or protocol failure
    #[cfg(feature = "http")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload did not match the expected shape
    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal errors (poisoned locks and the like)
    #[error("internal error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl NewsdeskError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            NewsdeskError::NotFound { .. } => "NOT_FOUND",
            NewsdeskError::Validation(_) => "VALIDATION_ERROR",
            NewsdeskError::Unauthorized => "UNAUTHORIZED",
            NewsdeskError::Api { .. } => "API_ERROR",
            #[cfg(feature = "http")]
            NewsdeskError::Transport(_) => "TRANSPORT_ERROR",
            NewsdeskError::Decode(_) => "DECODE_ERROR",
            NewsdeskError::Config(_) => "CONFIG_ERROR",
            NewsdeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            NewsdeskError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<validator::ValidationErrors> for NewsdeskError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", e.code));
                    FieldError::new(field.clone(), e.code.to_string(), message)
                })
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field));
        NewsdeskError::Validation(fields)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NewsdeskError>;
