//! Error types for cf-ops
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Pipelines wrap the first failing step's error in [`PipelineError`].

use thiserror::Error;

/// The main error type for cf-ops
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Resolution Errors
    // ============================================================================
    #[error("{kind} {name} does not exist")]
    NotFound { kind: String, name: String },

    #[error("{kind} {name} is ambiguous: {count} matches")]
    Ambiguous {
        kind: String,
        name: String,
        count: usize,
    },

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("No output recorded for step '{step}'")]
    MissingOutput { step: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a not-found error, e.g. `Quota my-quota does not exist`
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an ambiguous-match error
    pub fn ambiguous(kind: impl Into<String>, name: impl Into<String>, count: usize) -> Self {
        Self::Ambiguous {
            kind: kind.into(),
            name: name.into(),
            count,
        }
    }

    /// Create a validation error for malformed caller input
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing pipeline output error
    pub fn missing_output(step: impl Into<String>) -> Self {
        Self::MissingOutput { step: step.into() }
    }

    /// Check if this error originated below the core (network, status, decode)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::RateLimited { .. }
                | Error::Timeout { .. }
                | Error::MaxRetriesExceeded { .. }
                | Error::InvalidUrl(_)
                | Error::Decode { .. }
                | Error::JsonParse(_)
        )
    }

    /// Check if this error is a not-found outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(
        status,
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Result type alias for cf-ops
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with a validation error when a required value is empty or whitespace
pub fn ensure_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// The first failing step of a pipeline together with its error
#[derive(Error, Debug)]
#[error("step '{step}' failed: {error}")]
pub struct PipelineError {
    /// Name of the step that produced the error
    pub step: String,
    /// The step's error, unchanged
    #[source]
    pub error: Error,
}

impl PipelineError {
    /// Create a pipeline error for a step
    pub fn new(step: impl Into<String>, error: Error) -> Self {
        Self {
            step: step.into(),
            error,
        }
    }

    /// Name of the failing step
    pub fn step(&self) -> &str {
        &self.step
    }

    /// Discard the step tag and return the underlying error
    pub fn into_inner(self) -> Error {
        self.error
    }
}
