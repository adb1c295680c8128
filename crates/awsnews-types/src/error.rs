//! Error taxonomy for news queries.

use thiserror::Error;

/// Message returned when `since_date` is not a valid ISO 8601 timestamp.
pub const INVALID_DATE_MESSAGE: &str =
    "Invalid date format. Please use ISO 8601 format (e.g., 2025-05-01T00:00:00Z)";

/// Errors produced while fetching news.
///
/// `Validation` is always raised before any network I/O; `Upstream`
/// covers everything that can go wrong once the request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsError {
    /// The query parameters were rejected locally.
    #[error("{message}")]
    Validation { message: String },
    /// The upstream service failed, was unreachable, or sent a bad body.
    #[error("{message}")]
    Upstream { message: String },
}

impl NewsError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// The error raised for a malformed `since_date`.
    pub fn invalid_date() -> Self {
        Self::validation(INVALID_DATE_MESSAGE)
    }

    /// Returns `true` for errors detected before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Transforms technical errors into user-actionable diagnostics.
///
/// Implementors provide optional `hint` (cause explanation) and `fix`
/// (concrete remediation step) for each error variant.
pub trait DiagnosticError {
    /// A human-readable explanation of the likely cause.
    fn hint(&self) -> Option<String> {
        None
    }
    /// A concrete fix the user can apply.
    fn fix(&self) -> Option<String> {
        None
    }
}

impl DiagnosticError for NewsError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Validation { .. } => None,
            Self::Upstream { .. } => Some(
                "The AWS news service was unreachable or returned an unexpected response.".into(),
            ),
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Validation { .. } => {
                Some("Pass a timestamp such as --since 2025-05-01T00:00:00Z".into())
            }
            Self::Upstream { .. } => Some(
                "Check network access, or override the endpoint:\n  [upstream]\n  base_url = \"https://api.aws-news.com/articles\""
                    .into(),
            ),
        }
    }
}
