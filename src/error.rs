//! Marketplace error types with HTTP status code mapping.
//!
//! [`MarketplaceError`] is the central error type. Each variant maps to a
//! specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CampaignId, InfluencerId, TransitionError, ValidationError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "invalid transition: cannot accept an ad request whose status is rejected",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                  |
/// |-----------|---------------------|------------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request              |
/// | 2000–2999 | Not Found/Duplicate | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server              | 500 Internal Server Error    |
/// | 4000–4999 | Lifecycle           | 409 Conflict / 403 Forbidden |
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    /// A field failed domain validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request could not be interpreted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. `"campaign"`).
        entity: &'static str,
        /// Missing id.
        id: uuid::Uuid,
    },

    /// An ad request already links this campaign and influencer.
    #[error("influencer {influencer_id} has already requested campaign {campaign_id}")]
    DuplicateRequest {
        /// Campaign side of the pair.
        campaign_id: CampaignId,
        /// Influencer side of the pair.
        influencer_id: InfluencerId,
    },

    /// The lifecycle state does not permit the operation.
    #[error("invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    /// Influencers may only request public campaigns.
    #[error("campaign {0} is not public")]
    CampaignNotPublic(CampaignId),

    /// Persistence layer failure. The operation was rolled back.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MarketplaceError {
    /// Shorthand for [`MarketplaceError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<uuid::Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::NotFound { .. } => 2001,
            Self::DuplicateRequest { .. } => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::InvalidTransition(_) => 4001,
            Self::CampaignNotPublic(_) => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateRequest { .. } | Self::InvalidTransition(_) => StatusCode::CONFLICT,
            Self::CampaignNotPublic(_) => StatusCode::FORBIDDEN,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for MarketplaceError {
    fn from(e: sqlx::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let details = match &self {
            Self::InvalidTransition(_) => Some("the ad request was not modified".to_string()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RequestStatus, TransitionKind};

    #[test]
    fn transition_errors_are_conflicts() {
        let err = MarketplaceError::from(TransitionError::Status {
            action: TransitionKind::Accept,
            status: RequestStatus::Rejected,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), 4001);
        assert!(err.to_string().contains("cannot accept"));
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = MarketplaceError::from(ValidationError::NegativePayment(-1.0));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn not_found_names_entity() {
        let id = CampaignId::new();
        let err = MarketplaceError::not_found("campaign", id);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), format!("campaign not found: {id}"));
    }

    #[test]
    fn into_response_sets_status() {
        let resp = MarketplaceError::CampaignNotPublic(CampaignId::new()).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
