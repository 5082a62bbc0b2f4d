//! Ad request DTOs: creation, lifecycle bodies, responses and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common_dto::{PaginationMeta, PaginationParams};
use crate::domain::{
    AdRequest, AdRequestDraft, NegotiationStatus, PartyRole, RequestStatus,
};
use crate::error::MarketplaceError;
use crate::persistence::AdRequestFilter;
use crate::service::{CreateOutcome, NewAdRequest};

/// Request body for `POST /campaigns/{id}/ad-requests`.
///
/// Leave `ad_name`, `description`, `terms` and `payment` out to copy the
/// campaign's title, description and budget. To compose a bespoke offer
/// send at least `ad_name`, `description` and `payment`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAdRequestRequest {
    /// Party opening the request.
    pub acting_role: PartyRole,
    /// Target influencer. Required for influencer-initiated requests.
    #[serde(default)]
    pub influencer_id: Option<Uuid>,
    /// Bespoke ad name.
    #[serde(default)]
    pub ad_name: Option<String>,
    /// Bespoke description.
    #[serde(default)]
    pub description: Option<String>,
    /// Bespoke terms.
    #[serde(default)]
    pub terms: Option<String>,
    /// Bespoke payment (>= 0).
    #[serde(default)]
    pub payment: Option<f64>,
}

impl CreateAdRequestRequest {
    /// Validates the body into service input.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::InvalidRequest`] for a partial bespoke offer,
    /// [`MarketplaceError::Validation`] for invalid field values.
    pub fn into_input(self) -> Result<NewAdRequest, MarketplaceError> {
        let offer = match (self.ad_name, self.description, self.payment, self.terms) {
            (None, None, None, None) => None,
            (Some(name), Some(description), Some(payment), terms) => Some(AdRequestDraft::new(
                &name,
                &description,
                terms.as_deref(),
                payment,
            )?),
            _ => {
                return Err(MarketplaceError::InvalidRequest(
                    "a bespoke offer needs ad_name, description and payment".to_string(),
                ));
            }
        };
        Ok(NewAdRequest {
            initiator: self.acting_role,
            influencer_id: self.influencer_id.map(Into::into),
            offer,
        })
    }
}

/// Request body for `POST /ad-requests/{id}/modifications`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProposeModificationRequest {
    /// Party proposing the change.
    pub acting_role: PartyRole,
    /// Proposed terms.
    pub terms: String,
    /// Proposed payment (>= 0).
    pub payment: f64,
}

/// Full ad request representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdRequestDto {
    /// Request id.
    pub id: Uuid,
    /// Parent campaign.
    pub campaign_id: Uuid,
    /// Campaign owner.
    pub sponsor_id: Uuid,
    /// Engaged influencer, if any.
    pub influencer_id: Option<Uuid>,
    /// Ad name.
    pub ad_name: String,
    /// Ad description.
    pub description: String,
    /// Committed terms.
    pub terms: Option<String>,
    /// Committed payment.
    pub payment: f64,
    /// Staged terms; set only while negotiation is pending.
    pub modified_terms: Option<String>,
    /// Staged payment; set only while negotiation is pending.
    pub modified_payment: Option<f64>,
    /// Negotiation axis.
    pub negotiation_status: NegotiationStatus,
    /// Status axis.
    pub status: RequestStatus,
    /// Party that made the latest proposal.
    pub created_by: PartyRole,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&AdRequest> for AdRequestDto {
    fn from(r: &AdRequest) -> Self {
        let staged = r.negotiation().staged();
        Self {
            id: r.id().into(),
            campaign_id: r.campaign_id().into(),
            sponsor_id: r.sponsor_id().into(),
            influencer_id: r.influencer_id().map(Into::into),
            ad_name: r.ad_name().to_string(),
            description: r.description().to_string(),
            terms: r.terms().map(str::to_string),
            payment: r.payment().get(),
            modified_terms: staged.map(|o| o.terms().to_string()),
            modified_payment: staged.map(|o| o.payment().get()),
            negotiation_status: r.negotiation_status(),
            status: r.status(),
            created_by: r.created_by(),
            created_at: r.created_at(),
        }
    }
}

/// Response body for `POST /campaigns/{id}/ad-requests`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreateAdRequestResponse {
    /// A new request was stored (201).
    Created {
        /// The new request.
        ad_request: AdRequestDto,
    },
    /// The pair already has a request (200). Nothing changed.
    AlreadyRequested {
        /// Campaign of the existing request.
        campaign_id: Uuid,
        /// Influencer of the existing request.
        influencer_id: Uuid,
    },
}

impl From<&CreateOutcome> for CreateAdRequestResponse {
    fn from(outcome: &CreateOutcome) -> Self {
        match outcome {
            CreateOutcome::Created(r) => Self::Created {
                ad_request: r.into(),
            },
            CreateOutcome::AlreadyRequested {
                campaign_id,
                influencer_id,
            } => Self::AlreadyRequested {
                campaign_id: (*campaign_id).into(),
                influencer_id: (*influencer_id).into(),
            },
        }
    }
}

/// Query parameters for `GET /ad-requests`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdRequestListQuery {
    /// Only requests under this campaign.
    pub campaign_id: Option<Uuid>,
    /// Only requests of this sponsor.
    pub sponsor_id: Option<Uuid>,
    /// Only requests addressed to this influencer.
    pub influencer_id: Option<Uuid>,
    /// Only requests in this status.
    pub status: Option<RequestStatus>,
    /// Only requests whose latest proposal came from this party.
    pub created_by: Option<PartyRole>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page (max 100).
    pub per_page: Option<u32>,
}

impl AdRequestListQuery {
    /// Splits the query into a store filter and pagination.
    #[must_use]
    pub fn into_parts(self) -> (AdRequestFilter, PaginationParams) {
        (
            AdRequestFilter {
                campaign_id: self.campaign_id.map(Into::into),
                sponsor_id: self.sponsor_id.map(Into::into),
                influencer_id: self.influencer_id.map(Into::into),
                status: self.status,
                created_by: self.created_by,
            },
            PaginationParams::from_parts(self.page, self.per_page),
        )
    }
}

/// Paginated list response for `GET /ad-requests`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdRequestListResponse {
    /// Requests on this page.
    pub data: Vec<AdRequestDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> CreateAdRequestRequest {
        let Ok(req) = serde_json::from_value(json) else {
            panic!("body deserializes");
        };
        req
    }

    #[test]
    fn empty_offer_uses_campaign_defaults() {
        let req = body(serde_json::json!({
            "acting_role": "influencer",
            "influencer_id": Uuid::new_v4(),
        }));
        let Ok(input) = req.into_input() else {
            panic!("valid input");
        };
        assert!(input.offer.is_none());
        assert_eq!(input.initiator, PartyRole::Influencer);
    }

    #[test]
    fn partial_offer_is_rejected() {
        let req = body(serde_json::json!({
            "acting_role": "sponsor",
            "ad_name": "Reel",
        }));
        assert!(matches!(
            req.into_input(),
            Err(MarketplaceError::InvalidRequest(_))
        ));
    }

    #[test]
    fn negative_payment_is_rejected() {
        let req = body(serde_json::json!({
            "acting_role": "sponsor",
            "ad_name": "Reel",
            "description": "One reel",
            "payment": -1.0,
        }));
        assert!(matches!(
            req.into_input(),
            Err(MarketplaceError::Validation(_))
        ));
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        let parsed = serde_json::from_value::<CreateAdRequestRequest>(serde_json::json!({
            "acting_role": "admin",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn already_requested_serializes_with_outcome_tag() {
        let campaign_id = Uuid::new_v4();
        let influencer_id = Uuid::new_v4();
        let outcome = CreateOutcome::AlreadyRequested {
            campaign_id: campaign_id.into(),
            influencer_id: influencer_id.into(),
        };
        let json = serde_json::to_value(CreateAdRequestResponse::from(&outcome)).unwrap_or_default();
        assert_eq!(json["outcome"], "already_requested");
        assert_eq!(json["campaign_id"], campaign_id.to_string());
    }
}
