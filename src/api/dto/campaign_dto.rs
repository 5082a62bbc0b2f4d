//! Campaign DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common_dto::{PaginationMeta, PaginationParams};
use crate::domain::{Campaign, CampaignDraft};
use crate::persistence::CampaignFilter;

/// Request body for `POST /campaigns`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    /// Owning sponsor.
    pub sponsor_id: Uuid,
    /// Campaign fields.
    #[serde(flatten)]
    pub campaign: CampaignDraft,
}

/// Campaign representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignDto {
    /// Campaign id.
    pub id: Uuid,
    /// Owning sponsor.
    pub sponsor_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Image reference.
    pub image: Option<String>,
    /// Niche.
    pub niche: String,
    /// Budget.
    pub budget: f64,
    /// Whether influencers may request it.
    pub is_public: bool,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Campaign> for CampaignDto {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id().into(),
            sponsor_id: c.sponsor_id().into(),
            title: c.title().to_string(),
            description: c.description().to_string(),
            image: c.image().map(str::to_string),
            niche: c.niche().to_string(),
            budget: c.budget().get(),
            is_public: c.is_public(),
            start_date: c.start_date(),
            end_date: c.end_date(),
            created_at: c.created_at(),
        }
    }
}

/// Query parameters for `GET /campaigns`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignListQuery {
    /// Only this sponsor's campaigns.
    pub sponsor_id: Option<Uuid>,
    /// Only public campaigns.
    pub public_only: Option<bool>,
    /// Case-insensitive title search.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page (max 100).
    pub per_page: Option<u32>,
}

impl CampaignListQuery {
    /// Splits the query into a store filter and pagination.
    #[must_use]
    pub fn into_parts(self) -> (CampaignFilter, PaginationParams) {
        (
            CampaignFilter {
                sponsor_id: self.sponsor_id.map(Into::into),
                public_only: self.public_only.unwrap_or(false),
                title_contains: self
                    .search
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            },
            PaginationParams::from_parts(self.page, self.per_page),
        )
    }
}

/// Paginated list response for `GET /campaigns`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignListResponse {
    /// Campaigns on this page.
    pub data: Vec<CampaignDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Response body for `DELETE /campaigns/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteCampaignResponse {
    /// Deleted campaign.
    pub campaign_id: Uuid,
    /// Ad requests removed together with it.
    pub ad_requests_removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_flattens_campaign_fields() {
        let parsed = serde_json::from_value::<CreateCampaignRequest>(serde_json::json!({
            "sponsor_id": Uuid::new_v4(),
            "title": "Fall",
            "description": "Leaves",
            "niche": "outdoor",
            "budget": 90.0,
            "start_date": "2026-09-01",
            "end_date": "2026-10-01",
        }));
        assert!(parsed.is_ok_and(|b| b.campaign.title == "Fall" && b.campaign.is_public));
    }

    #[test]
    fn blank_search_is_ignored() {
        let (filter, _) = CampaignListQuery {
            search: Some("   ".to_string()),
            ..CampaignListQuery::default()
        }
        .into_parts();
        assert!(filter.title_contains.is_none());
        assert!(!filter.public_only);
    }
}
