//! Sponsor and influencer DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common_dto::{PaginationMeta, PaginationParams};
use crate::domain::{Influencer, InfluencerDraft, Sponsor};
use crate::persistence::InfluencerFilter;

/// Request body for `POST /sponsors`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterSponsorRequest {
    /// Display name.
    pub name: String,
    /// Industry.
    pub industry: String,
}

/// Sponsor representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SponsorDto {
    /// Sponsor id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Industry.
    pub industry: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&Sponsor> for SponsorDto {
    fn from(s: &Sponsor) -> Self {
        Self {
            id: s.id.into(),
            name: s.name.clone(),
            industry: s.industry.clone(),
            created_at: s.created_at,
        }
    }
}

/// Request body for `POST /influencers`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterInfluencerRequest {
    /// Display name.
    pub name: String,
    /// Content category.
    pub category: String,
    /// Niche.
    pub niche: String,
    /// Audience size such as `"12K"`, `"1.5M"` or `"800"`.
    pub reach: String,
    /// Social networks.
    #[serde(default)]
    pub social_networks: Vec<String>,
}

impl From<RegisterInfluencerRequest> for InfluencerDraft {
    fn from(r: RegisterInfluencerRequest) -> Self {
        Self {
            name: r.name,
            category: r.category,
            niche: r.niche,
            reach: r.reach,
            social_networks: r.social_networks,
        }
    }
}

/// Influencer representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InfluencerDto {
    /// Influencer id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Content category.
    pub category: String,
    /// Niche.
    pub niche: String,
    /// Audience size in followers.
    pub reach: u64,
    /// Social networks.
    pub social_networks: Vec<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&Influencer> for InfluencerDto {
    fn from(i: &Influencer) -> Self {
        Self {
            id: i.id.into(),
            name: i.name.clone(),
            category: i.category.clone(),
            niche: i.niche.clone(),
            reach: i.reach,
            social_networks: i.social_networks.clone(),
            created_at: i.created_at,
        }
    }
}

/// Paginated list response for `GET /sponsors`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SponsorListResponse {
    /// Sponsors on this page.
    pub data: Vec<SponsorDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Query parameters for `GET /influencers`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InfluencerListQuery {
    /// Case-insensitive name search.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page (max 100).
    pub per_page: Option<u32>,
}

impl InfluencerListQuery {
    /// Splits the query into a store filter and pagination.
    #[must_use]
    pub fn into_parts(self) -> (InfluencerFilter, PaginationParams) {
        (
            InfluencerFilter {
                name_contains: self
                    .search
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            },
            PaginationParams::from_parts(self.page, self.per_page),
        )
    }
}

/// Paginated list response for `GET /influencers`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InfluencerListResponse {
    /// Influencers on this page.
    pub data: Vec<InfluencerDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
