//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::{dto, handlers};

/// Aggregated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Influence Marketplace API",
        description = "Sponsor/influencer marketplace: campaigns, ad requests and their negotiation lifecycle.\n\nEvery lifecycle call carries an `acting_role` of `sponsor` or `influencer`. Live events are streamed over `GET /ws`.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Directory", description = "Sponsor and influencer registration"),
        (name = "Campaigns", description = "Sponsor-owned campaigns"),
        (name = "Ad Requests", description = "Creating, listing and deleting ad requests"),
        (name = "Lifecycle", description = "Accept, reject, negotiate and complete ad requests"),
        (name = "Reports", description = "Dashboard statistics"),
        (name = "System", description = "Health and lifecycle catalog"),
    ),
    paths(
        // Directory
        handlers::party::register_sponsor,
        handlers::party::list_sponsors,
        handlers::party::get_sponsor,
        handlers::party::register_influencer,
        handlers::party::list_influencers,
        handlers::party::get_influencer,
        // Campaigns
        handlers::campaign::create_campaign,
        handlers::campaign::list_campaigns,
        handlers::campaign::get_campaign,
        handlers::campaign::update_campaign,
        handlers::campaign::delete_campaign,
        // Ad requests
        handlers::ad_request::create_ad_request,
        handlers::ad_request::list_ad_requests,
        handlers::ad_request::get_ad_request,
        handlers::ad_request::delete_ad_request,
        // Lifecycle
        handlers::ad_request::accept,
        handlers::ad_request::reject,
        handlers::ad_request::complete,
        handlers::ad_request::propose_modification,
        handlers::ad_request::approve_modification,
        handlers::ad_request::reject_modification,
        // Reports
        handlers::report::influencer_stats,
        handlers::report::sponsor_stats,
        handlers::report::platform_stats,
        // System
        handlers::system::health_handler,
        handlers::system::lifecycle_handler,
    ),
    components(schemas(
        dto::RegisterSponsorRequest,
        dto::SponsorDto,
        dto::SponsorListResponse,
        dto::RegisterInfluencerRequest,
        dto::InfluencerDto,
        dto::InfluencerListResponse,
        dto::CreateCampaignRequest,
        dto::CampaignDto,
        dto::CampaignListResponse,
        dto::DeleteCampaignResponse,
        dto::CreateAdRequestRequest,
        dto::CreateAdRequestResponse,
        dto::ProposeModificationRequest,
        dto::ActingRoleRequest,
        dto::AdRequestDto,
        dto::AdRequestListResponse,
        dto::PaginationMeta,
        crate::domain::CampaignDraft,
        crate::domain::PartyRole,
        crate::domain::RequestStatus,
        crate::domain::NegotiationStatus,
        crate::domain::TransitionKind,
        crate::service::report_service::StatusCounts,
        crate::service::report_service::RequestEarning,
        crate::service::report_service::CampaignBudget,
        crate::service::report_service::InfluencerReach,
        crate::service::report_service::InfluencerStats,
        crate::service::report_service::SponsorStats,
        crate::service::report_service::PlatformStats,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        handlers::system::HealthResponse,
        handlers::system::LifecycleRule,
        handlers::system::LifecycleCatalog,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_lifecycle_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/v1/ad-requests/{id}/modifications/approve"));
        assert!(paths.iter().any(|p| *p == "/api/v1/campaigns/{id}/ad-requests"));
        assert!(paths.iter().any(|p| *p == "/health"));
    }

    #[test]
    fn document_serializes() {
        let json = ApiDoc::openapi().to_json();
        assert!(json.is_ok_and(|j| j.contains("Influence Marketplace API")));
    }
}
