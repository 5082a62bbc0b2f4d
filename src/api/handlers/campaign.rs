//! Campaign CRUD handlers: create, list, get, update, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    CampaignDto, CampaignListQuery, CampaignListResponse, CreateCampaignRequest,
    DeleteCampaignResponse,
};
use crate::app_state::AppState;
use crate::domain::{CampaignDraft, CampaignId};
use crate::error::{ErrorResponse, MarketplaceError};

/// `POST /campaigns` — Create a campaign.
///
/// # Errors
///
/// Returns [`MarketplaceError`] for invalid fields or an unknown sponsor.
#[utoipa::path(
    post,
    path = "/api/v1/campaigns",
    tag = "Campaigns",
    summary = "Create a campaign",
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = CampaignDto),
        (status = 400, description = "Invalid campaign fields", body = ErrorResponse),
        (status = 404, description = "Sponsor not found", body = ErrorResponse),
    )
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let campaign = state
        .campaigns
        .create(req.sponsor_id.into(), &req.campaign)
        .await?;
    Ok((StatusCode::CREATED, Json(CampaignDto::from(&campaign))))
}

/// `GET /campaigns` — List campaigns.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    tag = "Campaigns",
    summary = "List campaigns",
    description = "Returns a paginated list of campaigns, newest first. `public_only` restricts to discoverable campaigns and `search` matches titles case-insensitively.",
    params(CampaignListQuery),
    responses(
        (status = 200, description = "Paginated campaign list", body = CampaignListResponse),
    )
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignListQuery>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let (filter, pagination) = query.into_parts();
    let campaigns = state.campaigns.list(filter).await?;
    let (page, meta) = pagination.paginate(campaigns);
    Ok(Json(CampaignListResponse {
        data: page.iter().map(CampaignDto::from).collect(),
        pagination: meta,
    }))
}

/// `GET /campaigns/{id}` — Get one campaign.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the campaign does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}",
    tag = "Campaigns",
    summary = "Get a campaign",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
    ),
    responses(
        (status = 200, description = "Campaign", body = CampaignDto),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    )
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let campaign = state.campaigns.get(id).await?;
    Ok(Json(CampaignDto::from(&campaign)))
}

/// `PUT /campaigns/{id}` — Replace a campaign's editable fields.
///
/// # Errors
///
/// Returns [`MarketplaceError`] for invalid fields or an unknown campaign.
#[utoipa::path(
    put,
    path = "/api/v1/campaigns/{id}",
    tag = "Campaigns",
    summary = "Update a campaign",
    description = "Replaces every editable field. Existing ad requests keep the content they were opened with.",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
    ),
    request_body = CampaignDraft,
    responses(
        (status = 200, description = "Updated campaign", body = CampaignDto),
        (status = 400, description = "Invalid campaign fields", body = ErrorResponse),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    )
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
    Json(draft): Json<CampaignDraft>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let campaign = state.campaigns.update(id, draft).await?;
    Ok(Json(CampaignDto::from(&campaign)))
}

/// `DELETE /campaigns/{id}` — Delete a campaign and its ad requests.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the campaign does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/campaigns/{id}",
    tag = "Campaigns",
    summary = "Delete a campaign",
    description = "Removes the campaign together with every ad request opened on it.",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
    ),
    responses(
        (status = 200, description = "Campaign deleted", body = DeleteCampaignResponse),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    )
)]
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let removed = state.campaigns.delete(id).await?;
    Ok(Json(DeleteCampaignResponse {
        campaign_id: id.into(),
        ad_requests_removed: removed,
    }))
}

/// Campaign routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route(
            "/campaigns/{id}",
            get(get_campaign)
                .put(update_campaign)
                .delete(delete_campaign),
        )
}
