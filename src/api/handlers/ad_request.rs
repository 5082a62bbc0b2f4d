//! Ad request handlers: creation, listing and the lifecycle transitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ActingRoleRequest, AdRequestDto, AdRequestListQuery, AdRequestListResponse,
    CreateAdRequestRequest, CreateAdRequestResponse, ProposeModificationRequest,
};
use crate::app_state::AppState;
use crate::domain::{AdRequestId, CampaignId};
use crate::error::{ErrorResponse, MarketplaceError};
use crate::service::CreateOutcome;

/// `POST /campaigns/{id}/ad-requests` — Open an ad request.
///
/// # Errors
///
/// Returns [`MarketplaceError`] for unknown ids, a private campaign
/// targeted by an influencer, or invalid offer fields.
#[utoipa::path(
    post,
    path = "/api/v1/campaigns/{id}/ad-requests",
    tag = "Ad Requests",
    summary = "Open an ad request",
    description = "Opens a pending ad request on a campaign. Without bespoke offer fields the campaign's title, description and budget are copied. A second request for the same campaign and influencer returns `already_requested` with 200 and changes nothing.",
    params(
        ("id" = uuid::Uuid, Path, description = "Campaign UUID"),
    ),
    request_body = CreateAdRequestRequest,
    responses(
        (status = 201, description = "Ad request created", body = CreateAdRequestResponse),
        (status = 200, description = "The pair already has a request", body = CreateAdRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Campaign is private", body = ErrorResponse),
        (status = 404, description = "Campaign or influencer not found", body = ErrorResponse),
    )
)]
pub async fn create_ad_request(
    State(state): State<AppState>,
    Path(campaign_id): Path<CampaignId>,
    Json(req): Json<CreateAdRequestRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let input = req.into_input()?;
    let outcome = state
        .ad_requests
        .create_ad_request(campaign_id, input)
        .await?;
    let status = match outcome {
        CreateOutcome::Created(_) => StatusCode::CREATED,
        CreateOutcome::AlreadyRequested { .. } => StatusCode::OK,
    };
    Ok((status, Json(CreateAdRequestResponse::from(&outcome))))
}

/// `GET /ad-requests` — List ad requests.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/ad-requests",
    tag = "Ad Requests",
    summary = "List ad requests",
    description = "Returns a paginated list of ad requests, newest first, filtered by campaign, sponsor, influencer, status or proposer.",
    params(AdRequestListQuery),
    responses(
        (status = 200, description = "Paginated ad request list", body = AdRequestListResponse),
    )
)]
pub async fn list_ad_requests(
    State(state): State<AppState>,
    Query(query): Query<AdRequestListQuery>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let (filter, pagination) = query.into_parts();
    let requests = state.ad_requests.list(filter).await?;
    let (page, meta) = pagination.paginate(requests);
    Ok(Json(AdRequestListResponse {
        data: page.iter().map(AdRequestDto::from).collect(),
        pagination: meta,
    }))
}

/// `GET /ad-requests/{id}` — Get one ad request.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the request does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/ad-requests/{id}",
    tag = "Ad Requests",
    summary = "Get an ad request",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    responses(
        (status = 200, description = "Ad request", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
    )
)]
pub async fn get_ad_request(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state.ad_requests.get(id).await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// `DELETE /ad-requests/{id}` — Delete an ad request in any status.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the request does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/ad-requests/{id}",
    tag = "Ad Requests",
    summary = "Delete an ad request",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    responses(
        (status = 200, description = "The removed ad request", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
    )
)]
pub async fn delete_ad_request(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let removed = state.ad_requests.delete(id).await?;
    Ok(Json(AdRequestDto::from(&removed)))
}

/// `POST /ad-requests/{id}/accept` — Accept a pending request.
///
/// # Errors
///
/// Returns [`MarketplaceError::InvalidTransition`] unless the request is pending.
#[utoipa::path(
    post,
    path = "/api/v1/ad-requests/{id}/accept",
    tag = "Lifecycle",
    summary = "Accept an ad request",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    request_body = ActingRoleRequest,
    responses(
        (status = 200, description = "Accepted", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
        (status = 409, description = "Request is not pending", body = ErrorResponse),
    )
)]
pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
    Json(req): Json<ActingRoleRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state.ad_requests.accept(id, req.acting_role).await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// `POST /ad-requests/{id}/reject` — Reject a pending request.
///
/// # Errors
///
/// Returns [`MarketplaceError::InvalidTransition`] unless the request is pending.
#[utoipa::path(
    post,
    path = "/api/v1/ad-requests/{id}/reject",
    tag = "Lifecycle",
    summary = "Reject an ad request",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    request_body = ActingRoleRequest,
    responses(
        (status = 200, description = "Rejected", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
        (status = 409, description = "Request is not pending", body = ErrorResponse),
    )
)]
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
    Json(req): Json<ActingRoleRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state.ad_requests.reject(id, req.acting_role).await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// `POST /ad-requests/{id}/complete` — Close an accepted deal.
///
/// # Errors
///
/// Returns [`MarketplaceError::InvalidTransition`] unless the request is
/// accepted and the sponsor is acting.
#[utoipa::path(
    post,
    path = "/api/v1/ad-requests/{id}/complete",
    tag = "Lifecycle",
    summary = "Complete an ad request",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    request_body = ActingRoleRequest,
    responses(
        (status = 200, description = "Completed", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
        (status = 409, description = "Request is not accepted or the actor is not the sponsor", body = ErrorResponse),
    )
)]
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
    Json(req): Json<ActingRoleRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state.ad_requests.complete(id, req.acting_role).await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// `POST /ad-requests/{id}/modifications` — Stage a counter-offer.
///
/// # Errors
///
/// Returns [`MarketplaceError`] for invalid terms or payment, or a
/// terminal request.
#[utoipa::path(
    post,
    path = "/api/v1/ad-requests/{id}/modifications",
    tag = "Lifecycle",
    summary = "Propose a modification",
    description = "Stages new terms and payment for the counterparty to approve or reject. Replaces any outstanding proposal. The committed terms are untouched until approval.",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    request_body = ProposeModificationRequest,
    responses(
        (status = 200, description = "Counter-offer staged", body = AdRequestDto),
        (status = 400, description = "Invalid terms or payment", body = ErrorResponse),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
        (status = 409, description = "Request is terminal", body = ErrorResponse),
    )
)]
pub async fn propose_modification(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
    Json(req): Json<ProposeModificationRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state
        .ad_requests
        .propose_modification(id, req.acting_role, &req.terms, req.payment)
        .await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// `POST /ad-requests/{id}/modifications/approve` — Commit the staged offer.
///
/// # Errors
///
/// Returns [`MarketplaceError::InvalidTransition`] if nothing is staged or
/// the proposer answers its own offer.
#[utoipa::path(
    post,
    path = "/api/v1/ad-requests/{id}/modifications/approve",
    tag = "Lifecycle",
    summary = "Approve a modification",
    description = "Commits the staged terms and payment and marks the request accepted. Must come from the party that did not propose.",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    request_body = ActingRoleRequest,
    responses(
        (status = 200, description = "Modification approved", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
        (status = 409, description = "Nothing staged or own proposal", body = ErrorResponse),
    )
)]
pub async fn approve_modification(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
    Json(req): Json<ActingRoleRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state
        .ad_requests
        .approve_modification(id, req.acting_role)
        .await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// `POST /ad-requests/{id}/modifications/reject` — Discard the staged offer.
///
/// # Errors
///
/// Returns [`MarketplaceError::InvalidTransition`] if nothing is staged or
/// the proposer answers its own offer.
#[utoipa::path(
    post,
    path = "/api/v1/ad-requests/{id}/modifications/reject",
    tag = "Lifecycle",
    summary = "Reject a modification",
    params(
        ("id" = uuid::Uuid, Path, description = "Ad request UUID"),
    ),
    request_body = ActingRoleRequest,
    responses(
        (status = 200, description = "Modification rejected", body = AdRequestDto),
        (status = 404, description = "Ad request not found", body = ErrorResponse),
        (status = 409, description = "Nothing staged or own proposal", body = ErrorResponse),
    )
)]
pub async fn reject_modification(
    State(state): State<AppState>,
    Path(id): Path<AdRequestId>,
    Json(req): Json<ActingRoleRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let request = state
        .ad_requests
        .reject_modification(id, req.acting_role)
        .await?;
    Ok(Json(AdRequestDto::from(&request)))
}

/// Ad request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/campaigns/{id}/ad-requests", post(create_ad_request))
        .route("/ad-requests", get(list_ad_requests))
        .route(
            "/ad-requests/{id}",
            get(get_ad_request).delete(delete_ad_request),
        )
        .route("/ad-requests/{id}/accept", post(accept))
        .route("/ad-requests/{id}/reject", post(reject))
        .route("/ad-requests/{id}/complete", post(complete))
        .route("/ad-requests/{id}/modifications", post(propose_modification))
        .route(
            "/ad-requests/{id}/modifications/approve",
            post(approve_modification),
        )
        .route(
            "/ad-requests/{id}/modifications/reject",
            post(reject_modification),
        )
}
