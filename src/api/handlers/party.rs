//! Sponsor and influencer directory handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    InfluencerDto, InfluencerListQuery, InfluencerListResponse, PaginationParams,
    RegisterInfluencerRequest, RegisterSponsorRequest, SponsorDto, SponsorListResponse,
};
use crate::app_state::AppState;
use crate::domain::{InfluencerDraft, InfluencerId, SponsorId};
use crate::error::{ErrorResponse, MarketplaceError};

/// `POST /sponsors` — Register a sponsor.
///
/// # Errors
///
/// Returns [`MarketplaceError::Validation`] for blank or oversized fields.
#[utoipa::path(
    post,
    path = "/api/v1/sponsors",
    tag = "Directory",
    summary = "Register a sponsor",
    request_body = RegisterSponsorRequest,
    responses(
        (status = 201, description = "Sponsor registered", body = SponsorDto),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn register_sponsor(
    State(state): State<AppState>,
    Json(req): Json<RegisterSponsorRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let sponsor = state
        .directory
        .register_sponsor(&req.name, &req.industry)
        .await?;
    Ok((StatusCode::CREATED, Json(SponsorDto::from(&sponsor))))
}

/// `GET /sponsors` — List sponsors by name.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/sponsors",
    tag = "Directory",
    summary = "List sponsors",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated sponsor list", body = SponsorListResponse),
    )
)]
pub async fn list_sponsors(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let (page, meta) = params.paginate(state.directory.sponsors().await?);
    Ok(Json(SponsorListResponse {
        data: page.iter().map(SponsorDto::from).collect(),
        pagination: meta,
    }))
}

/// `GET /sponsors/{id}` — Get one sponsor.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the sponsor does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/sponsors/{id}",
    tag = "Directory",
    summary = "Get a sponsor",
    params(
        ("id" = uuid::Uuid, Path, description = "Sponsor UUID"),
    ),
    responses(
        (status = 200, description = "Sponsor", body = SponsorDto),
        (status = 404, description = "Sponsor not found", body = ErrorResponse),
    )
)]
pub async fn get_sponsor(
    State(state): State<AppState>,
    Path(id): Path<SponsorId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let sponsor = state.directory.sponsor(id).await?;
    Ok(Json(SponsorDto::from(&sponsor)))
}

/// `POST /influencers` — Register an influencer.
///
/// # Errors
///
/// Returns [`MarketplaceError::Validation`] for blank fields or an
/// unparseable reach.
#[utoipa::path(
    post,
    path = "/api/v1/influencers",
    tag = "Directory",
    summary = "Register an influencer",
    description = "Registers an influencer. `reach` accepts plain counts and `K`/`M` suffixes such as `12K` or `1.5M`.",
    request_body = RegisterInfluencerRequest,
    responses(
        (status = 201, description = "Influencer registered", body = InfluencerDto),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn register_influencer(
    State(state): State<AppState>,
    Json(req): Json<RegisterInfluencerRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let draft = InfluencerDraft::from(req);
    let influencer = state.directory.register_influencer(&draft).await?;
    Ok((StatusCode::CREATED, Json(InfluencerDto::from(&influencer))))
}

/// `GET /influencers` — List influencers by name, optionally searching names.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/influencers",
    tag = "Directory",
    summary = "List influencers",
    params(InfluencerListQuery),
    responses(
        (status = 200, description = "Paginated influencer list", body = InfluencerListResponse),
    )
)]
pub async fn list_influencers(
    State(state): State<AppState>,
    Query(query): Query<InfluencerListQuery>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let (filter, params) = query.into_parts();
    let (page, meta) = params.paginate(state.directory.influencers(filter).await?);
    Ok(Json(InfluencerListResponse {
        data: page.iter().map(InfluencerDto::from).collect(),
        pagination: meta,
    }))
}

/// `GET /influencers/{id}` — Get one influencer.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the influencer does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/influencers/{id}",
    tag = "Directory",
    summary = "Get an influencer",
    params(
        ("id" = uuid::Uuid, Path, description = "Influencer UUID"),
    ),
    responses(
        (status = 200, description = "Influencer", body = InfluencerDto),
        (status = 404, description = "Influencer not found", body = ErrorResponse),
    )
)]
pub async fn get_influencer(
    State(state): State<AppState>,
    Path(id): Path<InfluencerId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let influencer = state.directory.influencer(id).await?;
    Ok(Json(InfluencerDto::from(&influencer)))
}

/// Directory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sponsors", get(list_sponsors).post(register_sponsor))
        .route("/sponsors/{id}", get(get_sponsor))
        .route(
            "/influencers",
            get(list_influencers).post(register_influencer),
        )
        .route("/influencers/{id}", get(get_influencer))
}
