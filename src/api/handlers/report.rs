//! Reporting handlers: per-party and platform-wide statistics.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::{InfluencerId, SponsorId};
use crate::error::{ErrorResponse, MarketplaceError};
use crate::service::report_service::{InfluencerStats, PlatformStats, SponsorStats};

/// `GET /influencers/{id}/stats` — Influencer dashboard figures.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the influencer does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/influencers/{id}/stats",
    tag = "Reports",
    summary = "Influencer statistics",
    description = "Counts the influencer's ad requests by status and sums the payment of accepted ones.",
    params(
        ("id" = uuid::Uuid, Path, description = "Influencer UUID"),
    ),
    responses(
        (status = 200, description = "Influencer statistics", body = InfluencerStats),
        (status = 404, description = "Influencer not found", body = ErrorResponse),
    )
)]
pub async fn influencer_stats(
    State(state): State<AppState>,
    Path(id): Path<InfluencerId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    Ok(Json(state.reports.influencer_stats(id).await?))
}

/// `GET /sponsors/{id}/stats` — Sponsor dashboard figures.
///
/// # Errors
///
/// Returns [`MarketplaceError::NotFound`] if the sponsor does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/sponsors/{id}/stats",
    tag = "Reports",
    summary = "Sponsor statistics",
    params(
        ("id" = uuid::Uuid, Path, description = "Sponsor UUID"),
    ),
    responses(
        (status = 200, description = "Sponsor statistics", body = SponsorStats),
        (status = 404, description = "Sponsor not found", body = ErrorResponse),
    )
)]
pub async fn sponsor_stats(
    State(state): State<AppState>,
    Path(id): Path<SponsorId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    Ok(Json(state.reports.sponsor_stats(id).await?))
}

/// `GET /stats` — Platform-wide figures.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "Reports",
    summary = "Platform statistics",
    responses(
        (status = 200, description = "Platform statistics", body = PlatformStats),
    )
)]
pub async fn platform_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketplaceError> {
    Ok(Json(state.reports.platform_stats().await?))
}

/// Reporting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/influencers/{id}/stats", get(influencer_stats))
        .route("/sponsors/{id}/stats", get(sponsor_stats))
        .route("/stats", get(platform_stats))
}
