//! REST endpoint handlers organized by resource.

pub mod ad_request;
pub mod campaign;
pub mod party;
pub mod report;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(party::routes())
        .merge(campaign::routes())
        .merge(ad_request::routes())
        .merge(report::routes())
}
