//! System endpoints: health check and lifecycle catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::{RequestStatus, TransitionKind};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    storage: String,
    ws_subscribers: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, storage backend and the number of live event subscribers.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: state.storage.to_string(),
            ws_subscribers: state.event_bus.receiver_count(),
        }),
    )
}

/// One row of the lifecycle table.
#[derive(Debug, Serialize, ToSchema)]
pub struct LifecycleRule {
    transition: TransitionKind,
    from_statuses: Vec<RequestStatus>,
    actor: &'static str,
    requires_staged_offer: bool,
    requires_influencer: bool,
    effect: &'static str,
}

/// The ad request state machine as served by `/config/lifecycle`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LifecycleCatalog {
    initial_status: RequestStatus,
    terminal_statuses: Vec<RequestStatus>,
    transitions: Vec<LifecycleRule>,
}

/// `GET /config/lifecycle` — Describe the ad request state machine.
#[utoipa::path(
    get,
    path = "/config/lifecycle",
    tag = "System",
    summary = "Ad request lifecycle",
    description = "Lists every lifecycle operation with the statuses it applies to, who may perform it and its effect.",
    responses(
        (status = 200, description = "Lifecycle table", body = LifecycleCatalog),
    )
)]
pub async fn lifecycle_handler() -> impl IntoResponse {
    let catalog = LifecycleCatalog {
        initial_status: RequestStatus::Pending,
        terminal_statuses: RequestStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect(),
        transitions: lifecycle_rules(),
    };
    (StatusCode::OK, Json(catalog))
}

fn lifecycle_rules() -> Vec<LifecycleRule> {
    use RequestStatus::{Accepted, Pending};

    vec![
        LifecycleRule {
            transition: TransitionKind::Accept,
            from_statuses: vec![Pending],
            actor: "either",
            requires_staged_offer: false,
            requires_influencer: true,
            effect: "status becomes accepted",
        },
        LifecycleRule {
            transition: TransitionKind::Reject,
            from_statuses: vec![Pending],
            actor: "either",
            requires_staged_offer: false,
            requires_influencer: false,
            effect: "status becomes rejected (terminal)",
        },
        LifecycleRule {
            transition: TransitionKind::ProposeModification,
            from_statuses: vec![Pending, Accepted],
            actor: "either",
            requires_staged_offer: false,
            requires_influencer: false,
            effect: "stages terms and payment; the proposer becomes created_by",
        },
        LifecycleRule {
            transition: TransitionKind::ApproveModification,
            from_statuses: vec![Pending, Accepted],
            actor: "counterparty of the proposer",
            requires_staged_offer: true,
            requires_influencer: true,
            effect: "commits the staged offer; status becomes accepted",
        },
        LifecycleRule {
            transition: TransitionKind::RejectModification,
            from_statuses: RequestStatus::ALL.to_vec(),
            actor: "counterparty of the proposer",
            requires_staged_offer: true,
            requires_influencer: false,
            effect: "discards the staged offer; status is unchanged",
        },
        LifecycleRule {
            transition: TransitionKind::Complete,
            from_statuses: vec![Accepted],
            actor: "sponsor",
            requires_staged_offer: false,
            requires_influencer: true,
            effect: "status becomes completed (terminal)",
        },
    ]
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/lifecycle", get(lifecycle_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{
        AdRequest, AdRequestDraft, Campaign, CampaignDraft, Counteroffer, InfluencerId,
        Negotiation, PartyRole, SponsorId, Transition,
    };

    fn offer() -> Counteroffer {
        let Ok(offer) = Counteroffer::new("two posts", 250.0) else {
            panic!("valid offer");
        };
        offer
    }

    fn transition(kind: TransitionKind) -> Transition {
        match kind {
            TransitionKind::Accept => Transition::Accept,
            TransitionKind::Reject => Transition::Reject,
            TransitionKind::ProposeModification => Transition::ProposeModification(offer()),
            TransitionKind::ApproveModification => Transition::ApproveModification,
            TransitionKind::RejectModification => Transition::RejectModification,
            TransitionKind::Complete => Transition::Complete,
        }
    }

    /// A request in `status` whose staged offer, if any, came from the influencer.
    fn request(status: RequestStatus, staged: bool, addressed: bool) -> AdRequest {
        let draft = CampaignDraft {
            title: "Autumn".to_string(),
            description: "Boots".to_string(),
            image: None,
            niche: "fashion".to_string(),
            budget: 400.0,
            is_public: true,
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default(),
        };
        let Ok(campaign) = Campaign::create(SponsorId::new(), &draft) else {
            panic!("valid campaign");
        };
        let mut req = AdRequest::open(
            &campaign,
            addressed.then(InfluencerId::new),
            PartyRole::Influencer,
            AdRequestDraft::from_campaign(&campaign),
        );
        req.status = status;
        if staged {
            req.negotiation = Negotiation::Pending(offer());
        }
        req
    }

    #[test]
    fn catalog_matches_state_machine() {
        for rule in lifecycle_rules() {
            for status in RequestStatus::ALL {
                let mut req = request(status, rule.requires_staged_offer, true);
                let outcome = req.apply(PartyRole::Sponsor, transition(rule.transition));
                assert_eq!(
                    outcome.is_ok(),
                    rule.from_statuses.contains(&status),
                    "{} from {status}: {outcome:?}",
                    rule.transition
                );
            }
        }
    }

    #[test]
    fn catalog_matches_staged_offer_and_influencer_rules() {
        for rule in lifecycle_rules() {
            let Some(&status) = rule.from_statuses.first() else {
                panic!("{} lists no statuses", rule.transition);
            };

            let mut bare = request(status, false, true);
            let outcome = bare.apply(PartyRole::Sponsor, transition(rule.transition));
            assert_eq!(outcome.is_err(), rule.requires_staged_offer, "{}", rule.transition);

            let mut open = request(status, rule.requires_staged_offer, false);
            let outcome = open.apply(PartyRole::Sponsor, transition(rule.transition));
            assert_eq!(outcome.is_err(), rule.requires_influencer, "{}", rule.transition);
        }
    }
}
