//! Domain events emitted after every committed mutation.
//!
//! Events are broadcast through the [`super::EventBus`] to WebSocket
//! subscribers, who filter them by campaign.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    AdRequest, AdRequestId, CampaignId, InfluencerId, NegotiationStatus, PartyRole,
    RequestStatus, SponsorId, TransitionKind,
};

/// Domain event. Serialized with an `event_type` tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// A sponsor created a campaign.
    CampaignCreated {
        /// Campaign id.
        campaign_id: CampaignId,
        /// Owner.
        sponsor_id: SponsorId,
        /// Whether the campaign is discoverable.
        is_public: bool,
        /// Event time.
        timestamp: DateTime<Utc>,
    },

    /// A campaign's editable fields were replaced.
    CampaignUpdated {
        /// Campaign id.
        campaign_id: CampaignId,
        /// Event time.
        timestamp: DateTime<Utc>,
    },

    /// A campaign and all of its ad requests were removed.
    CampaignDeleted {
        /// Campaign id.
        campaign_id: CampaignId,
        /// Number of ad requests removed with it.
        ad_requests_removed: u64,
        /// Event time.
        timestamp: DateTime<Utc>,
    },

    /// A new ad request was opened.
    AdRequestCreated {
        /// Request id.
        ad_request_id: AdRequestId,
        /// Parent campaign.
        campaign_id: CampaignId,
        /// Target influencer, if any.
        influencer_id: Option<InfluencerId>,
        /// Initiating party.
        created_by: PartyRole,
        /// Offered payment.
        payment: f64,
        /// Event time.
        timestamp: DateTime<Utc>,
    },

    /// A lifecycle transition was committed.
    AdRequestTransitioned {
        /// Request id.
        ad_request_id: AdRequestId,
        /// Parent campaign.
        campaign_id: CampaignId,
        /// Operation applied.
        transition: TransitionKind,
        /// Acting party.
        actor: PartyRole,
        /// Status after the transition.
        status: RequestStatus,
        /// Negotiation status after the transition.
        negotiation_status: NegotiationStatus,
        /// Committed payment after the transition.
        payment: f64,
        /// Event time.
        timestamp: DateTime<Utc>,
    },

    /// An ad request was deleted.
    AdRequestDeleted {
        /// Request id.
        ad_request_id: AdRequestId,
        /// Parent campaign.
        campaign_id: CampaignId,
        /// Event time.
        timestamp: DateTime<Utc>,
    },
}

impl MarketEvent {
    /// Builds the event for a committed transition.
    #[must_use]
    pub fn transitioned(request: &AdRequest, transition: TransitionKind, actor: PartyRole) -> Self {
        Self::AdRequestTransitioned {
            ad_request_id: request.id(),
            campaign_id: request.campaign_id(),
            transition,
            actor,
            status: request.status(),
            negotiation_status: request.negotiation_status(),
            payment: request.payment().get(),
            timestamp: Utc::now(),
        }
    }

    /// Returns the campaign this event belongs to.
    #[must_use]
    pub const fn campaign_id(&self) -> CampaignId {
        match self {
            Self::CampaignCreated { campaign_id, .. }
            | Self::CampaignUpdated { campaign_id, .. }
            | Self::CampaignDeleted { campaign_id, .. }
            | Self::AdRequestCreated { campaign_id, .. }
            | Self::AdRequestTransitioned { campaign_id, .. }
            | Self::AdRequestDeleted { campaign_id, .. } => *campaign_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated { .. } => "campaign_created",
            Self::CampaignUpdated { .. } => "campaign_updated",
            Self::CampaignDeleted { .. } => "campaign_deleted",
            Self::AdRequestCreated { .. } => "ad_request_created",
            Self::AdRequestTransitioned { .. } => "ad_request_transitioned",
            Self::AdRequestDeleted { .. } => "ad_request_deleted",
        }
    }
}
