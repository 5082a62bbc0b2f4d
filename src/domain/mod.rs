//! Domain layer: identifiers, the ad request state machine, campaigns,
//! parties and the event system.
//!
//! Nothing in here performs I/O. The persistence and service layers load
//! aggregates, call into these types to validate and mutate them, and
//! store the result.

pub mod ad_request;
pub mod campaign;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod party;
pub mod status;
pub mod validation;

pub use ad_request::{
    AdRequest, AdRequestDraft, Counteroffer, Negotiation, Transition, TransitionError,
    TransitionKind,
};
pub use campaign::{Campaign, CampaignDraft};
pub use event::MarketEvent;
pub use event_bus::EventBus;
pub use ids::{AdRequestId, CampaignId, InfluencerId, SponsorId};
pub use party::{Influencer, InfluencerDraft, Sponsor};
pub use status::{NegotiationStatus, PartyRole, RequestStatus};
pub use validation::{Payment, ValidationError};
