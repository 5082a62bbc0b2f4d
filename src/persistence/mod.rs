//! Persistence layer: the repository interface and its implementations.
//!
//! [`MarketplaceStore`] is the only way the service layer touches state.
//! Every method is one atomic unit: either all of its effects become
//! visible or none do. Two backends exist:
//!
//! - [`MemoryStore`]: a single `tokio::sync::RwLock` over all tables.
//! - [`PostgresStore`]: `sqlx::PgPool`, one database transaction per call.
//!
//! [`Store`] selects between them at runtime.

pub mod memory;
pub mod models;
pub mod postgres;

use std::future::Future;

use crate::domain::{
    AdRequest, AdRequestId, Campaign, CampaignDraft, CampaignId, Influencer, InfluencerId,
    PartyRole, RequestStatus, Sponsor, SponsorId, Transition,
};
use crate::error::MarketplaceError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Query filter for campaign listings. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    /// Only campaigns owned by this sponsor.
    pub sponsor_id: Option<SponsorId>,
    /// Only public campaigns.
    pub public_only: bool,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
}

impl CampaignFilter {
    /// Returns `true` if `campaign` passes the filter.
    #[must_use]
    pub fn matches(&self, campaign: &Campaign) -> bool {
        if self.sponsor_id.is_some_and(|id| id != campaign.sponsor_id()) {
            return false;
        }
        if self.public_only && !campaign.is_public() {
            return false;
        }
        match &self.title_contains {
            Some(needle) => campaign
                .title()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Query filter for influencer listings. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct InfluencerFilter {
    /// Case-insensitive substring of the name.
    pub name_contains: Option<String>,
}

impl InfluencerFilter {
    /// Returns `true` if `influencer` passes the filter.
    #[must_use]
    pub fn matches(&self, influencer: &Influencer) -> bool {
        self.name_contains.as_ref().is_none_or(|needle| {
            influencer
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}

/// Query filter for ad request listings. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct AdRequestFilter {
    /// Only requests under this campaign.
    pub campaign_id: Option<CampaignId>,
    /// Only requests of this sponsor.
    pub sponsor_id: Option<SponsorId>,
    /// Only requests addressed to this influencer.
    pub influencer_id: Option<InfluencerId>,
    /// Only requests in this status.
    pub status: Option<RequestStatus>,
    /// Only requests whose latest proposal came from this party.
    pub created_by: Option<PartyRole>,
}

impl AdRequestFilter {
    /// Returns `true` if `request` passes the filter.
    #[must_use]
    pub fn matches(&self, request: &AdRequest) -> bool {
        self.campaign_id.is_none_or(|id| id == request.campaign_id())
            && self.sponsor_id.is_none_or(|id| id == request.sponsor_id())
            && self
                .influencer_id
                .is_none_or(|id| Some(id) == request.influencer_id())
            && self.status.is_none_or(|s| s == request.status())
            && self.created_by.is_none_or(|r| r == request.created_by())
    }
}

/// Repository interface for all marketplace state.
///
/// Listing methods return rows newest first, except parties which are
/// ordered by name.
pub trait MarketplaceStore: Send + Sync + 'static {
    /// Stores a new sponsor.
    fn insert_sponsor(
        &self,
        sponsor: Sponsor,
    ) -> impl Future<Output = Result<Sponsor, MarketplaceError>> + Send;

    /// Loads a sponsor.
    fn get_sponsor(
        &self,
        id: SponsorId,
    ) -> impl Future<Output = Result<Sponsor, MarketplaceError>> + Send;

    /// Lists all sponsors.
    fn list_sponsors(&self) -> impl Future<Output = Result<Vec<Sponsor>, MarketplaceError>> + Send;

    /// Stores a new influencer.
    fn insert_influencer(
        &self,
        influencer: Influencer,
    ) -> impl Future<Output = Result<Influencer, MarketplaceError>> + Send;

    /// Loads an influencer.
    fn get_influencer(
        &self,
        id: InfluencerId,
    ) -> impl Future<Output = Result<Influencer, MarketplaceError>> + Send;

    /// Lists influencers matching `filter`.
    fn list_influencers(
        &self,
        filter: InfluencerFilter,
    ) -> impl Future<Output = Result<Vec<Influencer>, MarketplaceError>> + Send;

    /// Stores a new campaign. The owning sponsor must exist.
    fn insert_campaign(
        &self,
        campaign: Campaign,
    ) -> impl Future<Output = Result<Campaign, MarketplaceError>> + Send;

    /// Loads a campaign.
    fn get_campaign(
        &self,
        id: CampaignId,
    ) -> impl Future<Output = Result<Campaign, MarketplaceError>> + Send;

    /// Lists campaigns matching `filter`.
    fn list_campaigns(
        &self,
        filter: CampaignFilter,
    ) -> impl Future<Output = Result<Vec<Campaign>, MarketplaceError>> + Send;

    /// Replaces a campaign's editable fields under a row lock.
    fn update_campaign(
        &self,
        id: CampaignId,
        draft: CampaignDraft,
    ) -> impl Future<Output = Result<Campaign, MarketplaceError>> + Send;

    /// Deletes a campaign together with all of its ad requests.
    ///
    /// Returns the number of ad requests removed.
    fn delete_campaign(
        &self,
        id: CampaignId,
    ) -> impl Future<Output = Result<u64, MarketplaceError>> + Send;

    /// Stores a new ad request.
    ///
    /// Fails with [`MarketplaceError::DuplicateRequest`] if another request
    /// already links the same campaign and influencer; the check and the
    /// insert are one atomic step.
    fn insert_ad_request(
        &self,
        request: AdRequest,
    ) -> impl Future<Output = Result<AdRequest, MarketplaceError>> + Send;

    /// Loads an ad request.
    fn get_ad_request(
        &self,
        id: AdRequestId,
    ) -> impl Future<Output = Result<AdRequest, MarketplaceError>> + Send;

    /// Lists ad requests matching `filter`.
    fn list_ad_requests(
        &self,
        filter: AdRequestFilter,
    ) -> impl Future<Output = Result<Vec<AdRequest>, MarketplaceError>> + Send;

    /// Locks the request, applies `transition` against its current state
    /// and commits. Nothing is written if the transition is refused.
    fn transition_ad_request(
        &self,
        id: AdRequestId,
        actor: PartyRole,
        transition: Transition,
    ) -> impl Future<Output = Result<AdRequest, MarketplaceError>> + Send;

    /// Deletes an ad request and returns the removed row.
    fn delete_ad_request(
        &self,
        id: AdRequestId,
    ) -> impl Future<Output = Result<AdRequest, MarketplaceError>> + Send;
}

/// Runtime-selected store backend.
#[derive(Debug, Clone)]
pub enum Store {
    /// Process-local tables.
    Memory(MemoryStore),
    /// PostgreSQL tables.
    Postgres(PostgresStore),
}

impl Store {
    /// Short backend name for logs.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

macro_rules! dispatch {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {
        match $self {
            Store::Memory(s) => s.$method($($arg),*).await,
            Store::Postgres(s) => s.$method($($arg),*).await,
        }
    };
}

impl MarketplaceStore for Store {
    async fn insert_sponsor(&self, sponsor: Sponsor) -> Result<Sponsor, MarketplaceError> {
        dispatch!(self.insert_sponsor(sponsor))
    }

    async fn get_sponsor(&self, id: SponsorId) -> Result<Sponsor, MarketplaceError> {
        dispatch!(self.get_sponsor(id))
    }

    async fn list_sponsors(&self) -> Result<Vec<Sponsor>, MarketplaceError> {
        dispatch!(self.list_sponsors())
    }

    async fn insert_influencer(&self, influencer: Influencer) -> Result<Influencer, MarketplaceError> {
        dispatch!(self.insert_influencer(influencer))
    }

    async fn get_influencer(&self, id: InfluencerId) -> Result<Influencer, MarketplaceError> {
        dispatch!(self.get_influencer(id))
    }

    async fn list_influencers(
        &self,
        filter: InfluencerFilter,
    ) -> Result<Vec<Influencer>, MarketplaceError> {
        dispatch!(self.list_influencers(filter))
    }

    async fn insert_campaign(&self, campaign: Campaign) -> Result<Campaign, MarketplaceError> {
        dispatch!(self.insert_campaign(campaign))
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, MarketplaceError> {
        dispatch!(self.get_campaign(id))
    }

    async fn list_campaigns(&self, filter: CampaignFilter) -> Result<Vec<Campaign>, MarketplaceError> {
        dispatch!(self.list_campaigns(filter))
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        draft: CampaignDraft,
    ) -> Result<Campaign, MarketplaceError> {
        dispatch!(self.update_campaign(id, draft))
    }

    async fn delete_campaign(&self, id: CampaignId) -> Result<u64, MarketplaceError> {
        dispatch!(self.delete_campaign(id))
    }

    async fn insert_ad_request(&self, request: AdRequest) -> Result<AdRequest, MarketplaceError> {
        dispatch!(self.insert_ad_request(request))
    }

    async fn get_ad_request(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        dispatch!(self.get_ad_request(id))
    }

    async fn list_ad_requests(
        &self,
        filter: AdRequestFilter,
    ) -> Result<Vec<AdRequest>, MarketplaceError> {
        dispatch!(self.list_ad_requests(filter))
    }

    async fn transition_ad_request(
        &self,
        id: AdRequestId,
        actor: PartyRole,
        transition: Transition,
    ) -> Result<AdRequest, MarketplaceError> {
        dispatch!(self.transition_ad_request(id, actor, transition))
    }

    async fn delete_ad_request(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        dispatch!(self.delete_ad_request(id))
    }
}
