//! In-process store backed by hash maps behind one async `RwLock`.
//!
//! Every operation takes the lock once, so the existence checks, the
//! duplicate guard and the write of each call happen atomically with
//! respect to every other call.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{AdRequestFilter, CampaignFilter, InfluencerFilter, MarketplaceStore};
use crate::domain::{
    AdRequest, AdRequestId, Campaign, CampaignDraft, CampaignId, Influencer, InfluencerId,
    PartyRole, Sponsor, SponsorId, Transition,
};
use crate::error::MarketplaceError;

#[derive(Debug, Default)]
struct Tables {
    sponsors: HashMap<SponsorId, Sponsor>,
    influencers: HashMap<InfluencerId, Influencer>,
    campaigns: HashMap<CampaignId, Campaign>,
    ad_requests: HashMap<AdRequestId, AdRequest>,
    // unique (campaign_id, influencer_id)
    engagements: HashMap<(CampaignId, InfluencerId), AdRequestId>,
}

/// Shared in-memory store. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, uuid::Uuid)) {
    items.sort_by(|a, b| {
        let (ta, ia) = key(a);
        let (tb, ib) = key(b);
        tb.cmp(&ta).then(ia.cmp(&ib))
    });
}

impl MarketplaceStore for MemoryStore {
    async fn insert_sponsor(&self, sponsor: Sponsor) -> Result<Sponsor, MarketplaceError> {
        let mut tables = self.tables.write().await;
        tables.sponsors.insert(sponsor.id, sponsor.clone());
        Ok(sponsor)
    }

    async fn get_sponsor(&self, id: SponsorId) -> Result<Sponsor, MarketplaceError> {
        let tables = self.tables.read().await;
        tables
            .sponsors
            .get(&id)
            .cloned()
            .ok_or_else(|| MarketplaceError::not_found("sponsor", id))
    }

    async fn list_sponsors(&self) -> Result<Vec<Sponsor>, MarketplaceError> {
        let tables = self.tables.read().await;
        let mut out: Vec<Sponsor> = tables.sponsors.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn insert_influencer(&self, influencer: Influencer) -> Result<Influencer, MarketplaceError> {
        let mut tables = self.tables.write().await;
        tables.influencers.insert(influencer.id, influencer.clone());
        Ok(influencer)
    }

    async fn get_influencer(&self, id: InfluencerId) -> Result<Influencer, MarketplaceError> {
        let tables = self.tables.read().await;
        tables
            .influencers
            .get(&id)
            .cloned()
            .ok_or_else(|| MarketplaceError::not_found("influencer", id))
    }

    async fn list_influencers(
        &self,
        filter: InfluencerFilter,
    ) -> Result<Vec<Influencer>, MarketplaceError> {
        let tables = self.tables.read().await;
        let mut out: Vec<Influencer> = tables
            .influencers
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn insert_campaign(&self, campaign: Campaign) -> Result<Campaign, MarketplaceError> {
        let mut tables = self.tables.write().await;
        if !tables.sponsors.contains_key(&campaign.sponsor_id) {
            return Err(MarketplaceError::not_found("sponsor", campaign.sponsor_id));
        }
        tables.campaigns.insert(campaign.id, campaign.clone());
        Ok(campaign)
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, MarketplaceError> {
        let tables = self.tables.read().await;
        tables
            .campaigns
            .get(&id)
            .cloned()
            .ok_or_else(|| MarketplaceError::not_found("campaign", id))
    }

    async fn list_campaigns(&self, filter: CampaignFilter) -> Result<Vec<Campaign>, MarketplaceError> {
        let tables = self.tables.read().await;
        let mut out: Vec<Campaign> = tables
            .campaigns
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        newest_first(&mut out, |c| (c.created_at, c.id.into()));
        Ok(out)
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        draft: CampaignDraft,
    ) -> Result<Campaign, MarketplaceError> {
        let mut tables = self.tables.write().await;
        let campaign = tables
            .campaigns
            .get_mut(&id)
            .ok_or_else(|| MarketplaceError::not_found("campaign", id))?;
        campaign.revise(&draft)?;
        Ok(campaign.clone())
    }

    async fn delete_campaign(&self, id: CampaignId) -> Result<u64, MarketplaceError> {
        let mut tables = self.tables.write().await;
        if tables.campaigns.remove(&id).is_none() {
            return Err(MarketplaceError::not_found("campaign", id));
        }
        let before = tables.ad_requests.len();
        tables.ad_requests.retain(|_, r| r.campaign_id != id);
        tables.engagements.retain(|(campaign_id, _), _| *campaign_id != id);
        Ok((before - tables.ad_requests.len()) as u64)
    }

    async fn insert_ad_request(&self, request: AdRequest) -> Result<AdRequest, MarketplaceError> {
        let mut tables = self.tables.write().await;
        if !tables.campaigns.contains_key(&request.campaign_id) {
            return Err(MarketplaceError::not_found("campaign", request.campaign_id));
        }
        if let Some(influencer_id) = request.influencer_id {
            if !tables.influencers.contains_key(&influencer_id) {
                return Err(MarketplaceError::not_found("influencer", influencer_id));
            }
            let key = (request.campaign_id, influencer_id);
            if tables.engagements.contains_key(&key) {
                return Err(MarketplaceError::DuplicateRequest {
                    campaign_id: request.campaign_id,
                    influencer_id,
                });
            }
            tables.engagements.insert(key, request.id);
        }
        tables.ad_requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get_ad_request(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        let tables = self.tables.read().await;
        tables
            .ad_requests
            .get(&id)
            .cloned()
            .ok_or_else(|| MarketplaceError::not_found("ad request", id))
    }

    async fn list_ad_requests(
        &self,
        filter: AdRequestFilter,
    ) -> Result<Vec<AdRequest>, MarketplaceError> {
        let tables = self.tables.read().await;
        let mut out: Vec<AdRequest> = tables
            .ad_requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        newest_first(&mut out, |r| (r.created_at, r.id.into()));
        Ok(out)
    }

    async fn transition_ad_request(
        &self,
        id: AdRequestId,
        actor: PartyRole,
        transition: Transition,
    ) -> Result<AdRequest, MarketplaceError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .ad_requests
            .get_mut(&id)
            .ok_or_else(|| MarketplaceError::not_found("ad request", id))?;
        let mut next = stored.clone();
        next.apply(actor, transition)?;
        *stored = next.clone();
        Ok(next)
    }

    async fn delete_ad_request(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        let mut tables = self.tables.write().await;
        let removed = tables
            .ad_requests
            .remove(&id)
            .ok_or_else(|| MarketplaceError::not_found("ad request", id))?;
        if let Some(influencer_id) = removed.influencer_id {
            tables.engagements.remove(&(removed.campaign_id, influencer_id));
        }
        Ok(removed)
    }
}
