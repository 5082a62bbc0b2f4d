//! Read-only aggregates over campaigns and ad requests.
//!
//! Earnings only count requests in the `accepted` status: a completed
//! deal is reported under its own counter, not as earnings.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    AdRequest, AdRequestId, CampaignId, InfluencerId, RequestStatus, SponsorId,
};
use crate::error::MarketplaceError;
use crate::persistence::{AdRequestFilter, CampaignFilter, InfluencerFilter, MarketplaceStore, Store};

/// Ad request totals per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    /// Total across all statuses.
    pub total: u64,
    /// Awaiting a response.
    pub pending: u64,
    /// Agreed deals.
    pub accepted: u64,
    /// Declined offers.
    pub rejected: u64,
    /// Closed deals.
    pub completed: u64,
}

impl StatusCounts {
    fn tally<'a>(requests: impl IntoIterator<Item = &'a AdRequest>) -> Self {
        let mut counts = Self::default();
        for r in requests {
            counts.total += 1;
            match r.status() {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Accepted => counts.accepted += 1,
                RequestStatus::Rejected => counts.rejected += 1,
                RequestStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }
}

/// Payment of one accepted ad request.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RequestEarning {
    /// Ad request.
    #[schema(value_type = uuid::Uuid)]
    pub ad_request_id: AdRequestId,
    /// Ad name.
    pub ad_name: String,
    /// Committed payment.
    pub payment: f64,
}

/// Budget of one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CampaignBudget {
    /// Campaign.
    #[schema(value_type = uuid::Uuid)]
    pub campaign_id: CampaignId,
    /// Title.
    pub title: String,
    /// Budget.
    pub budget: f64,
}

/// Audience size of one influencer.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InfluencerReach {
    /// Influencer.
    #[schema(value_type = uuid::Uuid)]
    pub influencer_id: InfluencerId,
    /// Display name.
    pub name: String,
    /// Followers.
    pub reach: u64,
}

/// Dashboard numbers for one influencer.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InfluencerStats {
    /// Influencer.
    #[schema(value_type = uuid::Uuid)]
    pub influencer_id: InfluencerId,
    /// Requests addressed to the influencer, by status.
    pub ad_requests: StatusCounts,
    /// Sum of payments of accepted requests.
    pub total_earnings: f64,
    /// Accepted requests and their payments.
    pub earnings_by_ad_request: Vec<RequestEarning>,
}

/// Dashboard numbers for one sponsor.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SponsorStats {
    /// Sponsor.
    #[schema(value_type = uuid::Uuid)]
    pub sponsor_id: SponsorId,
    /// Campaigns owned.
    pub total_campaigns: u64,
    /// Distinct influencers engaged through any request.
    pub total_influencers: u64,
    /// Requests across all campaigns, by status.
    pub ad_requests: StatusCounts,
    /// Budget per campaign.
    pub budget_by_campaign: Vec<CampaignBudget>,
    /// Reach of every engaged influencer.
    pub influencer_reach: Vec<InfluencerReach>,
}

/// Platform-wide numbers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlatformStats {
    /// Registered sponsors.
    pub total_sponsors: u64,
    /// Registered influencers.
    pub total_influencers: u64,
    /// Public campaigns.
    pub public_campaigns: u64,
    /// Private campaigns.
    pub private_campaigns: u64,
    /// All requests by status.
    pub ad_requests: StatusCounts,
    /// Budget per campaign.
    pub budget_by_campaign: Vec<CampaignBudget>,
    /// Reach of every influencer.
    pub influencer_reach: Vec<InfluencerReach>,
}

/// Read-only reporting.
#[derive(Debug)]
pub struct ReportService<S = Store> {
    store: Arc<S>,
}

impl<S> Clone for ReportService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MarketplaceStore> ReportService<S> {
    /// Creates a new `ReportService`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Statistics for one influencer.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] for an unknown influencer.
    pub async fn influencer_stats(&self, id: InfluencerId) -> Result<InfluencerStats, MarketplaceError> {
        self.store.get_influencer(id).await?;
        let requests = self
            .store
            .list_ad_requests(AdRequestFilter {
                influencer_id: Some(id),
                ..AdRequestFilter::default()
            })
            .await?;

        let earnings_by_ad_request: Vec<RequestEarning> = requests
            .iter()
            .filter(|r| r.status() == RequestStatus::Accepted)
            .map(|r| RequestEarning {
                ad_request_id: r.id(),
                ad_name: r.ad_name().to_string(),
                payment: r.payment().get(),
            })
            .collect();

        Ok(InfluencerStats {
            influencer_id: id,
            ad_requests: StatusCounts::tally(&requests),
            total_earnings: earnings_by_ad_request.iter().map(|e| e.payment).sum(),
            earnings_by_ad_request,
        })
    }

    /// Statistics for one sponsor.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] for an unknown sponsor.
    pub async fn sponsor_stats(&self, id: SponsorId) -> Result<SponsorStats, MarketplaceError> {
        self.store.get_sponsor(id).await?;
        let campaigns = self
            .store
            .list_campaigns(CampaignFilter {
                sponsor_id: Some(id),
                ..CampaignFilter::default()
            })
            .await?;
        let requests = self
            .store
            .list_ad_requests(AdRequestFilter {
                sponsor_id: Some(id),
                ..AdRequestFilter::default()
            })
            .await?;

        let engaged: BTreeSet<InfluencerId> =
            requests.iter().filter_map(AdRequest::influencer_id).collect();
        let influencer_reach = self.reach_of(Some(&engaged)).await?;

        Ok(SponsorStats {
            sponsor_id: id,
            total_campaigns: campaigns.len() as u64,
            total_influencers: engaged.len() as u64,
            ad_requests: StatusCounts::tally(&requests),
            budget_by_campaign: campaigns
                .iter()
                .map(|c| CampaignBudget {
                    campaign_id: c.id(),
                    title: c.title().to_string(),
                    budget: c.budget().get(),
                })
                .collect(),
            influencer_reach,
        })
    }

    /// Platform-wide statistics.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] on store failure.
    pub async fn platform_stats(&self) -> Result<PlatformStats, MarketplaceError> {
        let sponsors = self.store.list_sponsors().await?;
        let campaigns = self.store.list_campaigns(CampaignFilter::default()).await?;
        let requests = self.store.list_ad_requests(AdRequestFilter::default()).await?;
        let influencer_reach = self.reach_of(None).await?;

        let public_campaigns = campaigns.iter().filter(|c| c.is_public()).count() as u64;
        Ok(PlatformStats {
            total_sponsors: sponsors.len() as u64,
            total_influencers: influencer_reach.len() as u64,
            public_campaigns,
            private_campaigns: campaigns.len() as u64 - public_campaigns,
            ad_requests: StatusCounts::tally(&requests),
            budget_by_campaign: campaigns
                .iter()
                .map(|c| CampaignBudget {
                    campaign_id: c.id(),
                    title: c.title().to_string(),
                    budget: c.budget().get(),
                })
                .collect(),
            influencer_reach,
        })
    }

    /// Reach of the given influencers, or of everyone for `None`.
    async fn reach_of(
        &self,
        only: Option<&BTreeSet<InfluencerId>>,
    ) -> Result<Vec<InfluencerReach>, MarketplaceError> {
        let by_id: BTreeMap<InfluencerId, InfluencerReach> = self
            .store
            .list_influencers(InfluencerFilter::default())
            .await?
            .into_iter()
            .filter(|i| only.is_none_or(|set| set.contains(&i.id)))
            .map(|i| {
                (
                    i.id,
                    InfluencerReach {
                        influencer_id: i.id,
                        name: i.name,
                        reach: i.reach,
                    },
                )
            })
            .collect();
        let mut out: Vec<InfluencerReach> = by_id.into_values().collect();
        out.sort_by(|a, b| b.reach.cmp(&a.reach).then_with(|| a.name.cmp(&b.name)));
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    use super::*;
    use crate::domain::{
        AdRequestDraft, Campaign, CampaignDraft, Influencer, InfluencerDraft, PartyRole, Sponsor,
        Transition,
    };
    use crate::persistence::MemoryStore;

    async fn influencer(store: &MemoryStore, name: &str, reach: &str) -> Influencer {
        let Ok(i) = Influencer::register(&InfluencerDraft {
            name: name.to_string(),
            category: "gaming".to_string(),
            niche: "fps".to_string(),
            reach: reach.to_string(),
            social_networks: vec!["twitch".to_string()],
        }) else {
            panic!("valid influencer");
        };
        assert_ok!(store.insert_influencer(i).await)
    }

    async fn campaign(store: &MemoryStore, sponsor: SponsorId, title: &str, budget: f64) -> Campaign {
        let Ok(c) = Campaign::create(
            sponsor,
            &CampaignDraft {
                title: title.to_string(),
                description: "d".to_string(),
                image: None,
                niche: "gaming".to_string(),
                budget,
                is_public: true,
                start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
                end_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap_or_default(),
            },
        ) else {
            panic!("valid campaign");
        };
        assert_ok!(store.insert_campaign(c).await)
    }

    async fn request(store: &MemoryStore, c: &Campaign, i: &Influencer) -> AdRequest {
        let r = AdRequest::open(c, Some(i.id), PartyRole::Influencer, AdRequestDraft::from_campaign(c));
        assert_ok!(store.insert_ad_request(r).await)
    }

    #[tokio::test]
    async fn earnings_sum_accepted_payments_only() {
        let store = Arc::new(MemoryStore::new());
        let Ok(sponsor) = Sponsor::register("Arena", "esports") else {
            panic!("valid sponsor");
        };
        let sponsor = assert_ok!(store.insert_sponsor(sponsor).await);
        let kai = influencer(&store, "Kai", "1.2M").await;
        let lea = influencer(&store, "Lea", "300K").await;

        let a = campaign(&store, sponsor.id, "Launch", 500.0).await;
        let b = campaign(&store, sponsor.id, "Finals", 800.0).await;
        let c = campaign(&store, sponsor.id, "Skins", 50.0).await;

        let ra = request(&store, &a, &kai).await;
        let rb = request(&store, &b, &kai).await;
        let rc = request(&store, &c, &kai).await;
        request(&store, &a, &lea).await;

        assert_ok!(store.transition_ad_request(ra.id(), PartyRole::Sponsor, Transition::Accept).await);
        assert_ok!(store.transition_ad_request(rb.id(), PartyRole::Sponsor, Transition::Accept).await);
        assert_ok!(store.transition_ad_request(rc.id(), PartyRole::Sponsor, Transition::Accept).await);
        assert_ok!(store.transition_ad_request(rc.id(), PartyRole::Sponsor, Transition::Complete).await);

        let reports = ReportService::new(Arc::clone(&store));
        let stats = assert_ok!(reports.influencer_stats(kai.id).await);
        assert_eq!(stats.ad_requests.total, 3);
        assert_eq!(stats.ad_requests.accepted, 2);
        assert_eq!(stats.ad_requests.completed, 1);
        assert_eq!(stats.total_earnings, 1300.0);
        assert_eq!(stats.earnings_by_ad_request.len(), 2);

        let sponsor_stats = assert_ok!(reports.sponsor_stats(sponsor.id).await);
        assert_eq!(sponsor_stats.total_campaigns, 3);
        assert_eq!(sponsor_stats.total_influencers, 2);
        assert_eq!(sponsor_stats.ad_requests.total, 4);
        assert_eq!(sponsor_stats.ad_requests.pending, 1);
        assert_eq!(
            sponsor_stats
                .influencer_reach
                .iter()
                .map(|r| r.reach)
                .collect::<Vec<_>>(),
            vec![1_200_000, 300_000]
        );

        let platform = assert_ok!(reports.platform_stats().await);
        assert_eq!(platform.total_sponsors, 1);
        assert_eq!(platform.total_influencers, 2);
        assert_eq!(platform.public_campaigns, 3);
        assert_eq!(platform.private_campaigns, 0);
    }

    #[tokio::test]
    async fn unknown_parties_are_not_found() {
        let reports = ReportService::new(Arc::new(MemoryStore::new()));
        assert!(reports.influencer_stats(InfluencerId::new()).await.is_err());
        assert!(reports.sponsor_stats(SponsorId::new()).await.is_err());
    }
}
