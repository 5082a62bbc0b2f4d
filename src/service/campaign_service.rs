//! Campaign registry: sponsor-owned CRUD with event emission.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Campaign, CampaignDraft, CampaignId, EventBus, MarketEvent, SponsorId};
use crate::error::MarketplaceError;
use crate::persistence::{CampaignFilter, MarketplaceStore, Store};

/// Campaign create/read/update/delete.
#[derive(Debug)]
pub struct CampaignService<S = Store> {
    store: Arc<S>,
    event_bus: EventBus,
}

impl<S> Clone for CampaignService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            event_bus: self.event_bus.clone(),
        }
    }
}

impl<S: MarketplaceStore> CampaignService<S> {
    /// Creates a new `CampaignService`.
    #[must_use]
    pub fn new(store: Arc<S>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Validates `draft` and stores it as a campaign of `sponsor_id`.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::Validation`] for invalid fields,
    /// [`MarketplaceError::NotFound`] for an unknown sponsor.
    pub async fn create(
        &self,
        sponsor_id: SponsorId,
        draft: &CampaignDraft,
    ) -> Result<Campaign, MarketplaceError> {
        let campaign = Campaign::create(sponsor_id, draft)?;
        let campaign = self.store.insert_campaign(campaign).await?;

        let _ = self.event_bus.publish(MarketEvent::CampaignCreated {
            campaign_id: campaign.id(),
            sponsor_id,
            is_public: campaign.is_public(),
            timestamp: Utc::now(),
        });
        tracing::info!(campaign_id = %campaign.id(), %sponsor_id, "campaign created");
        Ok(campaign)
    }

    /// Loads one campaign.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] if it does not exist.
    pub async fn get(&self, id: CampaignId) -> Result<Campaign, MarketplaceError> {
        self.store.get_campaign(id).await
    }

    /// Lists campaigns matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] on store failure.
    pub async fn list(&self, filter: CampaignFilter) -> Result<Vec<Campaign>, MarketplaceError> {
        self.store.list_campaigns(filter).await
    }

    /// Replaces a campaign's editable fields. Existing ad requests keep
    /// the values they were created with.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::Validation`] or [`MarketplaceError::NotFound`].
    pub async fn update(
        &self,
        id: CampaignId,
        draft: CampaignDraft,
    ) -> Result<Campaign, MarketplaceError> {
        let campaign = self.store.update_campaign(id, draft).await?;
        let _ = self.event_bus.publish(MarketEvent::CampaignUpdated {
            campaign_id: id,
            timestamp: Utc::now(),
        });
        tracing::info!(campaign_id = %id, "campaign updated");
        Ok(campaign)
    }

    /// Deletes a campaign and every ad request under it.
    ///
    /// Returns the number of ad requests removed.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] if it does not exist.
    pub async fn delete(&self, id: CampaignId) -> Result<u64, MarketplaceError> {
        let removed = self.store.delete_campaign(id).await?;
        let _ = self.event_bus.publish(MarketEvent::CampaignDeleted {
            campaign_id: id,
            ad_requests_removed: removed,
            timestamp: Utc::now(),
        });
        tracing::info!(campaign_id = %id, ad_requests_removed = removed, "campaign deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    use super::*;
    use crate::domain::Sponsor;
    use crate::persistence::MemoryStore;

    fn draft(title: &str) -> CampaignDraft {
        CampaignDraft {
            title: title.to_string(),
            description: "desc".to_string(),
            image: None,
            niche: "food".to_string(),
            budget: 250.0,
            is_public: true,
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap_or_default(),
        }
    }

    async fn service() -> (CampaignService<MemoryStore>, SponsorId, EventBus) {
        let store = Arc::new(MemoryStore::new());
        let Ok(sponsor) = Sponsor::register("Bistro", "food") else {
            panic!("valid sponsor");
        };
        let sponsor = assert_ok!(store.insert_sponsor(sponsor).await);
        let bus = EventBus::new(16);
        (CampaignService::new(store, bus.clone()), sponsor.id, bus)
    }

    #[tokio::test]
    async fn create_emits_event() {
        let (svc, sponsor, bus) = service().await;
        let mut rx = bus.subscribe();
        let c = assert_ok!(svc.create(sponsor, &draft("Taco Tuesday")).await);
        let Ok(event) = rx.try_recv() else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "campaign_created");
        assert_eq!(event.campaign_id(), c.id());
    }

    #[tokio::test]
    async fn create_for_unknown_sponsor_fails() {
        let (svc, _, _) = service().await;
        assert!(matches!(
            svc.create(SponsorId::new(), &draft("x")).await,
            Err(MarketplaceError::NotFound { entity: "sponsor", .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_by_sponsor() {
        let (svc, sponsor, _) = service().await;
        assert_ok!(svc.create(sponsor, &draft("One")).await);
        assert_ok!(svc.create(sponsor, &draft("Two")).await);
        let mine = assert_ok!(
            svc.list(CampaignFilter {
                sponsor_id: Some(sponsor),
                ..CampaignFilter::default()
            })
            .await
        );
        assert_eq!(mine.len(), 2);
        let other = assert_ok!(
            svc.list(CampaignFilter {
                sponsor_id: Some(SponsorId::new()),
                ..CampaignFilter::default()
            })
            .await
        );
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let (svc, _, _) = service().await;
        assert!(svc.delete(CampaignId::new()).await.is_err());
    }
}
