//! Directory of sponsors and influencers.
//!
//! A thin stand-in for an identity store: enough to register parties,
//! resolve ids and answer "does this exist" for the other services.

use std::sync::Arc;

use crate::domain::{Influencer, InfluencerDraft, InfluencerId, Sponsor, SponsorId};
use crate::error::MarketplaceError;
use crate::persistence::{InfluencerFilter, MarketplaceStore, Store};

/// Registers and looks up marketplace parties.
#[derive(Debug)]
pub struct DirectoryService<S = Store> {
    store: Arc<S>,
}

impl<S> Clone for DirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MarketplaceStore> DirectoryService<S> {
    /// Creates a new `DirectoryService`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a sponsor.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::Validation`] for blank or oversized fields.
    pub async fn register_sponsor(&self, name: &str, industry: &str) -> Result<Sponsor, MarketplaceError> {
        let sponsor = self.store.insert_sponsor(Sponsor::register(name, industry)?).await?;
        tracing::info!(sponsor_id = %sponsor.id, "sponsor registered");
        Ok(sponsor)
    }

    /// Loads a sponsor.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] if it does not exist.
    pub async fn sponsor(&self, id: SponsorId) -> Result<Sponsor, MarketplaceError> {
        self.store.get_sponsor(id).await
    }

    /// Lists sponsors by name.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] on store failure.
    pub async fn sponsors(&self) -> Result<Vec<Sponsor>, MarketplaceError> {
        self.store.list_sponsors().await
    }

    /// Registers an influencer.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::Validation`] for blank fields or an unparsable
    /// reach.
    pub async fn register_influencer(
        &self,
        draft: &InfluencerDraft,
    ) -> Result<Influencer, MarketplaceError> {
        let influencer = self
            .store
            .insert_influencer(Influencer::register(draft)?)
            .await?;
        tracing::info!(influencer_id = %influencer.id, reach = influencer.reach, "influencer registered");
        Ok(influencer)
    }

    /// Loads an influencer.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] if it does not exist.
    pub async fn influencer(&self, id: InfluencerId) -> Result<Influencer, MarketplaceError> {
        self.store.get_influencer(id).await
    }

    /// Lists influencers matching `filter`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] on store failure.
    pub async fn influencers(
        &self,
        filter: InfluencerFilter,
    ) -> Result<Vec<Influencer>, MarketplaceError> {
        self.store.list_influencers(filter).await
    }
}
