//! Ad request service: the lifecycle engine's orchestration layer.
//!
//! Each operation resolves its inputs, hands the state change to the
//! store as one atomic unit, then publishes a [`MarketEvent`] and logs.
//! Events are only published after the store has committed.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    AdRequest, AdRequestDraft, AdRequestId, CampaignId, Counteroffer, EventBus, InfluencerId,
    MarketEvent, PartyRole, Transition,
};
use crate::error::MarketplaceError;
use crate::persistence::{AdRequestFilter, MarketplaceStore, Store};

/// Input for [`AdRequestService::create_ad_request`].
#[derive(Debug, Clone)]
pub struct NewAdRequest {
    /// Party opening the request.
    pub initiator: PartyRole,
    /// Target influencer. Required when an influencer initiates.
    pub influencer_id: Option<InfluencerId>,
    /// Bespoke content. `None` copies name, description and budget from
    /// the campaign.
    pub offer: Option<AdRequestDraft>,
}

/// Result of [`AdRequestService::create_ad_request`].
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// A new pending request was stored.
    Created(AdRequest),
    /// The pair already has a request. Nothing was written.
    AlreadyRequested {
        /// Campaign of the existing request.
        campaign_id: CampaignId,
        /// Influencer of the existing request.
        influencer_id: InfluencerId,
    },
}

/// Orchestration for ad request creation and lifecycle transitions.
#[derive(Debug)]
pub struct AdRequestService<S = Store> {
    store: Arc<S>,
    event_bus: EventBus,
}

impl<S> Clone for AdRequestService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            event_bus: self.event_bus.clone(),
        }
    }
}

impl<S: MarketplaceStore> AdRequestService<S> {
    /// Creates a new `AdRequestService`.
    #[must_use]
    pub fn new(store: Arc<S>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Opens a pending ad request on `campaign_id`.
    ///
    /// Influencer-initiated requests need a public campaign and an
    /// influencer id. A second request for the same (campaign, influencer)
    /// pair is reported as [`CreateOutcome::AlreadyRequested`].
    ///
    /// # Errors
    ///
    /// - [`MarketplaceError::NotFound`] for an unknown campaign or influencer.
    /// - [`MarketplaceError::CampaignNotPublic`] if an influencer targets a
    ///   private campaign.
    /// - [`MarketplaceError::InvalidRequest`] if an influencer-initiated
    ///   request names no influencer.
    pub async fn create_ad_request(
        &self,
        campaign_id: CampaignId,
        input: NewAdRequest,
    ) -> Result<CreateOutcome, MarketplaceError> {
        let campaign = self.store.get_campaign(campaign_id).await?;

        if input.initiator == PartyRole::Influencer {
            if input.influencer_id.is_none() {
                return Err(MarketplaceError::InvalidRequest(
                    "influencer_id is required when an influencer opens a request".to_string(),
                ));
            }
            if !campaign.is_public() {
                tracing::warn!(%campaign_id, "influencer request on private campaign refused");
                return Err(MarketplaceError::CampaignNotPublic(campaign_id));
            }
        }
        if let Some(influencer_id) = input.influencer_id {
            self.store.get_influencer(influencer_id).await?;
        }

        let draft = input
            .offer
            .unwrap_or_else(|| AdRequestDraft::from_campaign(&campaign));
        let request = AdRequest::open(&campaign, input.influencer_id, input.initiator, draft);

        let request = match self.store.insert_ad_request(request).await {
            Ok(request) => request,
            Err(MarketplaceError::DuplicateRequest {
                campaign_id,
                influencer_id,
            }) => {
                tracing::info!(%campaign_id, %influencer_id, "ad request already exists");
                return Ok(CreateOutcome::AlreadyRequested {
                    campaign_id,
                    influencer_id,
                });
            }
            Err(e) => return Err(e),
        };

        let _ = self.event_bus.publish(MarketEvent::AdRequestCreated {
            ad_request_id: request.id(),
            campaign_id,
            influencer_id: request.influencer_id(),
            created_by: request.created_by(),
            payment: request.payment().get(),
            timestamp: Utc::now(),
        });
        tracing::info!(
            ad_request_id = %request.id(),
            %campaign_id,
            initiator = %request.created_by(),
            payment = %request.payment(),
            "ad request created"
        );
        Ok(CreateOutcome::Created(request))
    }

    /// Accepts a pending request.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::InvalidTransition`] unless the status is pending.
    pub async fn accept(&self, id: AdRequestId, actor: PartyRole) -> Result<AdRequest, MarketplaceError> {
        self.transition(id, actor, Transition::Accept).await
    }

    /// Rejects a pending request. Terminal.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::InvalidTransition`] unless the status is pending.
    pub async fn reject(&self, id: AdRequestId, actor: PartyRole) -> Result<AdRequest, MarketplaceError> {
        self.transition(id, actor, Transition::Reject).await
    }

    /// Stages a counter-offer, replacing any outstanding one.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::Validation`] for blank terms or a bad payment;
    /// [`MarketplaceError::InvalidTransition`] on a terminal request.
    pub async fn propose_modification(
        &self,
        id: AdRequestId,
        actor: PartyRole,
        terms: &str,
        payment: f64,
    ) -> Result<AdRequest, MarketplaceError> {
        let offer = Counteroffer::new(terms, payment)?;
        self.transition(id, actor, Transition::ProposeModification(offer))
            .await
    }

    /// Commits the staged counter-offer. Must come from the counterparty.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::InvalidTransition`] if nothing is staged, the
    /// proposer answers its own offer, or the request is terminal.
    pub async fn approve_modification(
        &self,
        id: AdRequestId,
        actor: PartyRole,
    ) -> Result<AdRequest, MarketplaceError> {
        self.transition(id, actor, Transition::ApproveModification)
            .await
    }

    /// Discards the staged counter-offer. Must come from the counterparty.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::InvalidTransition`] if nothing is staged or the
    /// proposer answers its own offer.
    pub async fn reject_modification(
        &self,
        id: AdRequestId,
        actor: PartyRole,
    ) -> Result<AdRequest, MarketplaceError> {
        self.transition(id, actor, Transition::RejectModification)
            .await
    }

    /// Closes an accepted deal. Sponsor only.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::InvalidTransition`] unless the status is
    /// accepted and the actor is the sponsor.
    pub async fn complete(&self, id: AdRequestId, actor: PartyRole) -> Result<AdRequest, MarketplaceError> {
        self.transition(id, actor, Transition::Complete).await
    }

    async fn transition(
        &self,
        id: AdRequestId,
        actor: PartyRole,
        transition: Transition,
    ) -> Result<AdRequest, MarketplaceError> {
        let kind = transition.kind();
        match self.store.transition_ad_request(id, actor, transition).await {
            Ok(request) => {
                let _ = self
                    .event_bus
                    .publish(MarketEvent::transitioned(&request, kind, actor));
                tracing::info!(
                    ad_request_id = %id,
                    transition = %kind,
                    %actor,
                    status = %request.status(),
                    negotiation_status = %request.negotiation_status(),
                    "ad request transitioned"
                );
                Ok(request)
            }
            Err(e @ MarketplaceError::InvalidTransition(_)) => {
                tracing::warn!(ad_request_id = %id, transition = %kind, %actor, error = %e, "transition refused");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a request in any status and returns it.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] if the request does not exist.
    pub async fn delete(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        let removed = self.store.delete_ad_request(id).await?;
        let _ = self.event_bus.publish(MarketEvent::AdRequestDeleted {
            ad_request_id: id,
            campaign_id: removed.campaign_id(),
            timestamp: Utc::now(),
        });
        tracing::info!(ad_request_id = %id, campaign_id = %removed.campaign_id(), "ad request deleted");
        Ok(removed)
    }

    /// Loads one request.
    ///
    /// # Errors
    ///
    /// [`MarketplaceError::NotFound`] if the request does not exist.
    pub async fn get(&self, id: AdRequestId) -> Result<AdRequest, MarketplaceError> {
        self.store.get_ad_request(id).await
    }

    /// Lists requests matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Persistence`] on store failure.
    pub async fn list(&self, filter: AdRequestFilter) -> Result<Vec<AdRequest>, MarketplaceError> {
        self.store.list_ad_requests(filter).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    use super::*;
    use crate::domain::{
        Campaign, CampaignDraft, Influencer, InfluencerDraft, NegotiationStatus, RequestStatus,
        Sponsor, TransitionError,
    };
    use crate::persistence::MemoryStore;

    struct Fixture {
        service: AdRequestService<MemoryStore>,
        bus: EventBus,
        campaign: Campaign,
        influencer: Influencer,
        store: Arc<MemoryStore>,
    }

    async fn fixture(is_public: bool) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let Ok(sponsor) = Sponsor::register("Acme", "retail") else {
            panic!("valid sponsor");
        };
        let sponsor = assert_ok!(store.insert_sponsor(sponsor).await);
        let draft = CampaignDraft {
            title: "Spring Sale".to_string(),
            description: "Everything 20% off".to_string(),
            image: None,
            niche: "retail".to_string(),
            budget: 500.0,
            is_public,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap_or_default(),
        };
        let Ok(campaign) = Campaign::create(sponsor.id, &draft) else {
            panic!("valid campaign");
        };
        let campaign = assert_ok!(store.insert_campaign(campaign).await);
        let Ok(influencer) = Influencer::register(&InfluencerDraft {
            name: "Ivy".to_string(),
            category: "fashion".to_string(),
            niche: "streetwear".to_string(),
            reach: "45K".to_string(),
            social_networks: vec!["instagram".to_string()],
        }) else {
            panic!("valid influencer");
        };
        let influencer = assert_ok!(store.insert_influencer(influencer).await);
        let bus = EventBus::new(64);
        Fixture {
            service: AdRequestService::new(Arc::clone(&store), bus.clone()),
            bus,
            campaign,
            influencer,
            store,
        }
    }

    fn influencer_request(f: &Fixture) -> NewAdRequest {
        NewAdRequest {
            initiator: PartyRole::Influencer,
            influencer_id: Some(f.influencer.id),
            offer: None,
        }
    }

    async fn created(f: &Fixture, input: NewAdRequest) -> AdRequest {
        match assert_ok!(f.service.create_ad_request(f.campaign.id(), input).await) {
            CreateOutcome::Created(req) => req,
            CreateOutcome::AlreadyRequested { .. } => panic!("expected a new request"),
        }
    }

    #[tokio::test]
    async fn duplicate_request_is_benign() {
        let f = fixture(true).await;
        let req = created(&f, influencer_request(&f)).await;
        assert_eq!(req.status(), RequestStatus::Pending);
        assert_eq!(req.payment().get(), 500.0);
        assert_eq!(req.influencer_id(), Some(f.influencer.id));

        let second = assert_ok!(
            f.service
                .create_ad_request(f.campaign.id(), influencer_request(&f))
                .await
        );
        assert_eq!(
            second,
            CreateOutcome::AlreadyRequested {
                campaign_id: f.campaign.id(),
                influencer_id: f.influencer.id,
            }
        );
        let all = assert_ok!(f.service.list(AdRequestFilter::default()).await);
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn private_campaign_refuses_influencers() {
        let f = fixture(false).await;
        let result = f
            .service
            .create_ad_request(f.campaign.id(), influencer_request(&f))
            .await;
        assert!(matches!(result, Err(MarketplaceError::CampaignNotPublic(_))));

        // The owner can still invite the same influencer.
        let invite = NewAdRequest {
            initiator: PartyRole::Sponsor,
            ..influencer_request(&f)
        };
        let req = created(&f, invite).await;
        assert_eq!(req.created_by(), PartyRole::Sponsor);
    }

    #[tokio::test]
    async fn influencer_request_needs_influencer_id() {
        let f = fixture(true).await;
        let input = NewAdRequest {
            influencer_id: None,
            ..influencer_request(&f)
        };
        assert!(matches!(
            f.service.create_ad_request(f.campaign.id(), input).await,
            Err(MarketplaceError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn unknown_campaign_and_influencer_are_not_found() {
        let f = fixture(true).await;
        assert!(matches!(
            f.service
                .create_ad_request(CampaignId::new(), influencer_request(&f))
                .await,
            Err(MarketplaceError::NotFound { entity: "campaign", .. })
        ));
        let input = NewAdRequest {
            influencer_id: Some(InfluencerId::new()),
            ..influencer_request(&f)
        };
        assert!(matches!(
            f.service.create_ad_request(f.campaign.id(), input).await,
            Err(MarketplaceError::NotFound { entity: "influencer", .. })
        ));
    }

    #[tokio::test]
    async fn bespoke_offer_overrides_campaign_defaults() {
        let f = fixture(true).await;
        let Ok(offer) = AdRequestDraft::new("Unboxing", "One video", Some("net-15"), 120.0) else {
            panic!("valid draft");
        };
        let req = created(
            &f,
            NewAdRequest {
                initiator: PartyRole::Sponsor,
                influencer_id: None,
                offer: Some(offer),
            },
        )
        .await;
        assert_eq!(req.ad_name(), "Unboxing");
        assert_eq!(req.terms(), Some("net-15"));
        assert_eq!(req.payment().get(), 120.0);
        assert_eq!(req.influencer_id(), None);
    }

    #[tokio::test]
    async fn open_offer_cannot_be_accepted() {
        let f = fixture(true).await;
        let req = created(
            &f,
            NewAdRequest {
                initiator: PartyRole::Sponsor,
                influencer_id: None,
                offer: None,
            },
        )
        .await;
        assert!(matches!(
            f.service.accept(req.id(), PartyRole::Sponsor).await,
            Err(MarketplaceError::InvalidTransition(TransitionError::NotAddressed { .. }))
        ));
        let stored = assert_ok!(f.service.get(req.id()).await);
        assert_eq!(stored.status(), RequestStatus::Pending);
        assert_eq!(stored.influencer_id(), None);
    }

    #[tokio::test]
    async fn negotiation_round_trip_publishes_events() {
        let f = fixture(true).await;
        let mut rx = f.bus.subscribe();
        let req = created(&f, influencer_request(&f)).await;

        assert_ok!(f.service.accept(req.id(), PartyRole::Sponsor).await);
        assert_ok!(
            f.service
                .propose_modification(req.id(), PartyRole::Sponsor, "net-30", 600.0)
                .await
        );
        let done = assert_ok!(
            f.service
                .approve_modification(req.id(), PartyRole::Influencer)
                .await
        );
        assert_eq!(done.payment().get(), 600.0);
        assert_eq!(done.terms(), Some("net-30"));
        assert_eq!(done.negotiation_status(), NegotiationStatus::Approved);

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.event_type_str());
        }
        assert_eq!(
            kinds,
            vec![
                "ad_request_created",
                "ad_request_transitioned",
                "ad_request_transitioned",
                "ad_request_transitioned",
            ]
        );
    }

    #[tokio::test]
    async fn refused_transition_publishes_nothing() {
        let f = fixture(true).await;
        let req = created(&f, influencer_request(&f)).await;
        assert_ok!(f.service.reject(req.id(), PartyRole::Sponsor).await);

        let mut rx = f.bus.subscribe();
        assert!(matches!(
            f.service.accept(req.id(), PartyRole::Sponsor).await,
            Err(MarketplaceError::InvalidTransition(_))
        ));
        assert!(rx.try_recv().is_err());
        let stored = assert_ok!(f.store.get_ad_request(req.id()).await);
        assert_eq!(stored.status(), RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn invalid_counteroffer_is_a_validation_error() {
        let f = fixture(true).await;
        let req = created(&f, influencer_request(&f)).await;
        assert!(matches!(
            f.service
                .propose_modification(req.id(), PartyRole::Sponsor, "ok", -5.0)
                .await,
            Err(MarketplaceError::Validation(_))
        ));
        assert!(matches!(
            f.service
                .propose_modification(req.id(), PartyRole::Sponsor, " ", 5.0)
                .await,
            Err(MarketplaceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn delete_reports_campaign() {
        let f = fixture(true).await;
        let req = created(&f, influencer_request(&f)).await;
        let mut rx = f.bus.subscribe();
        let removed = assert_ok!(f.service.delete(req.id()).await);
        assert_eq!(removed.campaign_id(), f.campaign.id());
        let Ok(event) = rx.try_recv() else {
            panic!("expected delete event");
        };
        assert_eq!(event.campaign_id(), f.campaign.id());
        assert!(matches!(
            f.service.get(req.id()).await,
            Err(MarketplaceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn complete_closes_accepted_deal() {
        let f = fixture(true).await;
        let req = created(&f, influencer_request(&f)).await;
        assert_ok!(f.service.accept(req.id(), PartyRole::Sponsor).await);
        assert!(f.service.complete(req.id(), PartyRole::Influencer).await.is_err());
        let done = assert_ok!(f.service.complete(req.id(), PartyRole::Sponsor).await);
        assert_eq!(done.status(), RequestStatus::Completed);
    }
}
