//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::Store;
use crate::service::{AdRequestService, CampaignService, DirectoryService, ReportService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ad request creation and lifecycle.
    pub ad_requests: AdRequestService,
    /// Campaign CRUD.
    pub campaigns: CampaignService,
    /// Sponsor and influencer registration.
    pub directory: DirectoryService,
    /// Dashboard statistics.
    pub reports: ReportService,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Storage backend name reported by `/health`.
    pub storage: &'static str,
}

impl AppState {
    /// Wires every service onto one shared store and event bus.
    #[must_use]
    pub fn new(store: Store, event_bus: EventBus) -> Self {
        let storage = store.backend_name();
        let store = Arc::new(store);
        Self {
            ad_requests: AdRequestService::new(Arc::clone(&store), event_bus.clone()),
            campaigns: CampaignService::new(Arc::clone(&store), event_bus.clone()),
            directory: DirectoryService::new(Arc::clone(&store)),
            reports: ReportService::new(store),
            event_bus,
            storage,
        }
    }
}
