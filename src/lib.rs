//! # influence-marketplace
//!
//! REST and WebSocket backend for a sponsor/influencer advertising
//! marketplace.
//!
//! Sponsors publish campaigns. Either side opens an ad request on a
//! campaign, and the two parties then move it through a small state
//! machine: accept or reject, counter-offer with new terms and payment,
//! approve or reject the counter-offer, and finally complete the deal.
//! Every committed change is broadcast to WebSocket subscribers of the
//! campaign.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── AdRequestService · CampaignService · DirectoryService · ReportService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── AdRequest state machine, Campaign, parties (domain/)
//!     │
//!     └── MarketplaceStore (persistence/): in-memory or PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
