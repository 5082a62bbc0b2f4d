//! Service layer: business logic orchestration.
//!
//! Services are generic over the [`crate::persistence::MarketplaceStore`]
//! they run against and default to the runtime-selected
//! [`crate::persistence::Store`]. Mutating services emit events through
//! the [`crate::domain::EventBus`] after the store commits.

pub mod ad_request_service;
pub mod campaign_service;
pub mod directory_service;
pub mod report_service;

pub use ad_request_service::{AdRequestService, CreateOutcome, NewAdRequest};
pub use campaign_service::CampaignService;
pub use directory_service::DirectoryService;
pub use report_service::ReportService;
