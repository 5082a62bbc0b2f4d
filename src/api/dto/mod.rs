//! Data Transfer Objects for REST request/response serialization.
//!
//! Identifiers cross the wire as bare UUID strings and amounts as JSON
//! numbers. Lifecycle enums use their `snake_case` names.

pub mod ad_request_dto;
pub mod campaign_dto;
pub mod common_dto;
pub mod party_dto;

pub use ad_request_dto::*;
pub use campaign_dto::*;
pub use common_dto::*;
pub use party_dto::*;
