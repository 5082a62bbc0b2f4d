//! WebSocket layer: connection handling, commands, subscriptions.
//!
//! The endpoint at `/ws` streams [`crate::domain::MarketEvent`]s for the
//! campaigns a client subscribes to.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
