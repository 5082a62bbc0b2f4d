//! Per-connection subscription manager.
//!
//! Tracks which campaigns a WebSocket client follows and filters events
//! server-side.

use std::collections::HashSet;

use crate::domain::CampaignId;

/// The set of campaign subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Followed campaigns. Ignored while `subscribe_all` is set.
    campaign_ids: HashSet<CampaignId>,
    /// Wildcard `"*"` subscription.
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates an empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds campaigns to the set; `wildcard` follows every campaign.
    pub fn subscribe(&mut self, ids: &[CampaignId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.campaign_ids.extend(ids.iter().copied());
    }

    /// Removes campaigns from the set; `wildcard` drops the `"*"` subscription.
    pub fn unsubscribe(&mut self, ids: &[CampaignId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for id in ids {
            self.campaign_ids.remove(id);
        }
    }

    /// Returns `true` if events of `campaign_id` should be forwarded.
    #[must_use]
    pub fn matches(&self, campaign_id: CampaignId) -> bool {
        self.subscribe_all || self.campaign_ids.contains(&campaign_id)
    }

    /// Number of explicitly followed campaigns.
    #[must_use]
    pub fn count(&self) -> usize {
        self.campaign_ids.len()
    }

    /// Returns `true` while the wildcard subscription is active.
    #[must_use]
    pub const fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(CampaignId::new()));
    }

    #[test]
    fn subscribe_specific_campaign() {
        let mut mgr = SubscriptionManager::new();
        let id = CampaignId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        assert!(!mgr.matches(CampaignId::new()));
    }

    #[test]
    fn wildcard_can_be_dropped() {
        let mut mgr = SubscriptionManager::new();
        let kept = CampaignId::new();
        mgr.subscribe(&[kept], true);
        assert!(mgr.matches(CampaignId::new()));

        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(!mgr.matches(CampaignId::new()));
        assert!(mgr.matches(kept));
    }

    #[test]
    fn unsubscribe_removes_campaign() {
        let mut mgr = SubscriptionManager::new();
        let id = CampaignId::new();
        mgr.subscribe(&[id, CampaignId::new()], false);
        assert_eq!(mgr.count(), 2);
        mgr.unsubscribe(&[id], false);
        assert!(!mgr.matches(id));
        assert_eq!(mgr.count(), 1);
    }
}
