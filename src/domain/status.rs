//! Closed enumerations for roles and the two lifecycle axes.
//!
//! All three are stored as text columns; [`std::str::FromStr`] is the
//! only way back from a string and rejects anything outside the set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ValidationError;

/// The marketplace party performing an action or owning a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    /// The advertiser that owns the campaign.
    Sponsor,
    /// The content creator engaged by the campaign.
    Influencer,
}

impl PartyRole {
    /// Returns the storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sponsor => "sponsor",
            Self::Influencer => "influencer",
        }
    }
}

/// Outcome axis of an ad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Offer is open and awaiting a decision.
    Pending,
    /// Deal is active.
    Accepted,
    /// Offer was declined. Terminal.
    Rejected,
    /// Deal was fulfilled. Terminal.
    Completed,
}

impl RequestStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Completed,
    ];

    /// `true` for statuses with no outgoing transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// `true` while the terms of the deal may still be renegotiated.
    #[must_use]
    pub const fn is_negotiable(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Returns the storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

/// Negotiation axis of an ad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    /// No counter-offer has been made, or the last one was resolved long ago.
    NoNegotiation,
    /// A counter-offer is staged and awaits the counterparty.
    Pending,
    /// The last counter-offer was committed.
    Approved,
    /// The last counter-offer was discarded.
    Rejected,
}

impl NegotiationStatus {
    /// All negotiation statuses.
    pub const ALL: [Self; 4] = [
        Self::NoNegotiation,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
    ];

    /// Returns the storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoNegotiation => "no_negotiation",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

macro_rules! text_enum {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ValidationError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

text_enum!(PartyRole, "role", [PartyRole::Sponsor, PartyRole::Influencer]);
text_enum!(
    RequestStatus,
    "status",
    [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
        RequestStatus::Completed,
    ]
);
text_enum!(
    NegotiationStatus,
    "negotiation status",
    [
        NegotiationStatus::NoNegotiation,
        NegotiationStatus::Pending,
        NegotiationStatus::Approved,
        NegotiationStatus::Rejected,
    ]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_text() {
        for s in RequestStatus::ALL {
            assert_eq!(s.as_str().parse::<RequestStatus>(), Ok(s));
        }
        for s in NegotiationStatus::ALL {
            assert_eq!(s.as_str().parse::<NegotiationStatus>(), Ok(s));
        }
        assert_eq!("sponsor".parse::<PartyRole>(), Ok(PartyRole::Sponsor));
    }

    #[test]
    fn rejects_values_outside_the_set() {
        assert_eq!(
            "no negotiation".parse::<NegotiationStatus>(),
            Err(ValidationError::UnknownValue {
                kind: "negotiation status",
                value: "no negotiation".to_string(),
            })
        );
        assert!("admin".parse::<PartyRole>().is_err());
        assert!("Accepted".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn terminal_statuses() {
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Completed.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_negotiable());
        assert!(!RequestStatus::Completed.is_negotiable());
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&NegotiationStatus::NoNegotiation).ok(),
            Some("\"no_negotiation\"".to_string())
        );
        assert_eq!(
            serde_json::from_str::<PartyRole>("\"influencer\"").ok(),
            Some(PartyRole::Influencer)
        );
    }
}
