//! The ad request aggregate and its two-axis lifecycle state machine.
//!
//! An [`AdRequest`] moves along a *status* axis
//! (`pending → accepted | rejected`, `accepted → completed`) and a
//! *negotiation* axis (`no_negotiation → pending → approved | rejected`).
//! [`AdRequest::apply`] is the only way to mutate either axis; every
//! [`Transition`] is checked against the current state and a failed check
//! leaves the request exactly as it was.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::validation::{optional_text, required_text};
use super::{
    AdRequestId, Campaign, CampaignId, InfluencerId, NegotiationStatus, PartyRole, Payment,
    RequestStatus, SponsorId, ValidationError,
};

/// Maximum length of an ad name.
pub const AD_NAME_MAX: usize = 100;
/// Maximum length of an ad description.
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum length of free-text terms.
pub const TERMS_MAX: usize = 500;

/// A proposed revision of terms and payment awaiting the counterparty.
#[derive(Debug, Clone, PartialEq)]
pub struct Counteroffer {
    terms: String,
    payment: Payment,
}

impl Counteroffer {
    /// Validates a counter-offer.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `terms` is blank or too long, or
    /// `payment` is negative or not finite.
    pub fn new(terms: &str, payment: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            terms: required_text("terms", terms, TERMS_MAX)?,
            payment: Payment::new(payment)?,
        })
    }

    /// Proposed terms.
    #[must_use]
    pub fn terms(&self) -> &str {
        &self.terms
    }

    /// Proposed payment.
    #[must_use]
    pub const fn payment(&self) -> Payment {
        self.payment
    }
}

/// Negotiation state. The staged counter-offer only exists while pending.
#[derive(Debug, Clone, PartialEq)]
pub enum Negotiation {
    /// Nothing has been proposed.
    None,
    /// A counter-offer is waiting for the other party.
    Pending(Counteroffer),
    /// The last counter-offer was committed into the terms.
    Approved,
    /// The last counter-offer was discarded.
    Rejected,
}

impl Negotiation {
    /// Returns the flat status value.
    #[must_use]
    pub const fn status(&self) -> NegotiationStatus {
        match self {
            Self::None => NegotiationStatus::NoNegotiation,
            Self::Pending(_) => NegotiationStatus::Pending,
            Self::Approved => NegotiationStatus::Approved,
            Self::Rejected => NegotiationStatus::Rejected,
        }
    }

    /// Returns the staged counter-offer, if any.
    #[must_use]
    pub const fn staged(&self) -> Option<&Counteroffer> {
        match self {
            Self::Pending(offer) => Some(offer),
            _ => None,
        }
    }

    /// Rebuilds the negotiation state from its flat stored form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::StagedOfferMismatch`] unless the staged
    /// fields are present exactly when `status` is pending.
    pub fn from_parts(
        status: NegotiationStatus,
        modified_terms: Option<String>,
        modified_payment: Option<f64>,
    ) -> Result<Self, ValidationError> {
        match (status, modified_terms, modified_payment) {
            (NegotiationStatus::Pending, Some(terms), Some(payment)) => {
                Ok(Self::Pending(Counteroffer::new(&terms, payment)?))
            }
            (NegotiationStatus::NoNegotiation, None, None) => Ok(Self::None),
            (NegotiationStatus::Approved, None, None) => Ok(Self::Approved),
            (NegotiationStatus::Rejected, None, None) => Ok(Self::Rejected),
            (status, _, _) => Err(ValidationError::StagedOfferMismatch(status.as_str())),
        }
    }
}

/// Name of a lifecycle operation, used in errors, logs and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Accept a pending offer.
    Accept,
    /// Reject a pending offer.
    Reject,
    /// Stage a counter-offer.
    ProposeModification,
    /// Commit the staged counter-offer.
    ApproveModification,
    /// Discard the staged counter-offer.
    RejectModification,
    /// Close an accepted deal.
    Complete,
}

impl TransitionKind {
    /// Returns the snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::ProposeModification => "propose_modification",
            Self::ApproveModification => "approve_modification",
            Self::RejectModification => "reject_modification",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle operation requested by one of the parties.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// `pending → accepted`.
    Accept,
    /// `pending → rejected`.
    Reject,
    /// Stage new terms/payment; allowed while pending or accepted.
    ProposeModification(Counteroffer),
    /// Counterparty commits the staged offer; status becomes accepted.
    ApproveModification,
    /// Counterparty discards the staged offer; status is untouched.
    RejectModification,
    /// Sponsor closes an accepted deal.
    Complete,
}

impl Transition {
    /// Returns the operation name.
    #[must_use]
    pub const fn kind(&self) -> TransitionKind {
        match self {
            Self::Accept => TransitionKind::Accept,
            Self::Reject => TransitionKind::Reject,
            Self::ProposeModification(_) => TransitionKind::ProposeModification,
            Self::ApproveModification => TransitionKind::ApproveModification,
            Self::RejectModification => TransitionKind::RejectModification,
            Self::Complete => TransitionKind::Complete,
        }
    }
}

/// Why a transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The request's status does not allow the operation.
    #[error("cannot {action} an ad request whose status is {status}")]
    Status {
        /// Attempted operation.
        action: TransitionKind,
        /// Current status.
        status: RequestStatus,
    },

    /// The operation needs a staged counter-offer and there is none.
    #[error("cannot {action}: no modification is awaiting a response")]
    NoPendingModification {
        /// Attempted operation.
        action: TransitionKind,
    },

    /// The proposer tried to answer its own counter-offer.
    #[error("cannot {action}: the {role} proposed this modification and must wait for the other party")]
    OwnProposal {
        /// Attempted operation.
        action: TransitionKind,
        /// Acting role, equal to the proposer.
        role: PartyRole,
    },

    /// The acting role may never perform this operation.
    #[error("a {role} cannot {action} an ad request")]
    RoleNotPermitted {
        /// Attempted operation.
        action: TransitionKind,
        /// Acting role.
        role: PartyRole,
    },

    /// The request names no influencer, so there is no one to deal with.
    #[error("cannot {action}: the ad request is not addressed to an influencer")]
    NotAddressed {
        /// Attempted operation.
        action: TransitionKind,
    },
}

/// Validated content for a new ad request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdRequestDraft {
    ad_name: String,
    description: String,
    terms: Option<String>,
    payment: Payment,
}

impl AdRequestDraft {
    /// Validates a bespoke offer.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank or oversized text, or an
    /// invalid payment.
    pub fn new(
        ad_name: &str,
        description: &str,
        terms: Option<&str>,
        payment: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            ad_name: required_text("ad_name", ad_name, AD_NAME_MAX)?,
            description: required_text("description", description, DESCRIPTION_MAX)?,
            terms: optional_text("terms", terms, TERMS_MAX)?,
            payment: Payment::new(payment)?,
        })
    }

    /// Seeds a draft from a campaign: title, description and budget.
    ///
    /// Campaign text is longer-form than an ad, so both fields are
    /// truncated to the ad limits.
    #[must_use]
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            ad_name: truncate(campaign.title(), AD_NAME_MAX),
            description: truncate(campaign.description(), DESCRIPTION_MAX),
            terms: None,
            payment: campaign.budget(),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// An advertising engagement between one campaign's sponsor and an influencer.
#[derive(Debug, Clone, PartialEq)]
pub struct AdRequest {
    pub(crate) id: AdRequestId,
    pub(crate) campaign_id: CampaignId,
    pub(crate) sponsor_id: SponsorId,
    pub(crate) influencer_id: Option<InfluencerId>,
    pub(crate) ad_name: String,
    pub(crate) description: String,
    pub(crate) terms: Option<String>,
    pub(crate) payment: Payment,
    pub(crate) status: RequestStatus,
    pub(crate) negotiation: Negotiation,
    pub(crate) created_by: PartyRole,
    pub(crate) created_at: DateTime<Utc>,
}

impl AdRequest {
    /// Opens a new pending request on `campaign`.
    ///
    /// The sponsor is always the campaign owner; `influencer_id` is `None`
    /// for an open offer.
    #[must_use]
    pub fn open(
        campaign: &Campaign,
        influencer_id: Option<InfluencerId>,
        initiator: PartyRole,
        draft: AdRequestDraft,
    ) -> Self {
        Self {
            id: AdRequestId::new(),
            campaign_id: campaign.id(),
            sponsor_id: campaign.sponsor_id(),
            influencer_id,
            ad_name: draft.ad_name,
            description: draft.description,
            terms: draft.terms,
            payment: draft.payment,
            status: RequestStatus::Pending,
            negotiation: Negotiation::None,
            created_by: initiator,
            created_at: Utc::now(),
        }
    }

    /// Applies `transition` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] if the current state does not allow
    /// the transition. The request is unchanged in that case.
    pub fn apply(&mut self, actor: PartyRole, transition: Transition) -> Result<(), TransitionError> {
        let action = transition.kind();
        match transition {
            Transition::Accept => {
                self.require(action, self.status == RequestStatus::Pending)?;
                self.require_addressed(action)?;
                self.status = RequestStatus::Accepted;
            }
            Transition::Reject => {
                self.require(action, self.status == RequestStatus::Pending)?;
                self.status = RequestStatus::Rejected;
            }
            Transition::ProposeModification(offer) => {
                self.require(action, self.status.is_negotiable())?;
                self.negotiation = Negotiation::Pending(offer);
                self.created_by = actor;
            }
            Transition::ApproveModification => {
                self.require(action, self.status.is_negotiable())?;
                self.check_responder(action, actor)?;
                self.require_addressed(action)?;
                if let Negotiation::Pending(offer) =
                    std::mem::replace(&mut self.negotiation, Negotiation::Approved)
                {
                    self.terms = Some(offer.terms);
                    self.payment = offer.payment;
                }
                self.status = RequestStatus::Accepted;
                self.created_by = actor;
            }
            Transition::RejectModification => {
                self.check_responder(action, actor)?;
                self.negotiation = Negotiation::Rejected;
            }
            Transition::Complete => {
                if actor != PartyRole::Sponsor {
                    return Err(TransitionError::RoleNotPermitted {
                        action,
                        role: actor,
                    });
                }
                self.require(action, self.status == RequestStatus::Accepted)?;
                self.require_addressed(action)?;
                self.status = RequestStatus::Completed;
            }
        }
        Ok(())
    }

    fn require(&self, action: TransitionKind, allowed: bool) -> Result<(), TransitionError> {
        if allowed {
            Ok(())
        } else {
            Err(TransitionError::Status {
                action,
                status: self.status,
            })
        }
    }

    // Open offers may be negotiated, rejected or deleted, but never become a deal.
    fn require_addressed(&self, action: TransitionKind) -> Result<(), TransitionError> {
        if self.influencer_id.is_some() {
            Ok(())
        } else {
            Err(TransitionError::NotAddressed { action })
        }
    }

    fn check_responder(&self, action: TransitionKind, actor: PartyRole) -> Result<(), TransitionError> {
        if !matches!(self.negotiation, Negotiation::Pending(_)) {
            return Err(TransitionError::NoPendingModification { action });
        }
        if actor == self.created_by {
            return Err(TransitionError::OwnProposal {
                action,
                role: actor,
            });
        }
        Ok(())
    }

    /// Request identifier.
    #[must_use]
    pub const fn id(&self) -> AdRequestId {
        self.id
    }

    /// Parent campaign.
    #[must_use]
    pub const fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    /// Campaign owner.
    #[must_use]
    pub const fn sponsor_id(&self) -> SponsorId {
        self.sponsor_id
    }

    /// Engaged influencer, `None` for an open offer.
    #[must_use]
    pub const fn influencer_id(&self) -> Option<InfluencerId> {
        self.influencer_id
    }

    /// Ad name.
    #[must_use]
    pub fn ad_name(&self) -> &str {
        &self.ad_name
    }

    /// Ad description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Committed terms.
    #[must_use]
    pub fn terms(&self) -> Option<&str> {
        self.terms.as_deref()
    }

    /// Committed payment.
    #[must_use]
    pub const fn payment(&self) -> Payment {
        self.payment
    }

    /// Status axis.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Negotiation axis including any staged offer.
    #[must_use]
    pub const fn negotiation(&self) -> &Negotiation {
        &self.negotiation
    }

    /// Flat negotiation status.
    #[must_use]
    pub const fn negotiation_status(&self) -> NegotiationStatus {
        self.negotiation.status()
    }

    /// Party that made the latest proposal (or approved it).
    #[must_use]
    pub const fn created_by(&self) -> PartyRole {
        self.created_by
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{CampaignDraft, SponsorId};

    fn campaign(budget: f64) -> Campaign {
        let draft = CampaignDraft {
            title: "Summer Launch".to_string(),
            description: "Promote the summer collection".to_string(),
            image: None,
            niche: "fashion".to_string(),
            budget,
            is_public: true,
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap_or_default(),
        };
        let Ok(c) = Campaign::create(SponsorId::new(), &draft) else {
            panic!("valid campaign");
        };
        c
    }

    fn pending_request() -> AdRequest {
        let c = campaign(500.0);
        AdRequest::open(
            &c,
            Some(InfluencerId::new()),
            PartyRole::Sponsor,
            AdRequestDraft::from_campaign(&c),
        )
    }

    fn accepted_request() -> AdRequest {
        let mut req = pending_request();
        let Ok(()) = req.apply(PartyRole::Influencer, Transition::Accept) else {
            panic!("accept pending");
        };
        req
    }

    fn propose(terms: &str, payment: f64) -> Transition {
        let Ok(offer) = Counteroffer::new(terms, payment) else {
            panic!("valid offer");
        };
        Transition::ProposeModification(offer)
    }

    #[test]
    fn open_copies_campaign_defaults() {
        let c = campaign(500.0);
        let infl = InfluencerId::new();
        let req = AdRequest::open(
            &c,
            Some(infl),
            PartyRole::Influencer,
            AdRequestDraft::from_campaign(&c),
        );
        assert_eq!(req.status(), RequestStatus::Pending);
        assert_eq!(req.negotiation_status(), NegotiationStatus::NoNegotiation);
        assert_eq!(req.payment().get(), 500.0);
        assert_eq!(req.influencer_id(), Some(infl));
        assert_eq!(req.sponsor_id(), c.sponsor_id());
        assert_eq!(req.ad_name(), "Summer Launch");
        assert_eq!(req.terms(), None);
        assert_eq!(req.created_by(), PartyRole::Influencer);
    }

    #[test]
    fn reject_is_terminal() {
        let mut req = pending_request();
        assert_eq!(req.apply(PartyRole::Influencer, Transition::Reject), Ok(()));
        assert_eq!(req.status(), RequestStatus::Rejected);

        let before = req.clone();
        assert_eq!(
            req.apply(PartyRole::Influencer, Transition::Accept),
            Err(TransitionError::Status {
                action: TransitionKind::Accept,
                status: RequestStatus::Rejected,
            })
        );
        assert!(req.apply(PartyRole::Sponsor, Transition::Reject).is_err());
        assert!(req.apply(PartyRole::Sponsor, propose("x", 1.0)).is_err());
        assert!(req.apply(PartyRole::Sponsor, Transition::Complete).is_err());
        assert_eq!(req, before);
    }

    #[test]
    fn completed_is_terminal() {
        let mut req = accepted_request();
        assert_eq!(req.apply(PartyRole::Sponsor, Transition::Complete), Ok(()));
        assert_eq!(req.status(), RequestStatus::Completed);

        for t in [Transition::Accept, Transition::Reject, propose("y", 2.0)] {
            assert!(matches!(
                req.apply(PartyRole::Sponsor, t),
                Err(TransitionError::Status {
                    status: RequestStatus::Completed,
                    ..
                })
            ));
        }
    }

    #[test]
    fn accept_requires_pending() {
        let mut req = accepted_request();
        assert!(matches!(
            req.apply(PartyRole::Sponsor, Transition::Accept),
            Err(TransitionError::Status {
                action: TransitionKind::Accept,
                status: RequestStatus::Accepted,
            })
        ));
    }

    #[test]
    fn approve_commits_staged_offer() {
        let mut req = accepted_request();
        assert_eq!(req.apply(PartyRole::Sponsor, propose("net-30", 600.0)), Ok(()));
        assert_eq!(req.negotiation_status(), NegotiationStatus::Pending);
        assert_eq!(
            req.negotiation().staged().map(|o| o.payment().get()),
            Some(600.0)
        );
        assert_eq!(req.payment().get(), 500.0);
        assert_eq!(req.created_by(), PartyRole::Sponsor);

        assert_eq!(
            req.apply(PartyRole::Influencer, Transition::ApproveModification),
            Ok(())
        );
        assert_eq!(req.payment().get(), 600.0);
        assert_eq!(req.terms(), Some("net-30"));
        assert_eq!(req.negotiation_status(), NegotiationStatus::Approved);
        assert!(req.negotiation().staged().is_none());
        assert_eq!(req.status(), RequestStatus::Accepted);
        assert_eq!(req.created_by(), PartyRole::Influencer);
    }

    #[test]
    fn approve_on_pending_request_accepts_it() {
        let mut req = pending_request();
        let _ = req.apply(PartyRole::Influencer, propose("two posts", 750.0));
        assert_eq!(
            req.apply(PartyRole::Sponsor, Transition::ApproveModification),
            Ok(())
        );
        assert_eq!(req.status(), RequestStatus::Accepted);
        assert_eq!(req.payment().get(), 750.0);
    }

    #[test]
    fn reject_modification_keeps_deal() {
        let mut req = accepted_request();
        let _ = req.apply(PartyRole::Sponsor, propose("net-30", 600.0));
        assert_eq!(
            req.apply(PartyRole::Influencer, Transition::RejectModification),
            Ok(())
        );
        assert_eq!(req.payment().get(), 500.0);
        assert_eq!(req.terms(), None);
        assert_eq!(req.status(), RequestStatus::Accepted);
        assert_eq!(req.negotiation_status(), NegotiationStatus::Rejected);
        assert!(req.negotiation().staged().is_none());
    }

    #[test]
    fn proposer_cannot_answer_own_offer() {
        let mut req = accepted_request();
        let _ = req.apply(PartyRole::Influencer, propose("three reels", 900.0));
        let before = req.clone();
        assert_eq!(
            req.apply(PartyRole::Influencer, Transition::ApproveModification),
            Err(TransitionError::OwnProposal {
                action: TransitionKind::ApproveModification,
                role: PartyRole::Influencer,
            })
        );
        assert!(matches!(
            req.apply(PartyRole::Influencer, Transition::RejectModification),
            Err(TransitionError::OwnProposal { .. })
        ));
        assert_eq!(req, before);
    }

    #[test]
    fn responding_without_proposal_fails() {
        let mut req = accepted_request();
        assert_eq!(
            req.apply(PartyRole::Sponsor, Transition::ApproveModification),
            Err(TransitionError::NoPendingModification {
                action: TransitionKind::ApproveModification
            })
        );
        assert!(matches!(
            req.apply(PartyRole::Sponsor, Transition::RejectModification),
            Err(TransitionError::NoPendingModification { .. })
        ));
    }

    #[test]
    fn reproposal_overwrites_staged_values() {
        let mut req = accepted_request();
        let _ = req.apply(PartyRole::Sponsor, propose("first", 100.0));
        let _ = req.apply(PartyRole::Influencer, propose("second", 200.0));
        let staged = req.negotiation().staged().cloned();
        assert_eq!(staged.as_ref().map(Counteroffer::terms), Some("second"));
        assert_eq!(staged.map(|o| o.payment().get()), Some(200.0));
        assert_eq!(req.created_by(), PartyRole::Influencer);
    }

    #[test]
    fn accept_ignores_negotiation_axis() {
        let mut req = pending_request();
        let _ = req.apply(PartyRole::Influencer, propose("story + post", 650.0));
        assert_eq!(req.apply(PartyRole::Sponsor, Transition::Accept), Ok(()));
        assert_eq!(req.status(), RequestStatus::Accepted);
        assert_eq!(req.negotiation_status(), NegotiationStatus::Pending);
        assert_eq!(req.payment().get(), 500.0);
    }

    #[test]
    fn open_offer_cannot_become_a_deal() {
        let c = campaign(500.0);
        let mut req = AdRequest::open(&c, None, PartyRole::Sponsor, AdRequestDraft::from_campaign(&c));
        assert_eq!(
            req.apply(PartyRole::Sponsor, Transition::Accept),
            Err(TransitionError::NotAddressed {
                action: TransitionKind::Accept
            })
        );

        assert_eq!(req.apply(PartyRole::Sponsor, propose("one reel", 200.0)), Ok(()));
        assert!(matches!(
            req.apply(PartyRole::Influencer, Transition::ApproveModification),
            Err(TransitionError::NotAddressed { .. })
        ));
        assert_eq!(req.status(), RequestStatus::Pending);
        assert_eq!(req.negotiation_status(), NegotiationStatus::Pending);
        assert_eq!(req.payment().get(), 500.0);

        assert_eq!(req.apply(PartyRole::Influencer, Transition::RejectModification), Ok(()));
        assert_eq!(req.apply(PartyRole::Sponsor, Transition::Reject), Ok(()));
    }

    #[test]
    fn approve_cannot_resurrect_rejected_request() {
        let mut req = pending_request();
        let _ = req.apply(PartyRole::Influencer, propose("story", 300.0));
        let _ = req.apply(PartyRole::Sponsor, Transition::Reject);
        assert!(matches!(
            req.apply(PartyRole::Sponsor, Transition::ApproveModification),
            Err(TransitionError::Status {
                status: RequestStatus::Rejected,
                ..
            })
        ));
        // A stale offer can still be cleared.
        assert_eq!(
            req.apply(PartyRole::Sponsor, Transition::RejectModification),
            Ok(())
        );
        assert_eq!(req.status(), RequestStatus::Rejected);
    }

    #[test]
    fn only_sponsor_completes() {
        let mut req = accepted_request();
        assert_eq!(
            req.apply(PartyRole::Influencer, Transition::Complete),
            Err(TransitionError::RoleNotPermitted {
                action: TransitionKind::Complete,
                role: PartyRole::Influencer,
            })
        );
        let mut pending = pending_request();
        assert!(matches!(
            pending.apply(PartyRole::Sponsor, Transition::Complete),
            Err(TransitionError::Status {
                status: RequestStatus::Pending,
                ..
            })
        ));
    }

    #[test]
    fn counteroffer_validation() {
        assert_eq!(
            Counteroffer::new("  ", 10.0),
            Err(ValidationError::EmptyField("terms"))
        );
        assert_eq!(
            Counteroffer::new("ok", -0.5),
            Err(ValidationError::NegativePayment(-0.5))
        );
    }

    #[test]
    fn negotiation_from_parts_enforces_staged_invariant() {
        assert!(matches!(
            Negotiation::from_parts(
                NegotiationStatus::Pending,
                Some("t".to_string()),
                Some(1.0)
            ),
            Ok(Negotiation::Pending(_))
        ));
        assert_eq!(
            Negotiation::from_parts(NegotiationStatus::Approved, None, None),
            Ok(Negotiation::Approved)
        );
        assert!(Negotiation::from_parts(NegotiationStatus::Pending, None, None).is_err());
        assert!(
            Negotiation::from_parts(NegotiationStatus::Rejected, None, Some(3.0)).is_err()
        );
    }

    #[test]
    fn draft_validation() {
        assert!(AdRequestDraft::new("Reel", "One reel", Some("net-30"), 100.0).is_ok());
        assert_eq!(
            AdRequestDraft::new("", "d", None, 1.0),
            Err(ValidationError::EmptyField("ad_name"))
        );
        assert!(AdRequestDraft::new("n", "d", None, -1.0).is_err());
    }
}
